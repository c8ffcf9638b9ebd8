//! CineDK - a terminal client for managing a cinema over its REST backend
//!
//! This library provides the entity model, the HTTP client, the form engine
//! and the screens of the TUI, plus the one-shot CLI commands.

// Core modules
pub mod api;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod form;
pub mod keymap;
pub mod model;
pub mod screens;
pub mod shell;
pub mod styles;
pub mod tui;
pub mod ui;
pub mod utils;
pub mod widgets;

// Re-exports for convenience
pub use api::{ApiClient, ApiError};
pub use config::{Config, MutationPolicy};
pub use model::{EntityKind, Record};
pub use shell::Shell;

// Keymap re-exports (used by Config and for external API)
pub use keymap::{Action, KeyBinding, Keymap, KeymapPreset};
