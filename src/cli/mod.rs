//! Command-line interface.
//!
//! Without a subcommand the binary starts the TUI. The subcommands are
//! one-shot, non-interactive wrappers over the same API client.

mod common;
mod completions;
mod records;

pub use common::*;

use crate::model::EntityKind;
use crate::utils::get_config_path;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// A terminal client for managing a cinema through its REST backend
#[derive(Parser, Debug)]
#[command(name = "cinedk", version, about = "A terminal client for managing a cinema through its REST backend", long_about = None, disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend root URL for this run (overrides `base_url` in the config)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable colors in the TUI (also respects NO_COLOR env var)
    #[arg(long, global = true)]
    pub no_colors: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every record of an entity
    List {
        /// Entity name, e.g. movies or session-tickets
        entity: EntityKind,
        /// Print the backend's JSON instead of cards
        #[arg(long)]
        json: bool,
    },
    /// Delete one record
    Delete {
        /// Entity name, e.g. movies or session-tickets
        entity: EntityKind,
        /// Record id
        id: i64,
    },
    /// List entity names and their endpoints
    Entities,
    /// Print shell completions
    Completions {
        /// Target shell (detected from $SHELL when omitted)
        #[arg(value_enum)]
        shell: Option<clap_complete::Shell>,
    },
}

impl Cli {
    /// Config file in use: `--config`, else the default location.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(get_config_path)
    }

    /// Run the selected subcommand. Does nothing when there is none.
    pub fn execute(self) -> Result<()> {
        let Some(command) = &self.command else {
            return Ok(());
        };

        match command {
            Commands::Entities => {
                for line in records::entity_table() {
                    println!("{}", line);
                }
                Ok(())
            }
            Commands::Completions { shell } => completions::generate(*shell),
            Commands::List { entity, json } => {
                let ctx = CliContext::load(&self.config_path(), self.base_url.as_deref())?;
                block_on(records::list(&ctx, *entity, *json))
            }
            Commands::Delete { entity, id } => {
                let ctx = CliContext::load(&self.config_path(), self.base_url.as_deref())?;
                block_on(records::delete(&ctx, *entity, *id))
            }
        }
    }
}

fn block_on<F: std::future::Future<Output = Result<()>>>(future: F) -> Result<()> {
    tokio::runtime::Runtime::new()
        .context("Failed to start async runtime")?
        .block_on(future)
}
