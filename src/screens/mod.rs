//! Screen controllers for the application.
//!
//! Three screens cover every route: home, one card list and one form, the
//! latter two parametrized by an entity kind.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                        Shell                          │
//! │  route ──► Home | List(kind) | Create(kind) | Edit(r) │
//! │             │      │             └──────┬─────┘       │
//! │        HomeScreen ListScreen        FormScreen        │
//! │                                                       │
//! │  on_enter      -> requests, tagged with a generation  │
//! │  handle_event  -> ScreenAction                        │
//! │  on_response   <- ApiEvent of the current generation  │
//! └──────────────────────────────────────────────────────┘
//! ```

pub mod form;
pub mod home;
pub mod list;
pub mod screen_trait;

pub use form::{FormMode, FormScreen};
pub use home::HomeScreen;
pub use list::{ListPhase, ListScreen};
pub use screen_trait::{Screen, ScreenAction, ScreenContext};
