//! REST backend access.
//!
//! [`ApiClient`] performs the HTTP calls. Screens never call it directly:
//! they return [`ApiRequest`]s, the app tags each with the current
//! [`Generation`] and runs it on the tokio runtime, and the outcome comes
//! back as an [`ApiEvent`].

mod client;
mod error;
pub mod fence;
pub mod request;

pub use client::ApiClient;
pub use error::ApiError;
pub use fence::{Generation, GenerationFence};
pub use request::{ApiEvent, ApiRequest, Dispatch, Operation, Part, Payload, Reply};

/// Base URL used when the config does not name one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
