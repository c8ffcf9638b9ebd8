use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Longest backend error body kept for display.
const BODY_PREVIEW_CHARS: usize = 200;

/// Failure of a single backend request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("could not reach the backend: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend answered {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("could not read attachment {path:?}: {source}")]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid backend URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ApiError {
    /// Build a `Status` error, truncating the body to something toast-sized.
    pub fn status(status: StatusCode, body: &str) -> Self {
        let body = body.trim();
        let body = if body.chars().count() > BODY_PREVIEW_CHARS {
            let cut: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
            format!("{}…", cut)
        } else {
            body.to_string()
        };
        ApiError::Status { status, body }
    }
}
