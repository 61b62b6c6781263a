//! Error types for the generator flow.
//!
//! Every top-level failure of an invocation funnels into [`MenuError`]. Region lookup
//! misses during rendering are not errors; they are reported as
//! [`RenderDiagnostic`](crate::domain::models::RenderDiagnostic)s.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Request failed with status {status}: {reason}")]
    Status { status: u16, reason: String },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Parsing error: {0}")]
    Parse(String),
    #[error("Required page region '{0}' is missing")]
    MissingRegion(String),
}

impl MenuError {
    /// Fetch, status and parse failures share one user-facing handler.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            MenuError::Status { .. } | MenuError::Transport(_) | MenuError::Parse(_)
        )
    }
}

impl From<reqwest::Error> for MenuError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return MenuError::Parse(err.to_string());
        }
        MenuError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for MenuError {
    fn from(err: serde_json::Error) -> Self {
        MenuError::Parse(err.to_string())
    }
}
