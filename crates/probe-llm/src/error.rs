use thiserror::Error;

/// Transport-level failures: connection errors, timeouts, body decode
/// problems, and non-success response statuses.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },
}
