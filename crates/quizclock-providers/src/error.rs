//! Question source error types.

use thiserror::Error;

/// Errors that can occur when fetching questions.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The server returned a non-success HTTP status.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The payload carried a non-zero response code.
    #[error("question source refused the request (code {code}): {reason}")]
    ResponseCode { code: u8, reason: &'static str },

    /// The body could not be decoded into questions.
    #[error("malformed question payload: {0}")]
    Parse(String),

    /// A local question file could not be read.
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
}

impl SourceError {
    /// Translate an Open Trivia DB response code into an error, if it is one.
    pub fn from_response_code(code: u8) -> Option<Self> {
        let reason = match code {
            0 => return None,
            1 => "not enough questions for the query",
            2 => "invalid parameter",
            3 => "session token not found",
            4 => "session token exhausted",
            5 => "rate limited, wait a few seconds",
            _ => "unknown response code",
        };
        Some(SourceError::ResponseCode { code, reason })
    }
}
