//! Shared error type across strokecast crates.

use thiserror::Error;

/// Stable error codes (used in logs and by tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Configuration could not be read, parsed, or validated.
    BadConfig,
    /// Malformed host input line.
    BadInput,
    /// Connect refused, handshake failure, or mid-session drop.
    Transport,
    /// Outbound message could not be serialized.
    Encode,
    /// Anything else.
    Internal,
}

impl ErrorCode {
    /// String representation used in structured log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::BadInput => "BAD_INPUT",
            ErrorCode::Transport => "TRANSPORT",
            ErrorCode::Encode => "ENCODE",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, StrokecastError>;

/// Unified error type used by core and agent.
#[derive(Debug, Error)]
pub enum StrokecastError {
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("bad input: {0}")]
    BadInput(String),
    #[error("transport: {0}")]
    Transport(String),
    #[error("encode failed: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("internal: {0}")]
    Internal(String),
}

impl StrokecastError {
    /// Map the error onto its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            StrokecastError::BadConfig(_) => ErrorCode::BadConfig,
            StrokecastError::BadInput(_) => ErrorCode::BadInput,
            StrokecastError::Transport(_) => ErrorCode::Transport,
            StrokecastError::Encode(_) => ErrorCode::Encode,
            StrokecastError::Internal(_) => ErrorCode::Internal,
        }
    }
}
