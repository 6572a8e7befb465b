//! Error types module
//!
//! All pipeline errors are unified under the `AppError` enum. Every variant is
//! caught at the pipeline boundary and converted into an `UploadOutcome`; none
//! propagate as uncaught panics.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No usable source reference for the photo")]
    NoSourceReference,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Server rejected upload: HTTP {status}: {body}")]
    ServerRejected { status: u16, body: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Transport(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_rejected_display() {
        let err = AppError::ServerRejected {
            status: 500,
            body: "internal error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Server rejected upload: HTTP 500: internal error"
        );
    }

    #[test]
    fn test_io_error_maps_to_transport() {
        let io_err = io::Error::new(io::ErrorKind::ConnectionReset, "reset");
        let err = AppError::from(io_err);
        assert!(matches!(err, AppError::Transport(_)));
        assert!(err.to_string().contains("reset"));
    }
}
