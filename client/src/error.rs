//! Error types for the farm directories

use shared::{FarmId, FieldError};
use thiserror::Error;

/// Failures raised by a [`FarmDirectory`](crate::directory::FarmDirectory)
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Farm directory unreachable: {0}")]
    Unreachable(String),

    #[error("Farm directory rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Malformed farm directory response: {0}")]
    Malformed(String),

    #[error("Farm {0} not found")]
    NotFound(FarmId),

    #[error("Invalid farm: {0}")]
    Invalid(#[from] FieldError),
}

/// Result type alias for directory operations
pub type DirectoryResult<T> = Result<T, DirectoryError>;
