//! Wave scheduling error types.

use thiserror::Error;

/// Errors that can occur during wave scheduling.
#[derive(Debug, Error)]
pub enum WavesError {
    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
