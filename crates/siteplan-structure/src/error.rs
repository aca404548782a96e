//! Structure-planning error types.

use thiserror::Error;

/// Errors that can occur during structure planning.
///
/// Business outcomes ("no risks found", "hub has no spokes") are never
/// errors; they are empty collections. Errors are reserved for invalid
/// arguments and distance-provider failures.
#[derive(Debug, Error)]
pub enum StructureError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Distance provider failure, propagated unmodified
    #[error("Distance provider error: {0}")]
    Provider(String),
}
