//! Error types for sweeps and settings loading.

use thiserror::Error;

/// Errors surfaced by the sweep core.
///
/// Degenerate geometry (zero-length segments, normals parallel to the
/// reference axis) is recovered inside the march and never shows up here.
#[derive(Error, Debug)]
pub enum SweepError {
    /// Agent has no parameter bundle attached.
    #[error("agent has no sweep parameters assigned")]
    MissingConfiguration,

    /// A parameter is out of its valid range.
    #[error("invalid sweep parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f32,
        /// Constraint that failed.
        reason: &'static str,
    },

    /// Settings file could not be read.
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    /// Settings JSON could not be parsed.
    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SweepError>;
