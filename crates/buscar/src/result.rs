//! Result and error types for Buscar.
//!
//! `BuscarError` covers caller mistakes and I/O only. Runtime verification
//! failures (stalls, mismatches, transport loss) are not errors: they are
//! embedded in [`crate::report::ScenarioResult`] so a matrix run can
//! aggregate them without catching.

use thiserror::Error;

/// Result type for Buscar operations
pub type BuscarResult<T> = Result<T, BuscarError>;

/// Errors that can occur in Buscar
#[derive(Debug, Error)]
pub enum BuscarError {
    /// A seek plan with no steps was supplied
    #[error("Seek plan is empty; at least one (offset, expected color) step is required")]
    EmptyPlan,

    /// Round count must be at least one
    #[error("Invalid round count: {value} (must be >= 1)")]
    InvalidRoundCount {
        /// The rejected value
        value: u32,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
