//! Error types for the homogeneity analysis

use thiserror::Error;

use crate::field::FieldError;

/// Errors surfaced by [`crate::HomogeneityAnalysis::compute`] and the setup loader
#[derive(Debug, Error)]
pub enum HomogeneityError {
    /// Threshold is not a positive real lower than or equal to 100
    #[error("homogeneity value must be a positive real lower than 100, got {0}")]
    InvalidThreshold(f64),

    /// Raised by the field evaluator, passed through unchanged
    #[error(transparent)]
    NumericFault(#[from] FieldError),

    /// Setup file describes an unusable domain or coil set
    #[error("invalid setup: {0}")]
    InvalidSetup(String),

    /// Report template failed to render
    #[error("report rendering failed: {0}")]
    Render(#[from] minijinja::Error),
}

pub type Result<T> = std::result::Result<T, HomogeneityError>;
