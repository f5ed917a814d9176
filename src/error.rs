//! Error types for solver setup and time stepping.
//!
//! Only configuration problems and infeasible time steps are reported as
//! errors. Flux, boundary and physical-model evaluations never fail: invalid
//! states propagate as NaN and show up in the relative-error monitor.

use thiserror::Error;

/// Errors raised while setting up or advancing a DG solver.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DgError {
    /// A boundary face references a surface with no registered condition.
    #[error("boundary condition not found for surface {surface}")]
    BoundaryNotFound { surface: String },

    /// Sizes of two collaborating objects disagree.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The CFL-limited time step is zero, negative or NaN.
    #[error("Infeasible time step: dt = {dt:e}")]
    InvalidTimeStep { dt: f64 },

    /// A local mass matrix could not be inverted.
    #[error("Singular local mass matrix: {0}")]
    Singular(String),
}

impl DgError {
    /// Create a dimension mismatch error.
    pub fn dimension_mismatch(expected: impl ToString, actual: impl ToString) -> Self {
        Self::DimensionMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create a missing boundary condition error.
    pub fn boundary_not_found(surface: impl Into<String>) -> Self {
        Self::BoundaryNotFound {
            surface: surface.into(),
        }
    }

    /// Whether the error is detected before the first time step.
    pub fn is_setup_error(&self) -> bool {
        !matches!(self, DgError::InvalidTimeStep { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DgError>;
