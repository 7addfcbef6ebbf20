//! Fluid property errors.

use gf_core::GfError;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur during composition handling and EOS evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Invalid argument (non-finite input, negative fraction, empty mixture).
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Composition vector of the wrong length.
    #[error("Wrong arity for {what} (expected {expected}, got {actual})")]
    Arity {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Mole fractions do not sum to one within the caller's tolerance.
    #[error("Mole fractions sum to {sum}, expected 1")]
    NotNormalized { sum: f64 },

    /// No sign change of the pressure residual up to the density cap.
    #[error(
        "Unable to bracket density for P={pressure_mpa} MPa, T={temperature_k} K (upper bound {upper})"
    )]
    DensityNotBracketed {
        pressure_mpa: f64,
        temperature_k: f64,
        upper: f64,
    },

    /// Bisection exhausted its iterations without reaching tolerance.
    #[error("Density solver did not converge after {iterations} iterations (residual {residual} MPa)")]
    DensityNotConverged { iterations: usize, residual: f64 },
}

impl From<FluidError> for GfError {
    fn from(err: FluidError) -> Self {
        match err {
            FluidError::InvalidArg { what } => GfError::InvalidArg { what },
            FluidError::Arity {
                what,
                expected,
                actual,
            } => GfError::Arity {
                what,
                expected,
                actual,
            },
            FluidError::NotNormalized { .. } => GfError::InvalidArg {
                what: "composition not normalized",
            },
            e @ (FluidError::DensityNotBracketed { .. }
            | FluidError::DensityNotConverged { .. }) => GfError::Numerical {
                what: e.to_string(),
            },
        }
    }
}
