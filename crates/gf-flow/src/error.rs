//! Error types for pipeline flow calculations.

use gf_core::error::GfError;
use gf_fluids::FluidError;
use thiserror::Error;

/// Errors that can occur in the pipeline calculator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Gas property failure (composition shape, density solver).
    #[error("Fluid property error: {0}")]
    Fluid(#[from] FluidError),
}

pub type FlowResult<T> = Result<T, FlowError>;

impl From<FlowError> for GfError {
    fn from(e: FlowError) -> Self {
        match e {
            FlowError::InvalidArg { what } => GfError::InvalidArg { what },
            FlowError::Fluid(inner) => inner.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FlowError::InvalidArg { what: "diameter" };
        assert!(err.to_string().contains("diameter"));
    }

    #[test]
    fn fluid_error_keeps_its_kind() {
        let err: FlowError = FluidError::DensityNotConverged {
            iterations: 50,
            residual: 1.0,
        }
        .into();
        let gf: GfError = err.into();
        assert!(matches!(gf, GfError::Numerical { .. }));
    }
}
