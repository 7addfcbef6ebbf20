//! Error types for network simulation.

use gf_core::error::GfError;
use gf_network::NetworkError;
use thiserror::Error;

/// Errors encountered while stepping a network.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// A segment pressure reached the configured ceiling.
    #[error("Segment pressure {max_pressure_mpa:.3} MPa reached the ceiling after {elapsed_s} s")]
    OverPressure {
        max_pressure_mpa: f64,
        elapsed_s: u64,
    },

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
}

pub type SimResult<T> = Result<T, SimError>;

impl From<SimError> for GfError {
    fn from(e: SimError) -> Self {
        match e {
            SimError::InvalidArg { what } => GfError::InvalidArg { what },
            SimError::OverPressure { .. } => GfError::PhysicalLimit {
                what: e.to_string(),
            },
            SimError::Network(inner) => inner.into(),
        }
    }
}
