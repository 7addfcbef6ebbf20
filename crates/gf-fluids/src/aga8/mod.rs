//! AGA8-92DC detail characterization equation of state (ISO 12213-2).
//!
//! Pipeline: [`MixtureCoefficients::build`] once per composition, then
//! [`evaluate_state`] for Z/pressure at a known density, or
//! [`solve_density`] to invert a target pressure. Everything here is pure and
//! `Send + Sync`, so independent queries can run in parallel.

pub mod coefficients;
pub mod constants;
pub mod density;
pub mod eos;

pub use coefficients::MixtureCoefficients;
pub use density::solve_density;
pub use eos::{EosState, evaluate_state};
