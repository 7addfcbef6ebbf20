//! gf-fluids: natural gas properties for gasflow.
//!
//! Provides:
//! - The 21 detailed-analysis components and their molar masses
//! - `GasComposition` (fixed-arity mole-fraction vector)
//! - The AGA8-92DC detail equation of state (coefficients, Z/pressure, density solver)
//! - `compute_z_and_density`, the standalone Z/density query
//! - `QuickZ`, the fast pressure-only correlation used per simulation tick
//!
//! # Example
//!
//! ```
//! use gf_fluids::{GasComposition, compute_z_and_density};
//!
//! let gas = GasComposition::default();
//! let r = compute_z_and_density(gas.as_array(), 288.15, 5.0).unwrap();
//! assert!(r.z > 0.85 && r.z < 0.95);
//! ```

pub mod aga8;
pub mod calculator;
pub mod component;
pub mod composition;
pub mod error;
pub mod quick_z;

// Re-exports for ergonomics
pub use aga8::{EosState, MixtureCoefficients, evaluate_state, solve_density};
pub use calculator::{ZDensity, compute_z_and_density, z_and_density};
pub use component::{Component, NUM_COMPONENTS};
pub use composition::GasComposition;
pub use error::{FluidError, FluidResult};
pub use quick_z::{QuickZ, QuickZCoefficients};
