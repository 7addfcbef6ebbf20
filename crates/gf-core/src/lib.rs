//! gf-core: stable foundation for the gasflow engine.
//!
//! Contains:
//! - units (uom SI types + pipeline constants)
//! - numeric (Real + tolerances)
//! - ids (compact IDs for network nodes and edges)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{GfError, GfResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
