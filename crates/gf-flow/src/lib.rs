//! gf-flow: steady-state gas pipeline flow for gasflow.
//!
//! Provides:
//! - Weymouth, Panhandle A/B and Darcy–Weisbach correlations behind the
//!   `FlowCorrelation` trait, with elevation folded into an equivalent length
//! - `FlowParams`, the common input record (kPa, °C, km, mm, m)
//! - `PipelineCalculator`, which couples AGA8 gas properties to Panhandle B
//!   for flow, velocities, line pack and P1 × P2 tables
//!
//! # Example
//!
//! ```
//! use gf_flow::{Correlation, FlowParams, flow_rate};
//!
//! let params = FlowParams::default();
//! let q = flow_rate(&Correlation::PanhandleB, &params);
//! assert!(q > 0.0);
//! assert_eq!(flow_rate(&Correlation::PanhandleB, &params.reversed()), -q);
//! ```

pub mod calculator;
pub mod common;
pub mod correlations;
pub mod error;
pub mod params;

// Re-exports
pub use calculator::{
    FlowTable, PipelineCalculator, PipelineInputs, PipelineResult, TableCell, mean_pressure,
};
pub use correlations::{
    Correlation, DarcyWeisbach, FlowCorrelation, PanhandleA, PanhandleB, Weymouth, flow_rate,
};
pub use error::{FlowError, FlowResult};
pub use params::{FlowParams, bara_to_barg, barg_to_bara};
