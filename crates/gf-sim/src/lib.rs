//! Transient simulation of gas pipeline networks.
//!
//! Provides:
//! - Explicit 1 s transport step (node balance, edge transport, velocities)
//! - Stability monitor for steady state and over-pressure
//! - Simulation clock with speeds, between-tick hook and reset
//!
//! # Example
//!
//! ```
//! use gf_network::{NetworkBuilder, PipeSpec};
//! use gf_sim::{BatchOutcome, Scheduler, SimulationSpeed};
//!
//! let mut builder = NetworkBuilder::new();
//! let a = builder.add_node("A");
//! let b = builder.add_node("B");
//! builder.add_edge("A-B", a, b, PipeSpec::new(40.0, 500.0));
//! let mut net = builder.build().unwrap();
//! net.node_mut(a).unwrap().fix_pressure(5.0);
//!
//! let mut sched = Scheduler::new(net);
//! sched.set_speed(SimulationSpeed::Hour);
//! assert_eq!(sched.run_batch().unwrap(), BatchOutcome::Completed { ticks: 3600 });
//! assert!(sched.network().stored_volume() > 0.0);
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod stability;
pub mod transport;

pub use clock::{
    BatchOutcome, RunStatus, Scheduler, SimulationSpeed, SimulationState, StopReason, TickHook,
};
pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use stability::{StabilityMonitor, StabilityVerdict};
pub use transport::{
    advance, advance_with, balance_nodes, pressure_at_volume, transport_edges, update_velocities,
    velocity, volume_at_pressure,
};
