//! gf-network: pipeline network model.
//!
//! Provides:
//! - Node, Edge and PipeSegment records with typed setters
//! - Incremental builder computing node → edge-end adjacency once
//! - Pipe discretization (segment count, half-cell lengths, capacity)
//!
//! # Example
//!
//! ```
//! use gf_network::{NetworkBuilder, PipeSpec};
//!
//! let mut builder = NetworkBuilder::new();
//! let a = builder.add_node("A");
//! let b = builder.add_node("B");
//! builder.add_edge("A-B", a, b, PipeSpec::new(130.0, 500.0));
//! let net = builder.build().unwrap();
//!
//! assert_eq!(net.edges()[0].segment_count(), 12);
//! assert_eq!(net.node_ends(b).len(), 1);
//! ```

pub mod builder;
pub mod discretize;
pub mod error;
pub mod graph;
pub(crate) mod validate;

pub use builder::NetworkBuilder;
pub use discretize::{segment_capacity, segment_count, segment_length};
pub use error::{NetworkError, NetworkResult};
pub use graph::{
    Adjacency, DEFAULT_SEGMENT_Z, Edge, EdgeEnd, EndSide, Network, Node, PipeSegment, PipeSpec,
};
