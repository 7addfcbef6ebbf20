//! Network construction and validation errors.

use gf_core::{EdgeId, GfError, NodeId};

/// Errors raised while building or editing a pipeline network.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// An edge end refers to a node that doesn't exist.
    UnknownNode { edge: String, node: NodeId },

    /// Both ends of an edge sit on the same node.
    SelfLoop { edge: String },

    /// Two nodes or two edges share a key.
    DuplicateKey { what: &'static str, key: String },

    /// A key lookup found nothing.
    KeyNotFound { what: &'static str, key: String },

    /// An edge id is out of range.
    UnknownEdge { edge: EdgeId },

    /// A pipe parameter is NaN or infinite.
    NonFinite { what: &'static str, edge: String },

    /// A segment count other than the one the pipe length dictates.
    InvalidSegmentCount {
        edge: String,
        count: usize,
        expected: usize,
    },

    /// Node adjacency disagrees with edge endpoints.
    InconsistentAdjacency { node: NodeId },
}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkError::UnknownNode { edge, node } => {
                write!(f, "Edge '{}' refers to non-existent node {}", edge, node)
            }
            NetworkError::SelfLoop { edge } => {
                write!(f, "Edge '{}' connects a node to itself", edge)
            }
            NetworkError::DuplicateKey { what, key } => {
                write!(f, "Duplicate {} key '{}'", what, key)
            }
            NetworkError::KeyNotFound { what, key } => {
                write!(f, "No {} with key '{}'", what, key)
            }
            NetworkError::UnknownEdge { edge } => write!(f, "Edge {} does not exist", edge),
            NetworkError::NonFinite { what, edge } => {
                write!(f, "Edge '{}' has a non-finite {}", edge, what)
            }
            NetworkError::InvalidSegmentCount {
                edge,
                count,
                expected,
            } => write!(
                f,
                "Edge '{}' needs {} segments for its length, not {}",
                edge, expected, count
            ),
            NetworkError::InconsistentAdjacency { node } => {
                write!(f, "Adjacency of node {} disagrees with edge endpoints", node)
            }
        }
    }
}

impl std::error::Error for NetworkError {}

pub type NetworkResult<T> = Result<T, NetworkError>;

impl From<NetworkError> for GfError {
    fn from(err: NetworkError) -> Self {
        match err {
            NetworkError::NonFinite { what, .. } => GfError::NonFinite {
                what,
                value: f64::NAN,
            },
            NetworkError::InvalidSegmentCount { .. } => GfError::InvalidArg {
                what: "segment count",
            },
            NetworkError::UnknownEdge { edge } => GfError::IndexOob {
                what: "edge",
                index: edge.slot(),
                len: 0,
            },
            NetworkError::UnknownNode { .. } => GfError::Invariant {
                what: "edge refers to unknown node",
            },
            NetworkError::SelfLoop { .. } => GfError::Invariant {
                what: "edge connects a node to itself",
            },
            NetworkError::DuplicateKey { .. } => GfError::Invariant {
                what: "duplicate key",
            },
            NetworkError::KeyNotFound { .. } => GfError::InvalidArg { what: "key" },
            NetworkError::InconsistentAdjacency { .. } => GfError::Invariant {
                what: "inconsistent adjacency",
            },
        }
    }
}
