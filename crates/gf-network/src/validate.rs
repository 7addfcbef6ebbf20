//! Network validation.

use std::collections::HashMap;
use std::collections::HashSet;

use gf_core::Id;

use crate::error::{NetworkError, NetworkResult};
use crate::graph::{Adjacency, Edge, EndSide, Node};

/// Every edge references existing, distinct nodes and has finite geometry.
pub(crate) fn validate_structure(nodes: &[Node], edges: &[Edge]) -> NetworkResult<()> {
    for edge in edges {
        for node in [edge.source, edge.target] {
            if node.slot() >= nodes.len() {
                return Err(NetworkError::UnknownNode {
                    edge: edge.key.clone(),
                    node,
                });
            }
        }

        if edge.source == edge.target {
            return Err(NetworkError::SelfLoop {
                edge: edge.key.clone(),
            });
        }

        let scalars = [
            ("length", edge.length_km()),
            ("diameter", edge.diameter_mm()),
            ("efficiency", edge.efficiency),
            ("temperature", edge.temperature_c),
            ("elevation", edge.h1_m),
            ("elevation", edge.h2_m),
        ];
        for (what, value) in scalars {
            if !value.is_finite() {
                return Err(NetworkError::NonFinite {
                    what,
                    edge: edge.key.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Build a key → id map, failing on the first repeated key.
pub(crate) fn unique_keys<'a>(
    what: &'static str,
    items: impl Iterator<Item = (&'a String, Id)>,
) -> NetworkResult<HashMap<String, Id>> {
    let mut map = HashMap::new();
    for (key, id) in items {
        if map.insert(key.clone(), id).is_some() {
            return Err(NetworkError::DuplicateKey {
                what,
                key: key.clone(),
            });
        }
    }
    Ok(map)
}

/// Each edge end appears exactly once, under the node it touches.
pub(crate) fn validate_adjacency(
    nodes: &[Node],
    edges: &[Edge],
    adjacency: &Adjacency,
) -> NetworkResult<()> {
    if adjacency.offsets.len() != nodes.len() + 1 {
        return Err(NetworkError::InconsistentAdjacency {
            node: nodes.first().map_or(Id::from_index(0), |n| n.id),
        });
    }

    let mut seen = HashSet::new();
    for node in nodes {
        for end in adjacency.ends(node.id) {
            let Some(edge) = edges.get(end.edge.slot()) else {
                return Err(NetworkError::UnknownEdge { edge: end.edge });
            };
            let touches = match end.side {
                EndSide::Source => edge.source,
                EndSide::Target => edge.target,
            };
            if touches != node.id || !seen.insert(*end) {
                return Err(NetworkError::InconsistentAdjacency { node: node.id });
            }
        }
    }

    if seen.len() != edges.len() * 2 {
        return Err(NetworkError::InconsistentAdjacency {
            node: nodes.first().map_or(Id::from_index(0), |n| n.id),
        });
    }
    Ok(())
}
