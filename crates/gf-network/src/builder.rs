//! Incremental network builder.

use std::collections::HashMap;

use gf_core::{EdgeId, NodeId};

use crate::error::NetworkResult;
use crate::graph::{Adjacency, Edge, EdgeEnd, EndSide, Network, Node, PipeSpec};
use crate::validate;

/// Builder for a pipeline network.
///
/// Use `add_node` and `add_edge` to describe the topology, then `build()` to
/// validate it and compute the node adjacency once.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its id.
    pub fn add_node(&mut self, key: impl Into<String>) -> NodeId {
        let id = NodeId::from_index(self.nodes.len() as u32);
        self.nodes.push(Node::new(id, key));
        id
    }

    /// Add a pipe from `source` to `target`. Segments are laid out from the
    /// length.
    pub fn add_edge(
        &mut self,
        key: impl Into<String>,
        source: NodeId,
        target: NodeId,
        spec: PipeSpec,
    ) -> EdgeId {
        let id = EdgeId::from_index(self.edges.len() as u32);
        self.edges
            .push(Edge::new(id, key.into(), source, target, &spec));
        id
    }

    /// Mutable access to a node before the network is frozen.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.slot())
    }

    /// Validate and freeze.
    pub fn build(self) -> NetworkResult<Network> {
        validate::validate_structure(&self.nodes, &self.edges)?;
        let node_keys = validate::unique_keys("node", self.nodes.iter().map(|n| (&n.key, n.id)))?;
        let edge_keys = validate::unique_keys("edge", self.edges.iter().map(|e| (&e.key, e.id)))?;

        let adjacency = Self::build_adjacency(&self.nodes, &self.edges);
        validate::validate_adjacency(&self.nodes, &self.edges, &adjacency)?;

        Ok(Network {
            nodes: self.nodes,
            edges: self.edges,
            adjacency,
            node_keys,
            edge_keys,
        })
    }

    fn build_adjacency(nodes: &[Node], edges: &[Edge]) -> Adjacency {
        let mut by_node: HashMap<NodeId, Vec<EdgeEnd>> = HashMap::new();
        for edge in edges {
            by_node.entry(edge.source).or_default().push(EdgeEnd {
                edge: edge.id,
                side: EndSide::Source,
            });
            by_node.entry(edge.target).or_default().push(EdgeEnd {
                edge: edge.id,
                side: EndSide::Target,
            });
        }
        for ends in by_node.values_mut() {
            ends.sort_by_key(|e| e.edge.index());
        }

        let mut offsets = Vec::with_capacity(nodes.len() + 1);
        let mut flat = Vec::with_capacity(edges.len() * 2);
        offsets.push(0);
        for node in nodes {
            if let Some(ends) = by_node.get(&node.id) {
                flat.extend_from_slice(ends);
            }
            offsets.push(flat.len());
        }

        Adjacency {
            offsets,
            ends: flat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;

    #[test]
    fn builder_assigns_dense_ids() {
        let mut builder = NetworkBuilder::new();
        let a = builder.add_node("A");
        let b = builder.add_node("B");
        let p = builder.add_edge("P", a, b, PipeSpec::default());
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(p.index(), 0);
    }

    #[test]
    fn adjacency_lists_both_ends() {
        let mut builder = NetworkBuilder::new();
        let a = builder.add_node("A");
        let b = builder.add_node("B");
        let c = builder.add_node("C");
        let p1 = builder.add_edge("P1", a, b, PipeSpec::default());
        let p2 = builder.add_edge("P2", b, c, PipeSpec::default());
        let net = builder.build().unwrap();

        assert_eq!(net.node_ends(a).len(), 1);
        assert_eq!(
            net.node_ends(b),
            &[
                EdgeEnd {
                    edge: p1,
                    side: EndSide::Target
                },
                EdgeEnd {
                    edge: p2,
                    side: EndSide::Source
                },
            ]
        );
        assert_eq!(net.node_ends(c)[0].side, EndSide::Target);
    }

    #[test]
    fn isolated_node_has_no_ends() {
        let mut builder = NetworkBuilder::new();
        let a = builder.add_node("A");
        let net = builder.build().unwrap();
        assert!(net.node_ends(a).is_empty());
    }

    #[test]
    fn duplicate_node_key_rejected() {
        let mut builder = NetworkBuilder::new();
        builder.add_node("A");
        builder.add_node("A");
        assert!(matches!(
            builder.build(),
            Err(NetworkError::DuplicateKey { what: "node", .. })
        ));
    }

    #[test]
    fn key_lookup() {
        let mut builder = NetworkBuilder::new();
        let a = builder.add_node("A");
        let b = builder.add_node("B");
        let p = builder.add_edge("P", a, b, PipeSpec::default());
        let net = builder.build().unwrap();
        assert_eq!(net.node_id("B").unwrap(), b);
        assert_eq!(net.edge_id("P").unwrap(), p);
        assert!(net.node_id("Z").is_err());
    }
}
