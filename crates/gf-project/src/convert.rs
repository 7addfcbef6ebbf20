//! Conversion between the exchange format and a live [`Network`].

use std::collections::HashMap;

use gf_network::{Edge, Network, NetworkBuilder, Node, PipeSpec};

use crate::schema::{EdgeDef, FORMAT_VERSION, NetworkDef, NodeDef};
use crate::validate::{ValidationError, validate_network};
use crate::ProjectResult;

impl NetworkDef {
    /// Validate and build a network, restoring any stored segment state.
    ///
    /// Absent state arrays leave the segments empty.
    pub fn to_network(&self) -> ProjectResult<Network> {
        validate_network(self)?;

        let mut builder = NetworkBuilder::new();
        let mut ids = HashMap::new();
        for node in &self.nodes {
            ids.insert(node.id.as_str(), builder.add_node(&node.id));
        }
        for edge in &self.edges {
            let lookup = |key: &str| {
                ids.get(key)
                    .copied()
                    .ok_or_else(|| ValidationError::MissingReference {
                        id: key.to_string(),
                        context: format!("edge {}", edge.id),
                    })
            };
            let source = lookup(&edge.source)?;
            let target = lookup(&edge.target)?;
            builder.add_edge(&edge.id, source, target, pipe_spec(edge));
        }

        let mut network = builder.build()?;
        for (def, node) in self.nodes.iter().zip(network.nodes_mut()) {
            restore_node(def, node);
        }
        for (def, edge) in self.edges.iter().zip(network.edges_mut()) {
            restore_edge(def, edge);
        }
        Ok(network)
    }

    /// Snapshot a network, including its segment state.
    pub fn from_network(network: &Network) -> Self {
        let key_of = |id| {
            network
                .node(id)
                .map(|n: &Node| n.key.clone())
                .unwrap_or_default()
        };
        Self {
            version: FORMAT_VERSION,
            name: String::new(),
            nodes: network.nodes().iter().map(snapshot_node).collect(),
            edges: network
                .edges()
                .iter()
                .map(|e| snapshot_edge(e, key_of(e.source), key_of(e.target)))
                .collect(),
        }
    }
}

fn pipe_spec(def: &EdgeDef) -> PipeSpec {
    PipeSpec {
        length_km: def.length,
        diameter_mm: def.diameter,
        efficiency: def.efficiency,
        temperature_c: def.temperature,
        h1_m: def.h1,
        h2_m: def.h2,
        disabled: def.disabled,
    }
}

fn restore_node(def: &NodeDef, node: &mut Node) {
    node.injection = def.injection;
    node.pressure = def.pressure;
    node.pressure_fixed = def.pressure_fixed;
    if let Some(slots) = &def.volume_segments {
        node.volume_slots = slots.clone();
        node.volume = slots.iter().sum();
    }
}

fn restore_edge(def: &EdgeDef, edge: &mut Edge) {
    let (segments, flows) = edge.segments_and_flows_mut();
    if let Some(volumes) = &def.volume_segments {
        for (seg, v) in segments.iter_mut().zip(volumes) {
            seg.volume = *v;
        }
    }
    if let Some(pressures) = &def.pressure_segments {
        for (seg, p) in segments.iter_mut().zip(pressures) {
            seg.pressure = *p;
        }
    }
    if let Some(zs) = &def.z_segments {
        for (seg, z) in segments.iter_mut().zip(zs) {
            seg.z = *z;
        }
    }
    if let Some(stored) = &def.flow_segments {
        for (q, s) in flows.iter_mut().zip(stored) {
            *q = *s;
        }
    }
}

fn snapshot_node(node: &Node) -> NodeDef {
    NodeDef {
        id: node.key.clone(),
        injection: node.injection,
        pressure: node.pressure,
        pressure_fixed: node.pressure_fixed,
        volume_segments: (!node.volume_slots.is_empty()).then(|| node.volume_slots.clone()),
    }
}

fn snapshot_edge(edge: &Edge, source: String, target: String) -> EdgeDef {
    let segments = edge.segments();
    EdgeDef {
        id: edge.key.clone(),
        source,
        target,
        length: edge.length_km(),
        diameter: edge.diameter_mm(),
        efficiency: edge.efficiency,
        temperature: edge.temperature_c,
        h1: edge.h1_m,
        h2: edge.h2_m,
        disabled: edge.disabled,
        volume_segments: Some(segments.iter().map(|s| s.volume).collect()),
        pressure_segments: Some(segments.iter().map(|s| s.pressure).collect()),
        flow_segments: Some(edge.flows().to_vec()),
        z_segments: Some(segments.iter().map(|s| s.z).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gf_network::DEFAULT_SEGMENT_Z;

    fn line() -> NetworkDef {
        let mut a = NodeDef::new("A");
        a.pressure = 5.0;
        a.pressure_fixed = true;
        let mut b = NodeDef::new("B");
        b.injection = -3.0;
        NetworkDef {
            version: FORMAT_VERSION,
            name: "line".to_string(),
            nodes: vec![a, b],
            edges: vec![EdgeDef::new("P", "A", "B", 40.0, 500.0)],
        }
    }

    #[test]
    fn missing_arrays_start_empty() {
        let net = line().to_network().unwrap();
        let edge = &net.edges()[0];
        assert_eq!(edge.segment_count(), 3);
        assert_eq!(edge.stored_volume(), 0.0);
        assert!(edge.segments().iter().all(|s| s.z == DEFAULT_SEGMENT_Z));
        let a = net.node_id("A").unwrap();
        assert!(net.node(a).unwrap().pressure_fixed);
    }

    #[test]
    fn stored_state_is_restored() {
        let mut def = line();
        def.edges[0].volume_segments = Some(vec![10.0, 20.0, 30.0]);
        def.edges[0].flow_segments = Some(vec![1.5, -0.5]);
        let net = def.to_network().unwrap();
        let edge = &net.edges()[0];
        assert_eq!(edge.stored_volume(), 60.0);
        assert_eq!(edge.flows(), &[1.5, -0.5]);
    }

    #[test]
    fn snapshot_round_trip() {
        let mut def = line();
        def.edges[0].volume_segments = Some(vec![10.0, 20.0, 30.0]);
        let net = def.to_network().unwrap();
        let snap = NetworkDef::from_network(&net);
        assert_eq!(snap.nodes, def.nodes);
        assert_eq!(snap.edges[0].volume_segments, def.edges[0].volume_segments);
        assert_eq!(snap.to_network().unwrap().stored_volume(), 60.0);
    }

    #[test]
    fn invalid_definition_is_not_built() {
        let mut def = line();
        def.edges[0].source = "Q".to_string();
        assert!(def.to_network().is_err());
    }
}
