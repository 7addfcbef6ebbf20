//! Pipeline network data structures.

use std::collections::HashMap;

use gf_core::{EdgeId, NodeId};
use tracing::warn;

use crate::discretize::{segment_capacity, segment_count, segment_length};
use crate::error::{NetworkError, NetworkResult};

/// Z assumed for a segment whose compressibility has not been computed yet.
pub const DEFAULT_SEGMENT_Z: f64 = 0.85;

/// One storage cell of a pipe.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeSegment {
    pub index: usize,
    /// Effective length [km].
    pub length_km: f64,
    /// Geometric volume [m³].
    pub capacity: f64,
    /// Stored gas [std m³].
    pub volume: f64,
    /// [MPa]
    pub pressure: f64,
    pub z: f64,
}

impl PipeSegment {
    fn empty(index: usize, length_km: f64, diameter_mm: f64) -> Self {
        Self {
            index,
            length_km,
            capacity: segment_capacity(diameter_mm, length_km),
            volume: 0.0,
            pressure: 0.0,
            z: DEFAULT_SEGMENT_Z,
        }
    }

    /// Z to use for this segment, falling back to `default` when unset.
    pub fn z_or(&self, default: f64) -> f64 {
        if self.z.is_finite() && self.z != 0.0 {
            self.z
        } else {
            default
        }
    }

    fn clear(&mut self) {
        self.volume = 0.0;
        self.pressure = 0.0;
        self.z = DEFAULT_SEGMENT_Z;
    }
}

/// A junction between pipes.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub key: String,
    /// Net injection [std m³/s]; negative values are offtakes.
    pub injection: f64,
    /// When set, `pressure` is an input and boundary volumes follow from it.
    pub pressure_fixed: bool,
    /// [MPa]
    pub pressure: f64,
    /// Total gas held in the boundary segments after the last balance [std m³].
    pub volume: f64,
    /// Display copies of `volume` split evenly; not part of the balance.
    pub volume_slots: Vec<f64>,
}

impl Node {
    pub fn new(id: NodeId, key: impl Into<String>) -> Self {
        Self {
            id,
            key: key.into(),
            injection: 0.0,
            pressure_fixed: false,
            pressure: 0.0,
            volume: 0.0,
            volume_slots: Vec::new(),
        }
    }

    pub fn set_injection(&mut self, injection: f64) {
        self.injection = injection;
    }

    /// Pin the node to `pressure_mpa`.
    pub fn fix_pressure(&mut self, pressure_mpa: f64) {
        self.pressure = pressure_mpa;
        self.pressure_fixed = true;
    }

    pub fn resize_volume_slots(&mut self, count: usize) {
        self.volume_slots = vec![0.0; count];
    }
}

/// Which end of an edge touches a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndSide {
    /// First segment.
    Source,
    /// Last segment.
    Target,
}

/// An edge end incident to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeEnd {
    pub edge: EdgeId,
    pub side: EndSide,
}

/// Pipe parameters supplied when an edge is added.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeSpec {
    pub length_km: f64,
    pub diameter_mm: f64,
    pub efficiency: f64,
    pub temperature_c: f64,
    pub h1_m: f64,
    pub h2_m: f64,
    pub disabled: bool,
}

impl PipeSpec {
    pub fn new(length_km: f64, diameter_mm: f64) -> Self {
        Self {
            length_km,
            diameter_mm,
            ..Self::default()
        }
    }
}

impl Default for PipeSpec {
    fn default() -> Self {
        Self {
            length_km: 100.0,
            diameter_mm: 500.0,
            efficiency: 0.95,
            temperature_c: 15.0,
            h1_m: 0.0,
            h2_m: 0.0,
            disabled: false,
        }
    }
}

/// A pipe between two nodes, discretized into segments.
///
/// Geometry is private: changing it goes through [`Edge::set_geometry`] so the
/// segment layout always matches the length.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub key: String,
    pub source: NodeId,
    pub target: NodeId,
    length_km: f64,
    diameter_mm: f64,
    pub efficiency: f64,
    pub temperature_c: f64,
    /// Source-end elevation [m]. Stored and saved only; transport treats
    /// every pipe as level.
    pub h1_m: f64,
    /// Target-end elevation [m]. Same as `h1_m`.
    pub h2_m: f64,
    pub disabled: bool,
    segments: Vec<PipeSegment>,
    /// Standard flow between adjacent segments [std m³/s]; positive towards the target.
    flows: Vec<f64>,
    /// Gas velocity at the source end [m/s].
    pub v1: f64,
    /// Gas velocity at the target end [m/s].
    pub v2: f64,
}

impl Edge {
    pub(crate) fn new(
        id: EdgeId,
        key: String,
        source: NodeId,
        target: NodeId,
        spec: &PipeSpec,
    ) -> Self {
        let mut edge = Self {
            id,
            key,
            source,
            target,
            length_km: spec.length_km,
            diameter_mm: spec.diameter_mm,
            efficiency: spec.efficiency,
            temperature_c: spec.temperature_c,
            h1_m: spec.h1_m,
            h2_m: spec.h2_m,
            disabled: spec.disabled,
            segments: Vec::new(),
            flows: Vec::new(),
            v1: 0.0,
            v2: 0.0,
        };
        edge.layout(segment_count(spec.length_km));
        edge
    }

    /// [km]
    pub fn length_km(&self) -> f64 {
        self.length_km
    }

    /// [mm]
    pub fn diameter_mm(&self) -> f64 {
        self.diameter_mm
    }

    /// Cross-section area [m²].
    pub fn area(&self) -> f64 {
        let d_m = self.diameter_mm / 1000.0;
        crate::discretize::PI_GEOMETRY * d_m * d_m / 4.0
    }

    pub fn segments(&self) -> &[PipeSegment] {
        &self.segments
    }

    pub fn segments_mut(&mut self) -> &mut [PipeSegment] {
        &mut self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn flows(&self) -> &[f64] {
        &self.flows
    }

    pub fn flows_mut(&mut self) -> &mut [f64] {
        &mut self.flows
    }

    /// Segments and inter-segment flows, borrowed together.
    pub fn segments_and_flows_mut(&mut self) -> (&mut [PipeSegment], &mut [f64]) {
        (&mut self.segments, &mut self.flows)
    }

    /// Segment index touching the node at `side`.
    pub fn boundary_index(&self, side: EndSide) -> usize {
        match side {
            EndSide::Source => 0,
            EndSide::Target => self.segments.len().saturating_sub(1),
        }
    }

    /// Gas stored in all segments [std m³].
    pub fn stored_volume(&self) -> f64 {
        self.segments.iter().map(|s| s.volume).sum()
    }

    /// Change length and/or diameter.
    ///
    /// Any actual change re-lays the segments and discards their state.
    pub fn set_geometry(&mut self, length_km: f64, diameter_mm: f64) -> NetworkResult<()> {
        if !length_km.is_finite() {
            return Err(NetworkError::NonFinite {
                what: "length",
                edge: self.key.clone(),
            });
        }
        if !diameter_mm.is_finite() {
            return Err(NetworkError::NonFinite {
                what: "diameter",
                edge: self.key.clone(),
            });
        }
        if length_km == self.length_km && diameter_mm == self.diameter_mm {
            return Ok(());
        }
        self.length_km = length_km;
        self.diameter_mm = diameter_mm;
        self.resize_segments(segment_count(length_km))
    }

    /// Re-lay the pipe as `count` segments, zeroing volumes, pressures and
    /// flows and setting Z back to the default.
    ///
    /// `count` must equal [`segment_count`] of the current length.
    pub fn resize_segments(&mut self, count: usize) -> NetworkResult<()> {
        let expected = segment_count(self.length_km);
        if count != expected {
            return Err(NetworkError::InvalidSegmentCount {
                edge: self.key.clone(),
                count,
                expected,
            });
        }
        let discarded = self.stored_volume();
        warn!(
            edge = %self.key,
            from = self.segments.len(),
            to = count,
            discarded,
            "pipe re-segmented; segment state reset"
        );
        self.layout(count);
        Ok(())
    }

    /// Zero all transient state, keeping the layout.
    pub fn reset_state(&mut self) {
        self.segments.iter_mut().for_each(PipeSegment::clear);
        self.flows.iter_mut().for_each(|q| *q = 0.0);
        self.v1 = 0.0;
        self.v2 = 0.0;
    }

    fn layout(&mut self, count: usize) {
        self.segments = (0..count)
            .map(|i| {
                PipeSegment::empty(
                    i,
                    segment_length(i, count, self.length_km),
                    self.diameter_mm,
                )
            })
            .collect();
        self.flows = vec![0.0; count.saturating_sub(1)];
        self.v1 = 0.0;
        self.v2 = 0.0;
    }
}

/// Node → incident edge ends, as offsets into a flat list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Adjacency {
    /// Node i's ends are `ends[offsets[i]..offsets[i+1]]`.
    pub(crate) offsets: Vec<usize>,
    /// Sorted by node, then edge, for determinism.
    pub(crate) ends: Vec<EdgeEnd>,
}

impl Adjacency {
    /// Edge ends incident to `node` (empty if unknown).
    pub fn ends(&self, node: NodeId) -> &[EdgeEnd] {
        let idx = node.slot();
        if idx + 1 >= self.offsets.len() {
            return &[];
        }
        &self.ends[self.offsets[idx]..self.offsets[idx + 1]]
    }
}

/// The validated network. Nodes and edges can be edited in place but never
/// added or removed.
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) adjacency: Adjacency,
    pub(crate) node_keys: HashMap<String, NodeId>,
    pub(crate) edge_keys: HashMap<String, EdgeId>,
}

impl Network {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn edges_mut(&mut self) -> &mut [Edge] {
        &mut self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.slot())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.slot())
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.slot())
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(id.slot())
    }

    /// Edge ends incident to `node`.
    pub fn node_ends(&self, node: NodeId) -> &[EdgeEnd] {
        self.adjacency.ends(node)
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    /// Borrow nodes and edges mutably together with the read-only adjacency.
    pub fn split_mut(&mut self) -> (&mut [Node], &mut [Edge], &Adjacency) {
        (&mut self.nodes, &mut self.edges, &self.adjacency)
    }

    pub fn node_id(&self, key: &str) -> NetworkResult<NodeId> {
        self.node_keys
            .get(key)
            .copied()
            .ok_or_else(|| NetworkError::KeyNotFound {
                what: "node",
                key: key.to_string(),
            })
    }

    pub fn edge_id(&self, key: &str) -> NetworkResult<EdgeId> {
        self.edge_keys
            .get(key)
            .copied()
            .ok_or_else(|| NetworkError::KeyNotFound {
                what: "edge",
                key: key.to_string(),
            })
    }

    /// Gas stored in every segment of every edge [std m³].
    pub fn stored_volume(&self) -> f64 {
        self.edges.iter().map(Edge::stored_volume).sum()
    }

    /// All segment pressures, edge by edge.
    pub fn segment_pressures(&self) -> Vec<f64> {
        self.edges
            .iter()
            .flat_map(|e| e.segments.iter().map(|s| s.pressure))
            .collect()
    }

    /// Zero segment state, flows, velocities and node volumes. Node pressure,
    /// injection and the fixed flag are kept.
    pub fn reset_state(&mut self) {
        for edge in &mut self.edges {
            edge.reset_state();
        }
        for node in &mut self.nodes {
            node.volume = 0.0;
            node.volume_slots.iter_mut().for_each(|v| *v = 0.0);
        }
    }
}
