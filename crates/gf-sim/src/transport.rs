//! One explicit 1 s transport step over the whole network.
//!
//! Order within a tick: node balance, edge transport, end velocities.
//! Disabled edges are skipped by every phase and keep their state.

use gf_core::units::constants::celsius_to_kelvin;
use gf_flow::{Correlation, FlowParams, flow_rate};
use gf_fluids::QuickZ;
use gf_network::discretize::flow_length;
use gf_network::{Edge, Network, PipeSegment};
use tracing::debug;

use crate::config::SimConfig;

/// Standard volume [std m³] held by `capacity` m³ at `pressure_mpa`.
///
/// V = cap·(P/Pb)·(Tb/T)/Z. Degenerate inputs give 0.
pub fn volume_at_pressure(
    capacity: f64,
    pressure_mpa: f64,
    temperature_k: f64,
    z: f64,
    config: &SimConfig,
) -> f64 {
    if capacity <= 0.0 || temperature_k <= 0.0 || z <= 0.0 {
        return 0.0;
    }
    capacity * (pressure_mpa / config.base_pressure_mpa) * (config.base_temperature_k / temperature_k)
        / z
}

/// Pressure [MPa] of `volume` std m³ stored in `capacity` m³. Inverse of
/// [`volume_at_pressure`]; zero capacity gives 0.
pub fn pressure_at_volume(
    capacity: f64,
    volume: f64,
    temperature_k: f64,
    z: f64,
    config: &SimConfig,
) -> f64 {
    if capacity <= 0.0 {
        return 0.0;
    }
    volume * (config.base_pressure_mpa / capacity) * (temperature_k / config.base_temperature_k) * z
}

/// Actual gas velocity [m/s] for a standard flow through `area` m².
pub fn velocity(
    flow_std: f64,
    pressure_mpa: f64,
    z: f64,
    temperature_k: f64,
    area: f64,
    config: &SimConfig,
) -> f64 {
    let m = config.molar_mass_kg_mol;
    let r = config.gas_constant;
    let rho_std = config.base_pressure_mpa * 1000.0 * m / (r * config.base_temperature_k);
    let rho = pressure_mpa * 1000.0 * m / (z * r * temperature_k);
    if !(rho.is_finite() && rho > 0.0) || area <= 0.0 {
        return 0.0;
    }
    flow_std * rho_std / rho / area
}

/// Advance the network by one second with default constants.
pub fn advance(network: &mut Network, quick_z: &QuickZ) {
    advance_with(network, quick_z, &SimConfig::default());
}

/// Advance the network by one second.
pub fn advance_with(network: &mut Network, quick_z: &QuickZ, config: &SimConfig) {
    balance_nodes(network, config);
    transport_edges(network, quick_z, config);
    update_velocities(network, config);
}

/// Redistribute gas across the boundary segments meeting at each node.
///
/// A pressure-fixed node imposes its pressure on its boundary segments. Any
/// other node adds its injection to the gas already there and settles on the
/// common pressure that holds that total.
pub fn balance_nodes(network: &mut Network, config: &SimConfig) {
    let (nodes, edges, adjacency) = network.split_mut();
    let mut fixed = 0_usize;
    let mut held = 0.0;

    for node in nodes.iter_mut() {
        let boundary: Vec<(usize, usize)> = adjacency
            .ends(node.id)
            .iter()
            .filter_map(|end| {
                let edge = edges.get(end.edge.slot())?;
                (!edge.disabled).then_some((end.edge.slot(), edge.boundary_index(end.side)))
            })
            .collect();

        let cell = |&(e, s): &(usize, usize)| {
            let edge = &edges[e];
            let seg = &edge.segments()[s];
            (
                seg.capacity,
                celsius_to_kelvin(edge.temperature_c),
                seg.z_or(config.default_z),
                seg.volume,
            )
        };

        let mut total = if node.pressure_fixed {
            fixed += 1;
            let at_pressure: f64 = boundary
                .iter()
                .map(&cell)
                .map(|(cap, tk, z, _)| volume_at_pressure(cap, node.pressure, tk, z, config))
                .sum();
            at_pressure + node.injection
        } else {
            let existing: f64 = boundary.iter().map(&cell).map(|(.., v)| v).sum();
            let total = (existing + node.injection).max(0.0);
            let weight: f64 = boundary
                .iter()
                .map(&cell)
                .filter(|&(cap, tk, z, _)| cap > 0.0 && tk > 0.0 && z > 0.0)
                .map(|(cap, tk, z, _)| cap / (tk * z))
                .sum();
            node.pressure = if weight > 0.0 {
                total * config.base_pressure_mpa / (config.base_temperature_k * weight)
            } else {
                0.0
            };
            total
        };
        total = total.max(0.0);

        let pressure = node.pressure;
        for &(e, s) in &boundary {
            let tk = celsius_to_kelvin(edges[e].temperature_c);
            let seg = &mut edges[e].segments_mut()[s];
            let z = seg.z_or(config.default_z);
            seg.volume = volume_at_pressure(seg.capacity, pressure, tk, z, config).max(0.0);
        }

        node.volume = total;
        let slots = node.volume_slots.len();
        if slots > 0 {
            let share = total / slots as f64;
            node.volume_slots.iter_mut().for_each(|v| *v = share);
        }
        held += total;
    }

    debug!(nodes = nodes.len(), fixed, held, "node balance");
}

/// Move gas between adjacent segments of every enabled edge.
pub fn transport_edges(network: &mut Network, quick_z: &QuickZ, config: &SimConfig) {
    for edge in network.edges_mut().iter_mut().filter(|e| !e.disabled) {
        transport_edge(edge, quick_z, config);
    }
}

fn transport_edge(edge: &mut Edge, quick_z: &QuickZ, config: &SimConfig) {
    let temperature_c = edge.temperature_c;
    let tk = celsius_to_kelvin(temperature_c);
    let z_fit = quick_z.at_temperature(temperature_c);

    for seg in edge.segments_mut() {
        let first_guess = pressure_at_volume(seg.capacity, seg.volume, tk, config.default_z, config);
        seg.z = z_fit.z(first_guess);
        seg.pressure = pressure_at_volume(seg.capacity, seg.volume, tk, seg.z, config);
    }

    let n = edge.segment_count();
    let correlation = Correlation::panhandle_for_diameter(edge.diameter_mm());
    let template = FlowParams {
        efficiency: edge.efficiency,
        base_temperature_c: config.flow_base_temperature_c,
        base_pressure_kpa: config.flow_base_pressure_kpa,
        p1_kpa: 0.0,
        p2_kpa: 0.0,
        gravity: config.gravity,
        flowing_temperature_c: temperature_c,
        length_km: flow_length(n, edge.length_km()),
        diameter_mm: edge.diameter_mm(),
        z: config.default_z,
        h1_m: 0.0,
        h2_m: 0.0,
    };

    let (segments, flows) = edge.segments_and_flows_mut();
    for (k, previous) in flows.iter_mut().enumerate() {
        let (head, tail) = segments.split_at_mut(k + 1);
        let (Some(up), Some(down)) = (head.last_mut(), tail.first_mut()) else {
            break;
        };
        *previous = exchange(up, down, *previous, &correlation, &template, config);
    }
}

/// Relaxed, volume-limited flow from `up` to `down`; commits it and returns it.
fn exchange(
    up: &mut PipeSegment,
    down: &mut PipeSegment,
    previous: f64,
    correlation: &Correlation,
    template: &FlowParams,
    config: &SimConfig,
) -> f64 {
    let params = FlowParams {
        p1_kpa: up.pressure * 1000.0,
        p2_kpa: down.pressure * 1000.0,
        z: (up.z + down.z) / 2.0,
        ..*template
    };
    let fresh = flow_rate(correlation, &params);
    let relaxed = config.smoothing * fresh + (1.0 - config.smoothing) * previous;

    let mut actual = if relaxed >= 0.0 {
        relaxed.min(up.volume)
    } else {
        -(-relaxed).min(down.volume)
    };
    if actual.abs() < config.min_flow {
        actual = 0.0;
    }

    up.volume -= actual;
    down.volume += actual;
    actual
}

/// Recompute end velocities of every enabled edge.
pub fn update_velocities(network: &mut Network, config: &SimConfig) {
    for edge in network.edges_mut().iter_mut().filter(|e| !e.disabled) {
        let (v1, v2) = end_velocities(edge, config);
        edge.v1 = v1;
        edge.v2 = v2;
    }
}

fn end_velocities(edge: &Edge, config: &SimConfig) -> (f64, f64) {
    let area = edge.area();
    let segments = edge.segments();
    let flows = edge.flows();
    let (Some(&q1), Some(&q2), Some(first), Some(last)) =
        (flows.first(), flows.last(), segments.first(), segments.last())
    else {
        return (0.0, 0.0);
    };
    if area <= 0.0 || segments.len() < 2 {
        return (0.0, 0.0);
    }
    let tk = celsius_to_kelvin(edge.temperature_c);
    (
        velocity(q1, first.pressure, first.z, tk, area, config),
        velocity(q2, last.pressure, last.z, tk, area, config),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use gf_core::nearly_equal;
    use gf_core::numeric::Tolerances;
    use gf_network::{NetworkBuilder, PipeSpec};

    fn two_node_line(length_km: f64) -> Network {
        let mut builder = NetworkBuilder::new();
        let a = builder.add_node("A");
        let b = builder.add_node("B");
        builder.add_edge("A-B", a, b, PipeSpec::new(length_km, 500.0));
        builder.build().unwrap()
    }

    fn fill(network: &mut Network, pressures_mpa: &[f64]) {
        let config = SimConfig::default();
        let edge = &mut network.edges_mut()[0];
        let tk = celsius_to_kelvin(edge.temperature_c);
        for (seg, &p) in edge.segments_mut().iter_mut().zip(pressures_mpa) {
            seg.volume = volume_at_pressure(seg.capacity, p, tk, config.default_z, &config);
        }
    }

    #[test]
    fn volume_and_pressure_are_inverse() {
        let config = SimConfig::default();
        let v = volume_at_pressure(1000.0, 5.0, 288.15, 0.9, &config);
        let p = pressure_at_volume(1000.0, v, 288.15, 0.9, &config);
        assert!(nearly_equal(p, 5.0, Tolerances::default()));
    }

    #[test]
    fn degenerate_capacity_contributes_nothing() {
        let config = SimConfig::default();
        assert_eq!(volume_at_pressure(0.0, 5.0, 288.15, 0.9, &config), 0.0);
        assert_eq!(pressure_at_volume(-1.0, 100.0, 288.15, 0.9, &config), 0.0);
    }

    #[test]
    fn fixed_node_sets_boundary_volume() {
        let config = SimConfig::default();
        let mut net = two_node_line(40.0);
        let a = net.node_id("A").unwrap();
        net.node_mut(a).unwrap().fix_pressure(5.0);

        balance_nodes(&mut net, &config);

        let seg = &net.edges()[0].segments()[0];
        let expected = volume_at_pressure(seg.capacity, 5.0, 288.15, 0.85, &config);
        assert!(nearly_equal(seg.volume, expected, Tolerances::default()));
        assert_eq!(net.node(a).unwrap().pressure, 5.0);
    }

    #[test]
    fn unfixed_node_takes_injection() {
        let config = SimConfig::default();
        let mut net = two_node_line(40.0);
        let b = net.node_id("B").unwrap();
        net.node_mut(b).unwrap().set_injection(500.0);
        net.node_mut(b).unwrap().resize_volume_slots(4);

        balance_nodes(&mut net, &config);

        let edge = &net.edges()[0];
        assert!((edge.segments()[2].volume - 500.0).abs() < 1e-9);
        let node = net.node(b).unwrap();
        assert!(node.pressure > 0.0);
        assert_eq!(node.volume_slots, vec![125.0; 4]);
    }

    #[test]
    fn offtake_cannot_go_negative() {
        let config = SimConfig::default();
        let mut net = two_node_line(40.0);
        let b = net.node_id("B").unwrap();
        net.node_mut(b).unwrap().set_injection(-500.0);

        balance_nodes(&mut net, &config);

        assert_eq!(net.node(b).unwrap().volume, 0.0);
        assert!(net.edges()[0].segments().iter().all(|s| s.volume >= 0.0));
    }

    #[test]
    fn offtake_beyond_stock_leaves_zero_pressure() {
        let config = SimConfig::default();
        let mut net = two_node_line(40.0);
        let b = net.node_id("B").unwrap();
        net.node_mut(b).unwrap().set_injection(-500.0);

        balance_nodes(&mut net, &config);

        let node = net.node(b).unwrap();
        assert_eq!(node.volume, 0.0);
        assert!(node.pressure >= 0.0, "pressure {}", node.pressure);
        assert_eq!(node.pressure, 0.0);
    }

    /// Unrelaxed flow between segments `k` and `k + 1`, from the pressures and
    /// Z values the transport step left on them.
    fn fresh_flow(edge: &Edge, k: usize, config: &SimConfig) -> f64 {
        let (up, down) = (&edge.segments()[k], &edge.segments()[k + 1]);
        let params = FlowParams {
            efficiency: edge.efficiency,
            base_temperature_c: config.flow_base_temperature_c,
            base_pressure_kpa: config.flow_base_pressure_kpa,
            p1_kpa: up.pressure * 1000.0,
            p2_kpa: down.pressure * 1000.0,
            gravity: config.gravity,
            flowing_temperature_c: edge.temperature_c,
            length_km: flow_length(edge.segment_count(), edge.length_km()),
            diameter_mm: edge.diameter_mm(),
            z: (up.z + down.z) / 2.0,
            h1_m: 0.0,
            h2_m: 0.0,
        };
        flow_rate(&Correlation::panhandle_for_diameter(edge.diameter_mm()), &params)
    }

    #[test]
    fn committed_flow_blends_fresh_and_previous() {
        let config = SimConfig::default();
        let mut net = two_node_line(40.0);
        fill(&mut net, &[5.0, 5.0, 3.0]);
        net.edges_mut()[0].flows_mut().copy_from_slice(&[40.0, 100.0]);

        transport_edges(&mut net, &QuickZ::default(), &config);

        let edge = &net.edges()[0];
        for (k, previous) in [40.0, 100.0].into_iter().enumerate() {
            let expected = 0.2 * fresh_flow(edge, k, &config) + 0.8 * previous;
            assert!(
                (edge.flows()[k] - expected).abs() < 1e-9,
                "flow {k}: {} vs {expected}",
                edge.flows()[k]
            );
        }
        assert!(edge.flows()[1] > 80.0);
    }

    #[test]
    fn large_line_uses_panhandle_b() {
        let config = SimConfig {
            smoothing: 1.0,
            ..SimConfig::default()
        };
        let mut builder = NetworkBuilder::new();
        let a = builder.add_node("A");
        let b = builder.add_node("B");
        builder.add_edge("A-B", a, b, PipeSpec::new(40.0, 1000.0));
        let mut net = builder.build().unwrap();
        fill(&mut net, &[7.0, 6.0, 5.0]);

        transport_edges(&mut net, &QuickZ::default(), &config);

        let edge = &net.edges()[0];
        let expected = fresh_flow(edge, 0, &config);
        assert_eq!(
            Correlation::panhandle_for_diameter(edge.diameter_mm()),
            Correlation::PanhandleB
        );
        assert!((edge.flows()[0] - expected).abs() < 1e-9 * expected);

        let (up, down) = (&edge.segments()[0], &edge.segments()[1]);
        let as_a = FlowParams {
            p1_kpa: up.pressure * 1000.0,
            p2_kpa: down.pressure * 1000.0,
            gravity: config.gravity,
            flowing_temperature_c: edge.temperature_c,
            length_km: flow_length(edge.segment_count(), edge.length_km()),
            diameter_mm: edge.diameter_mm(),
            efficiency: edge.efficiency,
            base_temperature_c: config.flow_base_temperature_c,
            base_pressure_kpa: config.flow_base_pressure_kpa,
            z: (up.z + down.z) / 2.0,
            h1_m: 0.0,
            h2_m: 0.0,
        };
        let panhandle_a = flow_rate(&Correlation::PanhandleA, &as_a);
        assert!((edge.flows()[0] - panhandle_a).abs() > 1e-6 * expected);
    }

    #[test]
    fn elevations_do_not_enter_transport() {
        let config = SimConfig::default();
        let mut level = two_node_line(40.0);
        fill(&mut level, &[6.0, 5.0, 4.0]);
        let mut hilly = level.clone();
        hilly.edges_mut()[0].h2_m = 800.0;

        transport_edges(&mut level, &QuickZ::default(), &config);
        transport_edges(&mut hilly, &QuickZ::default(), &config);

        assert_eq!(level.edges()[0].flows(), hilly.edges()[0].flows());
    }

    #[test]
    fn gas_moves_from_high_to_low_pressure() {
        let config = SimConfig::default();
        let mut net = two_node_line(40.0);
        fill(&mut net, &[5.0, 5.0, 3.0]);
        let before = net.edges()[0].segments()[2].volume;

        transport_edges(&mut net, &QuickZ::default(), &config);

        let edge = &net.edges()[0];
        assert!(edge.flows()[1] > 0.0);
        assert!(edge.segments()[2].volume > before);
        assert!(edge.segments().iter().all(|s| s.z > 0.5 && s.z < 1.0));
    }

    #[test]
    fn small_flows_are_dropped() {
        let config = SimConfig {
            min_flow: 1e12,
            ..SimConfig::default()
        };
        let mut net = two_node_line(40.0);
        fill(&mut net, &[5.0, 4.0, 3.0]);
        let before = net.stored_volume();

        transport_edges(&mut net, &QuickZ::default(), &config);

        assert!(net.edges()[0].flows().iter().all(|q| *q == 0.0));
        assert_eq!(net.stored_volume(), before);
    }

    #[test]
    fn flow_is_limited_by_upstream_volume() {
        let config = SimConfig {
            smoothing: 1.0,
            ..SimConfig::default()
        };
        let mut net = two_node_line(40.0);
        {
            let edge = &mut net.edges_mut()[0];
            edge.segments_mut()[0].volume = 0.5;
            edge.segments_mut()[1].volume = 0.0;
        }
        transport_edges(&mut net, &QuickZ::default(), &config);

        let edge = &net.edges()[0];
        assert!(edge.flows()[0] <= 0.5);
        assert!(edge.segments().iter().all(|s| s.volume >= 0.0));
    }

    #[test]
    fn disabled_edge_is_frozen() {
        let mut net = two_node_line(40.0);
        fill(&mut net, &[6.0, 4.0, 2.0]);
        net.edges_mut()[0].disabled = true;
        let a = net.node_id("A").unwrap();
        net.node_mut(a).unwrap().fix_pressure(8.0);
        let before = net.edges()[0].clone();

        for _ in 0..10 {
            advance(&mut net, &QuickZ::default());
        }

        assert_eq!(net.edges()[0], before);
    }

    #[test]
    fn one_tick_conserves_gas_on_isolated_line() {
        let mut net = two_node_line(130.0);
        let n = net.edges()[0].segment_count();
        let pressures: Vec<f64> = (0..n).map(|i| 7.0 - 0.3 * i as f64).collect();
        fill(&mut net, &pressures);
        let initial = net.stored_volume();

        advance(&mut net, &QuickZ::default());

        let rel = (net.stored_volume() - initial).abs() / initial;
        assert!(rel < 1e-6, "relative drift {rel}");
        assert!(net.edges()[0].flows().iter().any(|q| *q > 0.0));
    }

    #[test]
    fn closed_network_conserves_gas() {
        let mut builder = NetworkBuilder::new();
        let a = builder.add_node("A");
        let b = builder.add_node("B");
        let c = builder.add_node("C");
        builder.add_edge("A-B", a, b, PipeSpec::new(40.0, 500.0));
        builder.add_edge("B-C", b, c, PipeSpec::new(80.0, 700.0));
        let mut net = builder.build().unwrap();
        fill(&mut net, &[7.0, 6.0, 5.0]);
        let initial = net.stored_volume();

        for _ in 0..500 {
            advance(&mut net, &QuickZ::default());
        }

        let rel = (net.stored_volume() - initial).abs() / initial;
        assert!(rel < 1e-6, "relative drift {rel}");
    }

    #[test]
    fn velocities_follow_flow() {
        let config = SimConfig::default();
        let mut net = two_node_line(40.0);
        fill(&mut net, &[5.0, 4.0, 3.0]);

        transport_edges(&mut net, &QuickZ::default(), &config);
        update_velocities(&mut net, &config);

        let edge = &net.edges()[0];
        assert!(edge.v1 > 0.0);
        assert!(edge.v2 > 0.0);
        // Lower pressure at the far end means faster gas.
        assert!(edge.v2 / edge.flows()[1] > edge.v1 / edge.flows()[0]);
    }

    #[test]
    fn empty_pipe_has_zero_velocity() {
        let config = SimConfig::default();
        let mut net = two_node_line(40.0);
        advance_with(&mut net, &QuickZ::default(), &config);
        assert_eq!(net.edges()[0].v1, 0.0);
        assert_eq!(net.edges()[0].v2, 0.0);
    }
}
