//! Steady-state gas pipeline flow correlations.
//!
//! Every correlation maps two end pressures plus pipe and gas properties to a
//! signed standard-condition volumetric flow [m³/s]. Positive means end 1 → end 2.

use crate::common::{SECONDS_PER_DAY, elevation_parameter, equivalent_length, flow_direction};
use crate::params::FlowParams;
use gf_core::units::constants::{G0_MPS2, celsius_to_kelvin};

/// A steady-flow correlation.
///
/// Implementors only provide [`FlowCorrelation::forward_flow`] for the case
/// `p1 >= p2`; direction handling lives in the provided `flow_rate`.
pub trait FlowCorrelation: Send + Sync {
    fn name(&self) -> &'static str;

    /// Flow magnitude [m³/s] with end 1 as the high-pressure end.
    /// Returns 0 when the driving term is not positive.
    fn forward_flow(&self, params: &FlowParams) -> f64;

    /// Signed flow [m³/s]. Swapping the ends negates the result.
    fn flow_rate(&self, params: &FlowParams) -> f64 {
        let sign = flow_direction(params.p1_kpa, params.p2_kpa);
        if sign > 0.0 {
            self.forward_flow(params)
        } else if sign < 0.0 {
            -self.forward_flow(&params.reversed())
        } else {
            0.0
        }
    }
}

/// Constants of the general form
/// `Q = C·(Tb/Pb)^a·((P1² − eˢP2²)/(G^b·Tf·Le·Z))^c·D^d·E`  [m³/day].
#[derive(Debug, Clone, Copy, PartialEq)]
struct GeneralFlowEquation {
    coefficient: f64,
    base_exp: f64,
    gravity_exp: f64,
    drive_exp: f64,
    diameter_exp: f64,
}

impl GeneralFlowEquation {
    fn evaluate(&self, p: &FlowParams) -> f64 {
        let tb = celsius_to_kelvin(p.base_temperature_c);
        let tf = celsius_to_kelvin(p.flowing_temperature_c);
        let s = elevation_parameter(p.gravity, p.h1_m, p.h2_m, tf, p.z);
        let le = equivalent_length(p.length_km, s);

        let numerator = p.p1_kpa * p.p1_kpa - s.exp() * p.p2_kpa * p.p2_kpa;
        let drive = numerator / (p.gravity.powf(self.gravity_exp) * tf * le * p.z);
        if drive <= 0.0 {
            return 0.0;
        }

        let per_day = self.coefficient
            * (tb / p.base_pressure_kpa).powf(self.base_exp)
            * drive.powf(self.drive_exp)
            * p.diameter_mm.powf(self.diameter_exp)
            * p.efficiency;
        per_day / SECONDS_PER_DAY
    }
}

/// Weymouth equation: general purpose, conservative for large lines.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Weymouth;

impl Weymouth {
    const EQ: GeneralFlowEquation = GeneralFlowEquation {
        coefficient: 3.7435e-3,
        base_exp: 1.0,
        gravity_exp: 1.0,
        drive_exp: 0.5,
        diameter_exp: 2.667,
    };
}

impl FlowCorrelation for Weymouth {
    fn name(&self) -> &'static str {
        "weymouth"
    }

    fn forward_flow(&self, params: &FlowParams) -> f64 {
        Self::EQ.evaluate(params)
    }
}

/// Panhandle A: Reynolds 5–11 million, 12–60 in pipe.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PanhandleA;

impl PanhandleA {
    const EQ: GeneralFlowEquation = GeneralFlowEquation {
        coefficient: 4.5965e-3,
        base_exp: 1.0788,
        gravity_exp: 0.8539,
        drive_exp: 0.5394,
        diameter_exp: 2.6182,
    };
}

impl FlowCorrelation for PanhandleA {
    fn name(&self) -> &'static str {
        "panhandle-a"
    }

    fn forward_flow(&self, params: &FlowParams) -> f64 {
        Self::EQ.evaluate(params)
    }
}

/// Panhandle B: Reynolds 4–40 million, large diameter, high pressure.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PanhandleB;

impl PanhandleB {
    const EQ: GeneralFlowEquation = GeneralFlowEquation {
        coefficient: 1.002e-2,
        base_exp: 1.02,
        gravity_exp: 0.961,
        drive_exp: 0.51,
        diameter_exp: 2.53,
    };
}

impl FlowCorrelation for PanhandleB {
    fn name(&self) -> &'static str {
        "panhandle-b"
    }

    fn forward_flow(&self, params: &FlowParams) -> f64 {
        Self::EQ.evaluate(params)
    }
}

/// Darcy–Weisbach with a fixed friction factor and flowing density.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DarcyWeisbach {
    /// Darcy friction factor f.
    pub friction_factor: f64,
    /// Gas density at flowing conditions [kg/m³].
    pub density_kg_m3: f64,
}

impl DarcyWeisbach {
    pub fn new(friction_factor: f64, density_kg_m3: f64) -> Self {
        Self {
            friction_factor,
            density_kg_m3,
        }
    }
}

impl FlowCorrelation for DarcyWeisbach {
    fn name(&self) -> &'static str {
        "darcy-weisbach"
    }

    fn forward_flow(&self, p: &FlowParams) -> f64 {
        let tb = celsius_to_kelvin(p.base_temperature_c);
        let tf = celsius_to_kelvin(p.flowing_temperature_c);
        let d_m = p.diameter_mm / 1000.0;
        let l_m = p.length_km * 1000.0;
        let p1_pa = p.p1_kpa * 1000.0;
        let p2_pa = p.p2_kpa * 1000.0;
        let pb_pa = p.base_pressure_kpa * 1000.0;
        let rho = self.density_kg_m3;

        let dp_friction = p1_pa - p2_pa - rho * G0_MPS2 * (p.h2_m - p.h1_m);
        let radicand = 2.0 * dp_friction * d_m / (self.friction_factor * l_m * rho);
        if radicand <= 0.0 {
            return 0.0;
        }
        let velocity = radicand.sqrt();
        let area = std::f64::consts::PI * d_m * d_m / 4.0;
        let q_actual = velocity * area * p.efficiency;
        q_actual * (p1_pa / pb_pa) * (tb / tf) * p.z
    }
}

/// Closed set of correlations, for configuration and serialization.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Correlation {
    Weymouth,
    PanhandleA,
    PanhandleB,
    DarcyWeisbach(DarcyWeisbach),
}

impl Correlation {
    /// Panhandle B for large lines (D ≥ 1000 mm), Panhandle A otherwise.
    pub fn panhandle_for_diameter(diameter_mm: f64) -> Self {
        if diameter_mm >= 1000.0 {
            Correlation::PanhandleB
        } else {
            Correlation::PanhandleA
        }
    }

    fn as_dyn(&self) -> &dyn FlowCorrelation {
        match self {
            Correlation::Weymouth => &Weymouth,
            Correlation::PanhandleA => &PanhandleA,
            Correlation::PanhandleB => &PanhandleB,
            Correlation::DarcyWeisbach(dw) => dw,
        }
    }
}

impl FlowCorrelation for Correlation {
    fn name(&self) -> &'static str {
        self.as_dyn().name()
    }

    fn forward_flow(&self, params: &FlowParams) -> f64 {
        self.as_dyn().forward_flow(params)
    }
}

/// Signed standard-condition flow [m³/s] for `correlation` at `params`.
pub fn flow_rate(correlation: &Correlation, params: &FlowParams) -> f64 {
    correlation.flow_rate(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all() -> [Correlation; 4] {
        [
            Correlation::Weymouth,
            Correlation::PanhandleA,
            Correlation::PanhandleB,
            Correlation::DarcyWeisbach(DarcyWeisbach::new(0.01, 40.0)),
        ]
    }

    #[test]
    fn forward_flow_is_positive() {
        let p = FlowParams::default();
        for c in all() {
            assert!(flow_rate(&c, &p) > 0.0, "{}", c.name());
        }
    }

    #[test]
    fn equal_pressures_give_zero() {
        let p = FlowParams {
            p2_kpa: FlowParams::default().p1_kpa,
            ..FlowParams::default()
        };
        for c in all() {
            assert_eq!(flow_rate(&c, &p), 0.0);
        }
    }

    #[test]
    fn panhandle_b_reference_value() {
        // 500 mm, 100 km, 50/20 barg, G 0.6, Z 0.9: about 7.5 million m³/day.
        let q = flow_rate(&Correlation::PanhandleB, &FlowParams::default());
        let q_msm3d = q * SECONDS_PER_DAY / 1e6;
        assert!(q_msm3d > 5.0 && q_msm3d < 9.0, "Q = {q_msm3d}");
    }

    #[test]
    fn elevation_head_can_stall_flow() {
        let p = FlowParams {
            p1_kpa: 1000.0,
            p2_kpa: 999.0,
            h2_m: 5000.0,
            ..FlowParams::default()
        };
        for c in all() {
            let q = flow_rate(&c, &p);
            assert!(q.is_finite());
            assert_eq!(q, 0.0, "{}", c.name());
        }
    }

    #[test]
    fn diameter_selects_panhandle_variant() {
        assert_eq!(
            Correlation::panhandle_for_diameter(1000.0),
            Correlation::PanhandleB
        );
        assert_eq!(
            Correlation::panhandle_for_diameter(999.9),
            Correlation::PanhandleA
        );
    }

    #[test]
    fn larger_pipe_carries_more() {
        let small = FlowParams::default();
        let big = FlowParams {
            diameter_mm: 1000.0,
            ..small
        };
        for c in [Correlation::Weymouth, Correlation::PanhandleA] {
            assert!(flow_rate(&c, &big) > flow_rate(&c, &small));
        }
    }
}
