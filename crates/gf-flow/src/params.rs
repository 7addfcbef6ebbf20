//! Inputs shared by every flow correlation.

use gf_core::units::constants::ATMOSPHERE_BAR;

/// Convert gauge pressure [barg] to absolute [bar].
pub fn barg_to_bara(p_barg: f64) -> f64 {
    p_barg + ATMOSPHERE_BAR
}

/// Convert absolute pressure [bar] to gauge [barg].
pub fn bara_to_barg(p_bara: f64) -> f64 {
    p_bara - ATMOSPHERE_BAR
}

/// Steady-flow inputs for one pipe (or one pair of adjacent segments).
///
/// Units follow pipeline practice: kPa (absolute), °C, km, mm, m.
/// The correlations do not validate physical ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowParams {
    /// Pipeline efficiency E.
    pub efficiency: f64,
    /// Base temperature Tb [°C].
    pub base_temperature_c: f64,
    /// Base pressure Pb [kPa].
    pub base_pressure_kpa: f64,
    /// Pressure at end 1 [kPa].
    pub p1_kpa: f64,
    /// Pressure at end 2 [kPa].
    pub p2_kpa: f64,
    /// Gas gravity G (air = 1).
    pub gravity: f64,
    /// Flowing temperature Tf [°C].
    pub flowing_temperature_c: f64,
    /// Pipe length [km].
    pub length_km: f64,
    /// Inside diameter [mm].
    pub diameter_mm: f64,
    /// Compressibility factor.
    pub z: f64,
    /// Elevation at end 1 [m].
    pub h1_m: f64,
    /// Elevation at end 2 [m].
    pub h2_m: f64,
}

impl Default for FlowParams {
    fn default() -> Self {
        Self {
            efficiency: 0.95,
            base_temperature_c: 20.0,
            base_pressure_kpa: 101.325,
            p1_kpa: barg_to_bara(50.0) * 100.0,
            p2_kpa: barg_to_bara(20.0) * 100.0,
            gravity: 0.60,
            flowing_temperature_c: 15.0,
            length_km: 100.0,
            diameter_mm: 500.0,
            z: 0.9,
            h1_m: 0.0,
            h2_m: 0.0,
        }
    }
}

impl FlowParams {
    /// Same pipe seen from the other end: pressures and elevations swap together.
    pub fn reversed(&self) -> Self {
        Self {
            p1_kpa: self.p2_kpa,
            p2_kpa: self.p1_kpa,
            h1_m: self.h2_m,
            h2_m: self.h1_m,
            ..*self
        }
    }
}
