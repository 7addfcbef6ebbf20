//! Simulation constants.

use gf_core::units::constants::{STANDARD_PRESSURE_MPA, STANDARD_TEMPERATURE_K};
use gf_network::DEFAULT_SEGMENT_Z;

/// Tunables for the transport step and the stability monitor.
///
/// `Default` reproduces the reference engine.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Weight of the freshly computed flow in the relaxation.
    pub smoothing: f64,
    /// Flows below this magnitude are dropped [std m³/s].
    pub min_flow: f64,
    /// Z for segments without a computed value.
    pub default_z: f64,
    /// Gas gravity for the correlations.
    pub gravity: f64,
    /// Correlation base temperature [°C].
    pub flow_base_temperature_c: f64,
    /// Correlation base pressure [kPa].
    pub flow_base_pressure_kpa: f64,
    /// Standard pressure for stored volumes [MPa].
    pub base_pressure_mpa: f64,
    /// Standard temperature for stored volumes [K].
    pub base_temperature_k: f64,
    /// Molar mass used for velocities [kg/mol].
    pub molar_mass_kg_mol: f64,
    /// [J/(mol·K)]
    pub gas_constant: f64,
    /// Seconds between stability checks.
    pub stability_interval_s: u64,
    /// Largest pressure change still counted as steady [MPa].
    pub stability_threshold_mpa: f64,
    /// Any segment at or above this stops the run [MPa].
    pub pressure_ceiling_mpa: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.2,
            min_flow: 0.01,
            default_z: DEFAULT_SEGMENT_Z,
            gravity: 0.60,
            flow_base_temperature_c: 20.0,
            flow_base_pressure_kpa: 101.325,
            base_pressure_mpa: STANDARD_PRESSURE_MPA,
            base_temperature_k: STANDARD_TEMPERATURE_K,
            molar_mass_kg_mol: 0.01604,
            gas_constant: 8.314,
            stability_interval_s: 36_000,
            stability_threshold_mpa: 0.02,
            pressure_ceiling_mpa: 100.0,
        }
    }
}
