//! Fast pressure-only Z correlation for per-tick segment updates.
//!
//! This is a separate strategy from the AGA8 solver: it is tuned for a
//! methane-rich gas and ignores composition. Results are not comparable
//! bit-for-bit with [`crate::aga8`].

use gf_core::units::constants::KELVIN_OFFSET;

/// Second-order virial-style fit Z = 1 + A₁·Pr + A₂·Pr².
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuickZ {
    /// Reference (pseudo-critical) temperature [K].
    pub t_ref_k: f64,
    /// Reference (pseudo-critical) pressure [MPa].
    pub p_ref_mpa: f64,
}

impl Default for QuickZ {
    fn default() -> Self {
        Self {
            t_ref_k: 198.0498,
            p_ref_mpa: 4.4999,
        }
    }
}

/// Temperature-dependent coefficients, computed once per edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuickZCoefficients {
    pub a1: f64,
    pub a2: f64,
    p_ref_mpa: f64,
}

impl QuickZCoefficients {
    pub fn z(&self, pressure_mpa: f64) -> f64 {
        let pr = pressure_mpa / self.p_ref_mpa;
        1.0 + self.a1 * pr + self.a2 * pr * pr
    }
}

impl QuickZ {
    pub fn at_temperature(&self, temperature_c: f64) -> QuickZCoefficients {
        let tr = (temperature_c + KELVIN_OFFSET) / self.t_ref_k;
        let a1 = -1.0 + 3.874 / tr - 4.5767 / (tr * tr) + 1.1813 / (tr * tr * tr);
        let a2 = 0.1708 - 0.5606 / tr + 0.4857 / (tr * tr);
        QuickZCoefficients {
            a1,
            a2,
            p_ref_mpa: self.p_ref_mpa,
        }
    }

    /// Z at `pressure_mpa` and `temperature_c` [°C].
    pub fn z(&self, pressure_mpa: f64, temperature_c: f64) -> f64 {
        self.at_temperature(temperature_c).z(pressure_mpa)
    }
}
