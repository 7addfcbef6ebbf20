//! Compressibility and pressure from (D, T).

use super::coefficients::MixtureCoefficients;
use super::constants::{B, C, FIRST_DENSITY_TERM, K, NUM_TERMS, NUM_VIRIAL, R_GAS, U};

/// Result of one equation-of-state evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EosState {
    /// Compressibility factor Z.
    pub z: f64,
    /// Pressure [MPa].
    pub pressure: f64,
    /// Mixture second virial coefficient [m³/kmol].
    pub second_virial: f64,
}

/// Evaluate Z and pressure at molar density `density` [kmol/m³] and
/// temperature `temperature_k` [K].
///
/// Pure function of its inputs. The caller guarantees `temperature_k > 0`.
pub fn evaluate_state(
    density: f64,
    temperature_k: f64,
    coeffs: &MixtureCoefficients,
) -> EosState {
    let t = temperature_k;
    let second_virial: f64 = (0..NUM_VIRIAL)
        .map(|n| coeffs.bi[n] / t.powf(U[n]))
        .sum();

    let reduced = density * coeffs.size_k.powi(3);
    let mut z = 1.0 + second_virial * density;

    // Terms 13..=18 are already partly inside the virial estimate.
    for n in FIRST_DENSITY_TERM..NUM_VIRIAL {
        z -= reduced * coeffs.cns[n] / t.powf(U[n]);
    }

    for n in FIRST_DENSITY_TERM..NUM_TERMS {
        let dk = reduced.powi(K[n]);
        let c = f64::from(C[n]);
        let b = f64::from(B[n]);
        z += coeffs.cns[n] / t.powf(U[n])
            * (b - c * f64::from(K[n]) * dk)
            * reduced.powi(B[n])
            * (-c * dk).exp();
    }

    EosState {
        z,
        pressure: density * R_GAS * t * z,
        second_virial,
    }
}
