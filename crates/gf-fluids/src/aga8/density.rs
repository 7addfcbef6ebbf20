//! Density root finder: D such that P(D, T) = P_target.

use super::coefficients::MixtureCoefficients;
use super::eos::evaluate_state;
use crate::error::{FluidError, FluidResult};

const D_LOW: f64 = 1e-6;
const D_HIGH_START: f64 = 40.0;
const D_HIGH_CAP: f64 = 1e3;
const MAX_BISECTIONS: usize = 50;
const PRESSURE_TOL: f64 = 1e-10;

/// Molar density [kmol/m³] reproducing `pressure_mpa` at `temperature_k`.
///
/// - `pressure_mpa <= 0` returns 0 (vacuum limit, not an error)
/// - no sign change by the density cap: [`FluidError::DensityNotBracketed`]
/// - 50 bisections without |ΔP| < 1e-10 MPa: [`FluidError::DensityNotConverged`]
pub fn solve_density(
    pressure_mpa: f64,
    temperature_k: f64,
    coeffs: &MixtureCoefficients,
) -> FluidResult<f64> {
    solve_density_within(pressure_mpa, temperature_k, coeffs, MAX_BISECTIONS)
}

fn solve_density_within(
    pressure_mpa: f64,
    temperature_k: f64,
    coeffs: &MixtureCoefficients,
    max_bisections: usize,
) -> FluidResult<f64> {
    if !pressure_mpa.is_finite() {
        return Err(FluidError::InvalidArg {
            what: "pressure must be finite",
        });
    }
    if !temperature_k.is_finite() || temperature_k <= 0.0 {
        return Err(FluidError::InvalidArg {
            what: "temperature must be finite and positive",
        });
    }
    if pressure_mpa <= 0.0 {
        return Ok(0.0);
    }

    let residual = |d: f64| evaluate_state(d, temperature_k, coeffs).pressure - pressure_mpa;

    let mut d_low = D_LOW;
    let mut d_high = D_HIGH_START;
    let mut f_low = residual(d_low);
    let mut f_high = residual(d_high);
    while f_low * f_high > 0.0 && d_high < D_HIGH_CAP {
        d_high *= 2.0;
        f_high = residual(d_high);
    }
    if f_low * f_high > 0.0 {
        return Err(FluidError::DensityNotBracketed {
            pressure_mpa,
            temperature_k,
            upper: d_high,
        });
    }

    let mut f_mid = f_high;
    for _ in 0..max_bisections {
        let d_mid = 0.5 * (d_low + d_high);
        f_mid = residual(d_mid);
        if f_mid.abs() < PRESSURE_TOL {
            return Ok(d_mid);
        }
        if f_mid * f_low < 0.0 {
            d_high = d_mid;
        } else {
            d_low = d_mid;
            f_low = f_mid;
        }
    }

    Err(FluidError::DensityNotConverged {
        iterations: max_bisections,
        residual: f_mid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::GasComposition;

    fn default_coeffs() -> MixtureCoefficients {
        MixtureCoefficients::build(&GasComposition::default()).unwrap()
    }

    #[test]
    fn non_positive_pressure_is_vacuum() {
        let c = default_coeffs();
        assert_eq!(solve_density(0.0, 300.0, &c).unwrap(), 0.0);
        assert_eq!(solve_density(-1.0, 300.0, &c).unwrap(), 0.0);
    }

    #[test]
    fn invalid_temperature_rejected() {
        let c = default_coeffs();
        assert!(matches!(
            solve_density(5.0, 0.0, &c),
            Err(FluidError::InvalidArg { .. })
        ));
        assert!(solve_density(f64::NAN, 300.0, &c).is_err());
    }

    #[test]
    fn round_trip_recovers_density() {
        let c = default_coeffs();
        for &(d, t) in &[(0.5, 280.0), (2.0, 288.15), (5.0, 320.0), (8.0, 350.0)] {
            let p = evaluate_state(d, t, &c).pressure;
            let back = solve_density(p, t, &c).unwrap();
            assert!(((back - d) / d).abs() < 1e-6, "D={d} T={t} back={back}");
        }
    }

    #[test]
    fn exhausted_bisection_is_not_converged() {
        let c = default_coeffs();
        let err = solve_density_within(5.0, 288.15, &c, 3).unwrap_err();
        match err {
            FluidError::DensityNotConverged {
                iterations,
                residual,
            } => {
                assert_eq!(iterations, 3);
                assert!(residual.abs() >= PRESSURE_TOL);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(solve_density_within(5.0, 288.15, &c, MAX_BISECTIONS).is_ok());
    }

    #[test]
    fn tiny_pressure_below_lower_bound_is_not_bracketed() {
        // P(1e-6 kmol/m³) at 300 K is ~2.5e-9 MPa; anything below cannot be bracketed.
        let c = default_coeffs();
        assert!(matches!(
            solve_density(1e-12, 300.0, &c),
            Err(FluidError::DensityNotBracketed { .. })
        ));
    }
}
