use crate::aga8::{MixtureCoefficients, evaluate_state, solve_density};
use crate::composition::GasComposition;
use crate::error::{FluidError, FluidResult};
use gf_core::units::{Pressure, Temperature};
use uom::si::{pressure::megapascal, thermodynamic_temperature::kelvin};

/// Compressibility factor and molar density at one (T, P).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZDensity {
    pub z: f64,
    /// Molar density [kmol/m³].
    pub density_kmol_m3: f64,
}

impl ZDensity {
    /// Mass density [kg/m³] given the mixture molar mass [g/mol].
    pub fn mass_density(&self, molar_mass: f64) -> f64 {
        self.density_kmol_m3 * molar_mass
    }
}

/// Z and molar density for a grouped-order composition vector.
///
/// `temperature_k` in K, `pressure_mpa` in MPa. The composition is
/// renormalized; a vector of the wrong length is rejected.
pub fn compute_z_and_density(
    composition: &[f64],
    temperature_k: f64,
    pressure_mpa: f64,
) -> FluidResult<ZDensity> {
    let coeffs = MixtureCoefficients::from_fractions(composition)?;
    z_and_density(&coeffs, temperature_k, pressure_mpa)
}

/// Same as [`compute_z_and_density`] against prebuilt coefficients.
pub fn z_and_density(
    coeffs: &MixtureCoefficients,
    temperature_k: f64,
    pressure_mpa: f64,
) -> FluidResult<ZDensity> {
    if !temperature_k.is_finite() || temperature_k <= 0.0 {
        return Err(FluidError::InvalidArg {
            what: "temperature must be finite and positive",
        });
    }
    let density_kmol_m3 = solve_density(pressure_mpa, temperature_k, coeffs)?;
    let z = evaluate_state(density_kmol_m3, temperature_k, coeffs).z;
    Ok(ZDensity { z, density_kmol_m3 })
}

impl GasComposition {
    /// Unit-typed entry point for Z and molar density.
    pub fn z_and_density(&self, t: Temperature, p: Pressure) -> FluidResult<ZDensity> {
        let coeffs = MixtureCoefficients::build(self)?;
        z_and_density(&coeffs, t.get::<kelvin>(), p.get::<megapascal>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;
    use gf_core::units::{degc, mpa};

    #[test]
    fn ideal_gas_limit() {
        let gas = GasComposition::default();
        let r = compute_z_and_density(gas.as_array(), 288.15, 1e-3).unwrap();
        assert!((r.z - 1.0).abs() < 1e-4, "Z = {}", r.z);
        assert!(r.density_kmol_m3 < 1e-3);

        let zero = compute_z_and_density(gas.as_array(), 288.15, 0.0).unwrap();
        assert_eq!(zero.density_kmol_m3, 0.0);
        assert_eq!(zero.z, 1.0);
    }

    #[test]
    fn pipeline_gas_at_5_mpa_is_plausible() {
        let gas = GasComposition::default();
        let r = compute_z_and_density(gas.as_array(), 288.15, 5.0).unwrap();
        assert!(r.z > 0.85 && r.z < 0.95, "Z = {}", r.z);
        assert!((r.z - 0.89823).abs() < 1e-3);
    }

    #[test]
    fn wrong_length_is_input_shape_error() {
        let err = compute_z_and_density(&[1.0, 0.0], 288.15, 5.0).unwrap_err();
        assert!(matches!(err, FluidError::Arity { expected: 21, actual: 2, .. }));
    }

    #[test]
    fn unit_typed_entry_point_agrees() {
        let gas = GasComposition::default();
        let a = gas.z_and_density(degc(15.0), mpa(5.0)).unwrap();
        let b = compute_z_and_density(gas.as_array(), 288.15, 5.0).unwrap();
        assert!((a.z - b.z).abs() < 1e-9);
    }

    #[test]
    fn pure_methane_is_denser_than_ideal_at_pressure() {
        let gas = GasComposition::pure(Component::Methane);
        let r = gas.z_and_density(degc(15.0), mpa(10.0)).unwrap();
        assert!(r.z < 1.0);
        let rho = r.mass_density(gas.molar_mass());
        assert!(rho > 60.0 && rho < 90.0, "rho = {rho}");
    }
}
