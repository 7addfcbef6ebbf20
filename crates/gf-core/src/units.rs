// gf-core/src/units.rs

use uom::si::f64::{Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature};

// Public canonical unit types (SI, f64)
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn mpa(v: f64) -> Pressure {
    use uom::si::pressure::megapascal;
    Pressure::new::<megapascal>(v)
}

#[inline]
pub fn degc(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

pub mod constants {
    /// Offset between the Celsius and Kelvin scales.
    pub const KELVIN_OFFSET: f64 = 273.15;

    /// Atmospheric pressure used for gauge/absolute conversion [bar].
    pub const ATMOSPHERE_BAR: f64 = 1.013_25;

    /// Standard pressure used for volumes and flows at standard conditions [MPa].
    pub const STANDARD_PRESSURE_MPA: f64 = 0.101_325;

    /// Standard temperature (20 °C) [K].
    pub const STANDARD_TEMPERATURE_K: f64 = 293.15;

    /// Molar mass of dry air [g/mol].
    pub const AIR_MOLAR_MASS: f64 = 28.9647;

    pub const G0_MPS2: f64 = 9.81;

    #[inline]
    pub fn celsius_to_kelvin(t_c: f64) -> f64 {
        t_c + KELVIN_OFFSET
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{Tolerances, nearly_equal};

    #[test]
    fn megapascal_constructor() {
        use uom::si::pressure::kilopascal;
        let tol = Tolerances::new(1e-12, 1e-12);
        assert!(nearly_equal(mpa(5.0).get::<kilopascal>(), 5000.0, tol));
    }

    #[test]
    fn celsius_offset() {
        use uom::si::thermodynamic_temperature::kelvin;
        let t = degc(15.0);
        let tol = Tolerances::new(1e-9, 1e-12);
        assert!(nearly_equal(t.get::<kelvin>(), 288.15, tol));
        assert!(nearly_equal(constants::celsius_to_kelvin(20.0), 293.15, tol));
    }
}
