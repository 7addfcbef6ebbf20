//! AGA8 integration tests.
//!
//! Broad physical plausibility checks across realistic gases, plus the
//! published reference point for the full 21-component mixture.

use gf_fluids::{
    Component, GasComposition, MixtureCoefficients, compute_z_and_density, evaluate_state,
    solve_density,
};

#[test]
fn reference_gas_z_falls_with_pressure_at_15c() {
    let gas = GasComposition::default();
    let mut last = 1.0;
    for p in [0.5, 2.0, 5.0, 8.0, 10.0] {
        let r = compute_z_and_density(gas.as_array(), 288.15, p).unwrap();
        assert!(r.z < last, "Z not decreasing at {p} MPa");
        last = r.z;
    }
    assert!(last > 0.75 && last < 0.85, "Z(10 MPa) = {last}");
}

#[test]
fn nist_reference_mixture_density_at_50_mpa() {
    let gas = GasComposition::from_pairs([
        (Component::Methane, 0.77824),
        (Component::Nitrogen, 0.02),
        (Component::CarbonDioxide, 0.06),
        (Component::Ethane, 0.08),
        (Component::Propane, 0.03),
        (Component::Isobutane, 0.0015),
        (Component::NButane, 0.003),
        (Component::Isopentane, 0.0005),
        (Component::NPentane, 0.00165),
        (Component::NHexane, 0.00215),
        (Component::NHeptane, 0.00088),
        (Component::NOctane, 0.00024),
        (Component::NNonane, 0.00015),
        (Component::NDecane, 0.00009),
        (Component::Hydrogen, 0.004),
        (Component::Oxygen, 0.005),
        (Component::CarbonMonoxide, 0.002),
        (Component::Water, 0.0001),
        (Component::HydrogenSulfide, 0.0025),
        (Component::Helium, 0.007),
        (Component::Argon, 0.001),
    ])
    .unwrap();
    let r = compute_z_and_density(gas.as_array(), 400.0, 50.0).unwrap();
    assert!(
        (r.density_kmol_m3 - 12.807924036488).abs() < 1e-3,
        "D = {}",
        r.density_kmol_m3
    );
    assert!((r.z - 1.173801364147).abs() < 1e-4, "Z = {}", r.z);
}

#[test]
fn nitrogen_is_nearly_ideal_at_ambient() {
    let gas = GasComposition::pure(Component::Nitrogen);
    let r = compute_z_and_density(gas.as_array(), 300.0, 1.0).unwrap();
    assert!((r.z - 1.0).abs() < 0.01, "Z = {}", r.z);
}

#[test]
fn coefficients_shared_across_threads() {
    let coeffs = MixtureCoefficients::build(&GasComposition::default()).unwrap();
    let pressures = [1.0, 3.0, 6.0, 9.0];
    let results: Vec<f64> = std::thread::scope(|scope| {
        let handles: Vec<_> = pressures
            .iter()
            .map(|&p| {
                let c = &coeffs;
                scope.spawn(move || {
                    let d = solve_density(p, 290.0, c).unwrap();
                    evaluate_state(d, 290.0, c).pressure
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for (p, back) in pressures.iter().zip(&results) {
        assert!((p - back).abs() < 1e-9);
    }
}
