//! Natural gas composition as 21 mole fractions.

use crate::component::{Component, NUM_COMPONENTS};
use crate::error::{FluidError, FluidResult};
use gf_core::numeric::{Tolerances, nearly_equal};
use gf_core::units::constants::AIR_MOLAR_MASS;

/// Mole fractions of the 21 detailed-analysis components, in grouped order.
///
/// Fractions are always finite and non-negative. They are NOT forced to sum
/// to one: the EOS renormalizes silently, while stricter consumers call
/// [`GasComposition::ensure_normalized`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasComposition {
    fractions: [f64; NUM_COMPONENTS],
}

impl GasComposition {
    /// Build from a grouped-order slice.
    ///
    /// Fails on arity other than 21 and on negative or non-finite entries.
    /// Nothing is padded or truncated.
    pub fn from_slice(fractions: &[f64]) -> FluidResult<Self> {
        if fractions.len() != NUM_COMPONENTS {
            return Err(FluidError::Arity {
                what: "composition",
                expected: NUM_COMPONENTS,
                actual: fractions.len(),
            });
        }
        let mut out = [0.0; NUM_COMPONENTS];
        for (slot, &x) in out.iter_mut().zip(fractions) {
            *slot = check_fraction(x)?;
        }
        Ok(Self { fractions: out })
    }

    /// Build from `(component, fraction)` pairs; unnamed components are zero.
    pub fn from_pairs<I>(pairs: I) -> FluidResult<Self>
    where
        I: IntoIterator<Item = (Component, f64)>,
    {
        let mut out = Self::empty();
        for (c, x) in pairs {
            out.set(c, x)?;
        }
        Ok(out)
    }

    /// All fractions zero.
    pub fn empty() -> Self {
        Self {
            fractions: [0.0; NUM_COMPONENTS],
        }
    }

    /// Pure component.
    pub fn pure(component: Component) -> Self {
        let mut out = Self::empty();
        out.fractions[component.index()] = 1.0;
        out
    }

    pub fn fraction(&self, component: Component) -> f64 {
        self.fractions[component.index()]
    }

    pub fn set(&mut self, component: Component, fraction: f64) -> FluidResult<()> {
        self.fractions[component.index()] = check_fraction(fraction)?;
        Ok(())
    }

    pub fn as_array(&self) -> &[f64; NUM_COMPONENTS] {
        &self.fractions
    }

    pub fn iter(&self) -> impl Iterator<Item = (Component, f64)> + '_ {
        Component::ALL
            .iter()
            .map(move |&c| (c, self.fractions[c.index()]))
    }

    pub fn sum(&self) -> f64 {
        self.fractions.iter().sum()
    }

    pub fn is_normalized(&self, abs_tol: f64) -> bool {
        nearly_equal(self.sum(), 1.0, Tolerances::new(abs_tol, 0.0))
    }

    /// Reject compositions whose sum deviates from 1 by more than `abs_tol`.
    pub fn ensure_normalized(&self, abs_tol: f64) -> FluidResult<()> {
        if self.is_normalized(abs_tol) {
            Ok(())
        } else {
            Err(FluidError::NotNormalized { sum: self.sum() })
        }
    }

    /// Copy scaled so the fractions sum to 1.
    pub fn normalized(&self) -> FluidResult<Self> {
        let sum = self.sum();
        if sum <= 0.0 || !sum.is_finite() {
            return Err(FluidError::InvalidArg {
                what: "mole fractions sum to zero or non-finite",
            });
        }
        let mut out = *self;
        out.fractions.iter_mut().for_each(|x| *x /= sum);
        Ok(out)
    }

    /// Fractions permuted into the equation-of-state component order.
    pub fn eos_order(&self) -> [f64; NUM_COMPONENTS] {
        let mut out = [0.0; NUM_COMPONENTS];
        for c in Component::ALL {
            out[c.eos_index()] = self.fractions[c.index()];
        }
        out
    }

    /// Mixture molar mass [g/mol] (fraction-weighted, not renormalized).
    pub fn molar_mass(&self) -> f64 {
        self.iter().map(|(c, x)| x * c.molar_mass()).sum()
    }

    /// Relative density against dry air.
    pub fn relative_density(&self) -> f64 {
        self.molar_mass() / AIR_MOLAR_MASS
    }
}

impl Default for GasComposition {
    /// Reference pipeline-quality gas.
    fn default() -> Self {
        let mut out = Self::empty();
        let reference = [
            (Component::Methane, 0.9659),
            (Component::Ethane, 0.02751),
            (Component::Propane, 0.00046),
            (Component::Isobutane, 0.00046),
            (Component::NButane, 0.00010),
            (Component::Isopentane, 0.00004),
            (Component::NPentane, 0.00002),
            (Component::NHexane, 0.00002),
            (Component::Nitrogen, 0.002),
            (Component::CarbonDioxide, 0.00349),
        ];
        for (c, x) in reference {
            out.fractions[c.index()] = x;
        }
        out
    }
}

fn check_fraction(x: f64) -> FluidResult<f64> {
    if !x.is_finite() {
        return Err(FluidError::InvalidArg {
            what: "non-finite mole fraction",
        });
    }
    if x < 0.0 {
        return Err(FluidError::InvalidArg {
            what: "negative mole fraction",
        });
    }
    Ok(x)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn normalized_sum_is_one(fracs in prop::collection::vec(0.0_f64..1.0_f64, 21)) {
            let gas = GasComposition::from_slice(&fracs).unwrap();
            if let Ok(n) = gas.normalized() {
                let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
                prop_assert!(nearly_equal(n.sum(), 1.0, tol));
            }
        }

        #[test]
        fn eos_order_preserves_sum(fracs in prop::collection::vec(0.0_f64..1.0_f64, 21)) {
            let gas = GasComposition::from_slice(&fracs).unwrap();
            let eos: f64 = gas.eos_order().iter().sum();
            prop_assert!((eos - gas.sum()).abs() < 1e-12);
        }
    }
}
