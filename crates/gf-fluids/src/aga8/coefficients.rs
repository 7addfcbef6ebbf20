//! Composition-dependent mixture parameters.

use super::constants::{
    A, BINARY, EI, F, FI, FIRST_DENSITY_TERM, G, GI, KI, NUM_TERMS, NUM_VIRIAL, PAIR_COLS,
    PAIR_ROWS, Q, QI, S, SI, U, W, WI,
};
use crate::component::NUM_COMPONENTS;
use crate::composition::GasComposition;
use crate::error::{FluidError, FluidResult};

/// Mixture reduction parameters for one composition.
///
/// Immutable once built; evaluate as many (T, P) states against it as needed.
#[derive(Debug, Clone, PartialEq)]
pub struct MixtureCoefficients {
    /// Mixture size parameter K.
    pub size_k: f64,
    /// Mixture energy parameter U.
    pub energy_u: f64,
    /// Temperature/composition coefficients Cₙ* (entries below n = 13 stay zero).
    pub cns: [f64; NUM_TERMS],
    /// Second-virial composition coefficients Bₙ* (temperature still to be applied).
    pub bi: [f64; NUM_VIRIAL],
}

/// Dense symmetric view of the binary interaction table.
struct BinaryTables {
    e: [[f64; NUM_COMPONENTS]; NUM_COMPONENTS],
    u: [[f64; NUM_COMPONENTS]; NUM_COMPONENTS],
    k: [[f64; NUM_COMPONENTS]; NUM_COMPONENTS],
    g: [[f64; NUM_COMPONENTS]; NUM_COMPONENTS],
}

impl BinaryTables {
    fn expand() -> Self {
        let ones = [[1.0; NUM_COMPONENTS]; NUM_COMPONENTS];
        let mut t = Self {
            e: ones,
            u: ones,
            k: ones,
            g: ones,
        };
        for b in BINARY {
            for (i, j) in [(b.i, b.j), (b.j, b.i)] {
                t.e[i][j] = b.e;
                t.u[i][j] = b.u;
                t.k[i][j] = b.k;
                t.g[i][j] = b.g;
            }
        }
        t
    }
}

/// `(x + 1 - flag)^flag` for a 0/1 flag.
#[inline]
fn switch(x: f64, flag: u8) -> f64 {
    if flag == 1 { x } else { 1.0 }
}

impl MixtureCoefficients {
    /// Build from a grouped-order fraction slice.
    ///
    /// Fails if the slice is not exactly 21 long or holds negative or
    /// non-finite values. Fractions are renormalized silently.
    pub fn from_fractions(fractions: &[f64]) -> FluidResult<Self> {
        Self::build(&GasComposition::from_slice(fractions)?)
    }

    /// Build from a composition, renormalizing it to sum 1.
    pub fn build(composition: &GasComposition) -> FluidResult<Self> {
        let sum = composition.sum();
        if sum <= 0.0 || !sum.is_finite() {
            return Err(FluidError::InvalidArg {
                what: "mole fractions sum to zero or non-finite",
            });
        }
        let mut x = composition.eos_order();
        x.iter_mut().for_each(|v| *v /= sum);

        let tables = BinaryTables::expand();

        let mut k1 = 0.0;
        let mut u1 = 0.0;
        let mut g1 = 0.0;
        let mut q1 = 0.0;
        let mut f1 = 0.0;
        for i in 0..NUM_COMPONENTS {
            k1 += x[i] * KI[i].powf(2.5);
            u1 += x[i] * EI[i].powf(2.5);
            g1 += x[i] * GI[i];
            q1 += x[i] * QI[i];
            f1 += x[i] * x[i] * FI[i];
        }
        // Squared before the pair corrections are added.
        k1 *= k1;
        u1 *= u1;

        for i in 0..PAIR_ROWS {
            if x[i] == 0.0 {
                continue;
            }
            for j in (i + 1)..PAIR_COLS {
                let xij = x[i] * x[j];
                if xij == 0.0 {
                    continue;
                }
                k1 += 2.0 * xij * (tables.k[i][j].powi(5) - 1.0) * (KI[i] * KI[j]).powf(2.5);
                u1 += 2.0 * xij * (tables.u[i][j].powi(5) - 1.0) * (EI[i] * EI[j]).powf(2.5);
                g1 += xij * (tables.g[i][j] - 1.0) * (GI[i] + GI[j]);
            }
        }

        let size_k = k1.powf(0.2);
        let energy_u = u1.powf(0.2);

        let mut bi = [0.0; NUM_VIRIAL];
        for i in 0..NUM_COMPONENTS {
            if x[i] == 0.0 {
                continue;
            }
            for j in i..NUM_COMPONENTS {
                let mut xij = x[i] * x[j];
                if xij == 0.0 {
                    continue;
                }
                if i != j {
                    xij *= 2.0;
                }
                let eij = tables.e[i][j] * (EI[i] * EI[j]).sqrt();
                let gij = tables.g[i][j] * (GI[i] + GI[j]) / 2.0;
                let kij = (KI[i] * KI[j]).powf(1.5);
                for n in 0..NUM_VIRIAL {
                    let bn = switch(gij, G[n])
                        * switch(QI[i] * QI[j], Q[n])
                        * switch((FI[i] * FI[j]).sqrt(), F[n])
                        * switch(SI[i] * SI[j], S[n])
                        * switch(WI[i] * WI[j], W[n]);
                    bi[n] += A[n] * xij * eij.powf(U[n]) * kij * bn;
                }
            }
        }

        let mut cns = [0.0; NUM_TERMS];
        for n in FIRST_DENSITY_TERM..NUM_TERMS {
            cns[n] = switch(g1, G[n])
                * switch(q1 * q1, Q[n])
                * switch(f1, F[n])
                * A[n]
                * energy_u.powf(U[n]);
        }

        Ok(Self {
            size_k,
            energy_u,
            cns,
            bi,
        })
    }
}
