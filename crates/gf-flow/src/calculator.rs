//! Single-pipe calculator: AGA8 gas properties feeding Panhandle B.
//!
//! Given a composition, operating temperature and end pressures, computes
//! Z and densities at the mean pipe pressure, the standard flow, end
//! velocities, and line pack. [`PipelineCalculator::flow_table`] sweeps a
//! P1 × P2 grid; rows are independent and evaluated in parallel.

use crate::common::SECONDS_PER_DAY;
use crate::correlations::{FlowCorrelation, PanhandleB};
use crate::error::{FlowError, FlowResult};
use crate::params::{FlowParams, barg_to_bara};
use gf_core::units::constants::{ATMOSPHERE_BAR, STANDARD_TEMPERATURE_K, celsius_to_kelvin};
use gf_fluids::{GasComposition, MixtureCoefficients, z_and_density};
use rayon::prelude::*;

/// Tolerance on the mole-fraction sum accepted by the calculator.
pub const COMPOSITION_SUM_TOL: f64 = 1e-6;

/// Universal gas constant [J/(mol·K)] for the ideal-gas velocity relation.
const R_IDEAL: f64 = 8.314;

/// Calculator inputs. Pressures are gauge, in bar.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineInputs {
    pub composition: GasComposition,
    /// Flowing temperature [°C].
    pub temperature_c: f64,
    /// Base temperature [°C].
    pub base_temperature_c: f64,
    /// Base pressure [bar absolute].
    pub base_pressure_bara: f64,
    pub efficiency: f64,
    /// Inlet elevation [m].
    pub h1_m: f64,
    /// Outlet elevation [m].
    pub h2_m: f64,
    pub length_km: f64,
    pub diameter_mm: f64,
    /// Inlet pressure [barg].
    pub p1_barg: f64,
    /// Outlet pressure [barg].
    pub p2_barg: f64,
}

impl Default for PipelineInputs {
    fn default() -> Self {
        Self {
            composition: GasComposition::default(),
            temperature_c: 15.0,
            base_temperature_c: 20.0,
            base_pressure_bara: ATMOSPHERE_BAR,
            efficiency: 0.95,
            h1_m: 0.0,
            h2_m: 0.0,
            length_km: 100.0,
            diameter_mm: 500.0,
            p1_barg: 50.0,
            p2_barg: 20.0,
        }
    }
}

/// Everything the calculator reports for one pressure pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineResult {
    /// Mean pipe pressure [kPa absolute].
    pub mean_pressure_kpa: f64,
    pub z: f64,
    /// Molar density at mean pressure [kmol/m³].
    pub density_kmol_m3: f64,
    /// Mixture molar mass [g/mol].
    pub molar_mass: f64,
    pub relative_density: f64,
    /// Mass density at flowing conditions [kg/m³].
    pub mass_density: f64,
    /// Mass density at 20 °C and base pressure [kg/m³].
    pub base_mass_density: f64,
    /// Standard flow [m³/s].
    pub flow_m3s: f64,
    /// Standard flow [thousand m³/h].
    pub flow_thousand_m3h: f64,
    /// Standard flow [million m³/day].
    pub flow_million_m3d: f64,
    /// Inlet velocity [m/s].
    pub v1: f64,
    /// Outlet velocity [m/s].
    pub v2: f64,
    /// Stored gas at standard conditions [thousand m³].
    pub line_pack_thousand_m3: f64,
}

impl PipelineResult {
    /// Mean pressure back in gauge bar.
    pub fn mean_pressure_barg(&self) -> f64 {
        self.mean_pressure_kpa / 100.0 - ATMOSPHERE_BAR
    }
}

/// One cell of a P1 × P2 table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableCell {
    /// P1 ≤ P2: no forward flow to report.
    NotApplicable,
    Computed {
        flow_million_m3d: f64,
        line_pack_million_m3: f64,
    },
    Failed(FlowError),
}

/// P1 × P2 grid. `p1_barg` is descending (highest first), `p2_barg` ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowTable {
    pub p1_barg: Vec<f64>,
    pub p2_barg: Vec<f64>,
    /// `cells[row][col]` for `p1_barg[row]`, `p2_barg[col]`.
    pub cells: Vec<Vec<TableCell>>,
}

/// Pipeline calculator bound to one composition.
#[derive(Debug, Clone)]
pub struct PipelineCalculator {
    inputs: PipelineInputs,
    coeffs: MixtureCoefficients,
}

impl PipelineCalculator {
    /// Validates the composition sum (±1e-6) and builds EOS coefficients once.
    pub fn new(inputs: PipelineInputs) -> FlowResult<Self> {
        inputs.composition.ensure_normalized(COMPOSITION_SUM_TOL)?;
        if inputs.diameter_mm <= 0.0 || inputs.length_km <= 0.0 {
            return Err(FlowError::InvalidArg {
                what: "pipe length and diameter must be positive",
            });
        }
        if inputs.base_pressure_bara <= 0.0 {
            return Err(FlowError::InvalidArg {
                what: "base pressure must be positive",
            });
        }
        let coeffs = MixtureCoefficients::build(&inputs.composition)?;
        Ok(Self { inputs, coeffs })
    }

    pub fn inputs(&self) -> &PipelineInputs {
        &self.inputs
    }

    /// Evaluate at the configured end pressures.
    pub fn evaluate(&self) -> FlowResult<PipelineResult> {
        self.evaluate_at(
            barg_to_bara(self.inputs.p1_barg) * 100.0,
            barg_to_bara(self.inputs.p2_barg) * 100.0,
        )
    }

    /// Evaluate at explicit absolute end pressures [kPa].
    pub fn evaluate_at(&self, p1_kpa: f64, p2_kpa: f64) -> FlowResult<PipelineResult> {
        let inp = &self.inputs;
        let t_k = celsius_to_kelvin(inp.temperature_c);
        let pb_kpa = inp.base_pressure_bara * 100.0;
        let tb_k = celsius_to_kelvin(inp.base_temperature_c);

        let mean_pressure_kpa = mean_pressure(p1_kpa, p2_kpa);
        let state = z_and_density(&self.coeffs, t_k, mean_pressure_kpa / 1000.0)?;
        let z = state.z;

        let molar_mass = inp.composition.molar_mass();
        let relative_density = inp.composition.relative_density();
        let mass_density = state.mass_density(molar_mass);
        let base = z_and_density(&self.coeffs, STANDARD_TEMPERATURE_K, pb_kpa / 1000.0)?;
        let base_mass_density = base.mass_density(molar_mass);

        let params = FlowParams {
            efficiency: inp.efficiency,
            base_temperature_c: inp.base_temperature_c,
            base_pressure_kpa: pb_kpa,
            p1_kpa,
            p2_kpa,
            gravity: relative_density,
            flowing_temperature_c: inp.temperature_c,
            length_km: inp.length_km,
            diameter_mm: inp.diameter_mm,
            z,
            h1_m: inp.h1_m,
            h2_m: inp.h2_m,
        };
        let flow_m3s = PanhandleB.flow_rate(&params);

        let d_m = inp.diameter_mm / 1000.0;
        let area = std::f64::consts::PI * d_m * d_m / 4.0;
        let m_kg_mol = molar_mass / 1000.0;
        let rho_std = pb_kpa * m_kg_mol / (R_IDEAL * tb_k);
        let mass_flow = flow_m3s * rho_std;
        let rho1 = p1_kpa * m_kg_mol / (z * R_IDEAL * t_k);
        let rho2 = p2_kpa * m_kg_mol / (z * R_IDEAL * t_k);
        let v1 = if rho1 > 0.0 { mass_flow / rho1 / area } else { 0.0 };
        let v2 = if rho2 > 0.0 { mass_flow / rho2 / area } else { 0.0 };

        let line_pack_thousand_m3 = area
            * (inp.length_km * 1000.0)
            * (mean_pressure_kpa / pb_kpa)
            * (tb_k / (z * t_k))
            / 1000.0;

        Ok(PipelineResult {
            mean_pressure_kpa,
            z,
            density_kmol_m3: state.density_kmol_m3,
            molar_mass,
            relative_density,
            mass_density,
            base_mass_density,
            flow_m3s,
            flow_thousand_m3h: flow_m3s * 3600.0 / 1000.0,
            flow_million_m3d: flow_m3s * SECONDS_PER_DAY / 1e6,
            v1,
            v2,
            line_pack_thousand_m3,
        })
    }

    /// Flow and line pack over a P1 × P2 grid of gauge pressures [barg].
    ///
    /// Ranges are inclusive; the maximum is appended when the step does not
    /// land on it. Cells with P1 ≤ P2 are [`TableCell::NotApplicable`].
    pub fn flow_table(
        &self,
        p1_range: (f64, f64),
        p2_range: (f64, f64),
        step: f64,
    ) -> FlowResult<FlowTable> {
        let mut p1_barg = pressure_steps(p1_range, step)?;
        p1_barg.reverse();
        let p2_barg = pressure_steps(p2_range, step)?;

        let cells = p1_barg
            .par_iter()
            .map(|&p1| {
                p2_barg
                    .iter()
                    .map(|&p2| self.table_cell(p1, p2))
                    .collect::<Vec<_>>()
            })
            .collect();

        Ok(FlowTable {
            p1_barg,
            p2_barg,
            cells,
        })
    }

    fn table_cell(&self, p1_barg: f64, p2_barg: f64) -> TableCell {
        if p1_barg <= p2_barg {
            return TableCell::NotApplicable;
        }
        match self.evaluate_at(
            barg_to_bara(p1_barg) * 100.0,
            barg_to_bara(p2_barg) * 100.0,
        ) {
            Ok(r) => TableCell::Computed {
                flow_million_m3d: r.flow_million_m3d,
                line_pack_million_m3: r.line_pack_thousand_m3 / 1000.0,
            },
            Err(e) => TableCell::Failed(e),
        }
    }
}

/// Mean pressure along a pipe, 2/3·(P1³ − P2³)/(P1² − P2²); P1 when equal.
pub fn mean_pressure(p1: f64, p2: f64) -> f64 {
    if p1 == p2 {
        return p1;
    }
    (2.0 / 3.0) * (p1.powi(3) - p2.powi(3)) / (p1.powi(2) - p2.powi(2))
}

fn pressure_steps((min, max): (f64, f64), step: f64) -> FlowResult<Vec<f64>> {
    if !(min > 0.0 && max > min && step > 0.0) {
        return Err(FlowError::InvalidArg {
            what: "pressure range needs 0 < min < max and a positive step",
        });
    }
    let eps = step * 1e-9;
    let mut out = Vec::new();
    let mut i = 0_u32;
    loop {
        let p = min + f64::from(i) * step;
        if p > max + eps {
            break;
        }
        out.push(p);
        i += 1;
    }
    if out.last().is_none_or(|&last| (last - max).abs() > eps) {
        out.push(max);
    }
    Ok(out)
}
