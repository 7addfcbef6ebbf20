use clap::{Parser, Subcommand, ValueEnum};
use gf_core::units::{degc, mpa};
use gf_flow::{FlowError, PipelineCalculator, PipelineInputs, TableCell};
use gf_fluids::{Component, FluidError, GasComposition};
use gf_project::ProjectError;
use gf_sim::{BatchOutcome, Scheduler, SimError, SimulationSpeed};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Fluid(#[from] FluidError),
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error(transparent)]
    Project(#[from] ProjectError),
    #[error(transparent)]
    Sim(#[from] SimError),
    #[error("Bad component fraction '{0}' (expected name=value)")]
    Fraction(String),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "gf-cli")]
#[command(about = "Gas pipeline calculator and transient network simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compressibility and density of a gas (AGA8-92DC)
    Z {
        /// Temperature [°C]
        #[arg(short, long, default_value_t = 15.0)]
        temperature: f64,
        /// Absolute pressure [MPa]
        #[arg(short, long, default_value_t = 5.0)]
        pressure: f64,
        #[command(flatten)]
        gas: GasArgs,
    },
    /// Flow, velocities and line pack of a single pipeline
    Flow {
        #[command(flatten)]
        pipe: PipeArgs,
        #[command(flatten)]
        gas: GasArgs,
    },
    /// Flow and line pack over a grid of inlet/outlet pressures
    Table {
        #[command(flatten)]
        pipe: PipeArgs,
        #[command(flatten)]
        gas: GasArgs,
        /// Inlet pressure range [barg]
        #[arg(long, num_args = 2, default_values_t = [40.0, 60.0])]
        p1_range: Vec<f64>,
        /// Outlet pressure range [barg]
        #[arg(long, num_args = 2, default_values_t = [10.0, 30.0])]
        p2_range: Vec<f64>,
        /// Pressure step [bar]
        #[arg(long, default_value_t = 2.0)]
        step: f64,
    },
    /// Validate a network file
    Validate {
        /// Network file (.json, .yaml or .yml)
        network_path: PathBuf,
    },
    /// Run a transient simulation of a network file
    Run {
        /// Network file (.json, .yaml or .yml)
        network_path: PathBuf,
        /// Simulated time per batch
        #[arg(long, value_enum, default_value_t = Speed::Hour)]
        speed: Speed,
        /// Maximum number of batches
        #[arg(long, default_value_t = 24)]
        batches: u64,
        /// Write the final state here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Speed {
    Second,
    Minute,
    Hour,
}

impl From<Speed> for SimulationSpeed {
    fn from(s: Speed) -> Self {
        match s {
            Speed::Second => SimulationSpeed::Second,
            Speed::Minute => SimulationSpeed::Minute,
            Speed::Hour => SimulationSpeed::Hour,
        }
    }
}

#[derive(clap::Args)]
struct GasArgs {
    /// Mole fraction overrides, e.g. `--fraction methane=0.9`. Without any,
    /// the reference pipeline gas is used.
    #[arg(long = "fraction", value_name = "NAME=VALUE")]
    fractions: Vec<String>,
}

impl GasArgs {
    fn composition(&self) -> CliResult<GasComposition> {
        if self.fractions.is_empty() {
            return Ok(GasComposition::default());
        }
        let mut pairs = Vec::with_capacity(self.fractions.len());
        for item in &self.fractions {
            let (name, value) = item
                .split_once('=')
                .ok_or_else(|| CliError::Fraction(item.clone()))?;
            let component: Component = name.parse().map_err(|_| CliError::Fraction(item.clone()))?;
            let value: f64 = value
                .trim()
                .parse()
                .map_err(|_| CliError::Fraction(item.clone()))?;
            pairs.push((component, value));
        }
        Ok(GasComposition::from_pairs(pairs)?)
    }
}

#[derive(clap::Args)]
struct PipeArgs {
    /// Inlet pressure [barg]
    #[arg(long, default_value_t = 50.0)]
    p1: f64,
    /// Outlet pressure [barg]
    #[arg(long, default_value_t = 20.0)]
    p2: f64,
    /// Length [km]
    #[arg(long, default_value_t = 100.0)]
    length: f64,
    /// Inside diameter [mm]
    #[arg(long, default_value_t = 500.0)]
    diameter: f64,
    /// Gas temperature [°C]
    #[arg(long, default_value_t = 15.0)]
    temperature: f64,
    /// Pipeline efficiency
    #[arg(long, default_value_t = 0.95)]
    efficiency: f64,
    /// Inlet elevation [m]
    #[arg(long, default_value_t = 0.0)]
    h1: f64,
    /// Outlet elevation [m]
    #[arg(long, default_value_t = 0.0)]
    h2: f64,
}

impl PipeArgs {
    fn inputs(&self, composition: GasComposition) -> PipelineInputs {
        PipelineInputs {
            composition,
            temperature_c: self.temperature,
            efficiency: self.efficiency,
            h1_m: self.h1,
            h2_m: self.h2,
            length_km: self.length,
            diameter_mm: self.diameter,
            p1_barg: self.p1,
            p2_barg: self.p2,
            ..PipelineInputs::default()
        }
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Z {
            temperature,
            pressure,
            gas,
        } => cmd_z(temperature, pressure, &gas),
        Commands::Flow { pipe, gas } => cmd_flow(&pipe, &gas),
        Commands::Table {
            pipe,
            gas,
            p1_range,
            p2_range,
            step,
        } => cmd_table(&pipe, &gas, &p1_range, &p2_range, step),
        Commands::Validate { network_path } => cmd_validate(&network_path),
        Commands::Run {
            network_path,
            speed,
            batches,
            output,
        } => cmd_run(&network_path, speed.into(), batches, output.as_deref()),
    }
}

fn cmd_z(temperature_c: f64, pressure_mpa: f64, gas: &GasArgs) -> CliResult<()> {
    let composition = gas.composition()?;
    let state = composition.z_and_density(degc(temperature_c), mpa(pressure_mpa))?;
    let molar_mass = composition.molar_mass();
    println!("T = {temperature_c} °C, P = {pressure_mpa} MPa");
    println!("  Z             = {:.6}", state.z);
    println!("  density       = {:.6} kmol/m³", state.density_kmol_m3);
    println!("  mass density  = {:.4} kg/m³", state.mass_density(molar_mass));
    println!("  molar mass    = {:.4} kg/kmol", molar_mass);
    Ok(())
}

fn cmd_flow(pipe: &PipeArgs, gas: &GasArgs) -> CliResult<()> {
    let calc = PipelineCalculator::new(pipe.inputs(gas.composition()?))?;
    let r = calc.evaluate()?;
    println!("Mean pressure     {:.3} barg", r.mean_pressure_barg());
    println!("Z                 {:.5}", r.z);
    println!("Relative density  {:.4}", r.relative_density);
    println!("Mass density      {:.3} kg/m³", r.mass_density);
    println!(
        "Flow              {:.4} m³/s | {:.3} thousand m³/h | {:.4} million m³/d",
        r.flow_m3s, r.flow_thousand_m3h, r.flow_million_m3d
    );
    println!("Velocity in/out   {:.3} / {:.3} m/s", r.v1, r.v2);
    println!("Line pack         {:.3} thousand m³", r.line_pack_thousand_m3);
    Ok(())
}

fn cmd_table(
    pipe: &PipeArgs,
    gas: &GasArgs,
    p1_range: &[f64],
    p2_range: &[f64],
    step: f64,
) -> CliResult<()> {
    let calc = PipelineCalculator::new(pipe.inputs(gas.composition()?))?;
    let range = |r: &[f64]| (r.first().copied().unwrap_or(0.0), r.last().copied().unwrap_or(0.0));
    let table = calc.flow_table(range(p1_range), range(p2_range), step)?;

    print!("{:>8}", "P1\\P2");
    for p2 in &table.p2_barg {
        print!("{:>16.1}", p2);
    }
    println!();
    for (p1, row) in table.p1_barg.iter().zip(&table.cells) {
        print!("{:>8.1}", p1);
        for cell in row {
            match cell {
                TableCell::NotApplicable => print!("{:>16}", "-"),
                TableCell::Computed {
                    flow_million_m3d,
                    line_pack_million_m3,
                } => print!("{:>8.3}/{:<7.3}", flow_million_m3d, line_pack_million_m3),
                TableCell::Failed(_) => print!("{:>16}", "err"),
            }
        }
        println!();
    }
    println!("cells: flow [million m³/d] / line pack [million m³]");
    Ok(())
}

fn cmd_validate(path: &Path) -> CliResult<()> {
    println!("Validating network: {}", path.display());
    let def = gf_project::load(path)?;
    let network = def.to_network()?;
    println!(
        "✓ Network is valid ({} nodes, {} edges)",
        network.nodes().len(),
        network.edges().len()
    );
    Ok(())
}

fn cmd_run(
    path: &Path,
    speed: SimulationSpeed,
    batches: u64,
    output: Option<&Path>,
) -> CliResult<()> {
    let network = gf_project::load_network(path)?;
    info!(
        nodes = network.nodes().len(),
        edges = network.edges().len(),
        "network loaded"
    );

    let mut sched = Scheduler::new(network);
    sched.set_speed(speed);
    let mut result = Ok(());
    for _ in 0..batches {
        match sched.run_batch() {
            Ok(BatchOutcome::Completed { .. }) => {}
            Ok(BatchOutcome::SteadyState { elapsed_s }) => {
                println!("✓ Steady state after {elapsed_s} s");
                break;
            }
            Err(e) => {
                result = Err(e);
                break;
            }
        }
    }

    let net = sched.network();
    println!("Elapsed: {} s", sched.elapsed_s());
    println!("Stored gas: {:.1} std m³", net.stored_volume());
    for node in net.nodes() {
        println!(
            "  node {:<16} P = {:>8.4} MPa  V = {:>14.1} std m³",
            node.key, node.pressure, node.volume
        );
    }
    for edge in net.edges() {
        let q_in = edge.flows().first().copied().unwrap_or(0.0);
        println!(
            "  edge {:<16} Q = {:>10.3} std m³/s  v1 = {:>7.3} m/s  v2 = {:>7.3} m/s{}",
            edge.key,
            q_in,
            edge.v1,
            edge.v2,
            if edge.disabled { "  (disabled)" } else { "" }
        );
    }

    if let Some(out) = output {
        gf_project::save_network(out, net)?;
        println!("✓ State written to {}", out.display());
    }

    result.map_err(CliError::from)
}
