//! Simulation clock: batches of 1 s ticks, stop conditions, reset.

use std::fmt;
use std::str::FromStr;

use gf_fluids::QuickZ;
use gf_network::Network;
use tracing::{debug, info, warn};

use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::stability::{StabilityMonitor, StabilityVerdict};
use crate::transport::advance_with;

/// Simulated time per batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SimulationSpeed {
    #[default]
    Second,
    Minute,
    Hour,
}

impl SimulationSpeed {
    pub fn ticks_per_batch(self) -> u64 {
        match self {
            SimulationSpeed::Second => 1,
            SimulationSpeed::Minute => 60,
            SimulationSpeed::Hour => 3600,
        }
    }
}

impl FromStr for SimulationSpeed {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "second" | "s" => Ok(SimulationSpeed::Second),
            "minute" | "min" => Ok(SimulationSpeed::Minute),
            "hour" | "h" => Ok(SimulationSpeed::Hour),
            _ => Err(SimError::InvalidArg {
                what: "speed must be second, minute or hour",
            }),
        }
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StopReason {
    SteadyState,
    OverPressure { max_pressure_mpa: f64 },
    /// Stopped by the caller.
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RunStatus {
    /// Fresh or just reset.
    #[default]
    Idle,
    Running,
    Stopped(StopReason),
}

/// Explicit clock state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimulationState {
    /// Simulated seconds since the last reset.
    pub elapsed_s: u64,
    pub speed: SimulationSpeed,
    pub status: RunStatus,
    pub monitor: StabilityMonitor,
}

impl SimulationState {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            monitor: StabilityMonitor::from_config(config),
            ..Self::default()
        }
    }
}

/// How a batch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// All `ticks` ran (0 when the clock is stopped).
    Completed { ticks: u64 },
    /// The monitor found a steady state; the clock is now stopped.
    SteadyState { elapsed_s: u64 },
}

/// Called before every tick with the elapsed seconds.
pub type TickHook = Box<dyn FnMut(u64, &mut Network) + Send>;

/// Drives a [`Network`] through batches of ticks.
pub struct Scheduler {
    network: Network,
    quick_z: QuickZ,
    config: SimConfig,
    state: SimulationState,
    hook: Option<TickHook>,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("hook", &self.hook.is_some())
            .finish_non_exhaustive()
    }
}

impl Scheduler {
    pub fn new(network: Network) -> Self {
        Self::with_config(network, SimConfig::default(), QuickZ::default())
    }

    pub fn with_config(network: Network, config: SimConfig, quick_z: QuickZ) -> Self {
        Self {
            network,
            quick_z,
            state: SimulationState::new(&config),
            config,
            hook: None,
        }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn elapsed_s(&self) -> u64 {
        self.state.elapsed_s
    }

    pub fn set_speed(&mut self, speed: SimulationSpeed) {
        self.state.speed = speed;
    }

    /// Install a between-tick hook, replacing any previous one.
    pub fn set_hook(&mut self, hook: impl FnMut(u64, &mut Network) + Send + 'static) {
        self.hook = Some(Box::new(hook));
    }

    /// Clear a previous stop so batches run again.
    pub fn start(&mut self) {
        self.state.status = RunStatus::Running;
    }

    pub fn stop(&mut self) {
        self.state.status = RunStatus::Stopped(StopReason::User);
    }

    /// One simulated second: hook, transport, clock, stability check.
    pub fn tick(&mut self) -> StabilityVerdict {
        if let Some(hook) = self.hook.as_mut() {
            hook(self.state.elapsed_s, &mut self.network);
        }
        advance_with(&mut self.network, &self.quick_z, &self.config);
        self.state.elapsed_s += 1;

        let elapsed = self.state.elapsed_s;
        if self.state.monitor.is_due(elapsed) {
            let pressures = self.network.segment_pressures();
            self.state.monitor.check(elapsed, &pressures)
        } else {
            StabilityVerdict::Pending
        }
    }

    /// Run one batch of ticks at the current speed.
    ///
    /// Stops early on a steady state or over-pressure; the latter is returned
    /// as [`SimError::OverPressure`]. A stopped clock runs nothing.
    pub fn run_batch(&mut self) -> SimResult<BatchOutcome> {
        if let RunStatus::Stopped(_) = self.state.status {
            return Ok(BatchOutcome::Completed { ticks: 0 });
        }
        self.state.status = RunStatus::Running;

        let ticks = self.state.speed.ticks_per_batch();
        for _ in 0..ticks {
            match self.tick() {
                StabilityVerdict::Pending | StabilityVerdict::Unchanged => {}
                StabilityVerdict::SteadyState => {
                    let elapsed_s = self.state.elapsed_s;
                    info!(elapsed_s, "steady state reached");
                    self.state.status = RunStatus::Stopped(StopReason::SteadyState);
                    return Ok(BatchOutcome::SteadyState { elapsed_s });
                }
                StabilityVerdict::OverPressure { max_pressure_mpa } => {
                    let elapsed_s = self.state.elapsed_s;
                    warn!(elapsed_s, max_pressure_mpa, "pressure ceiling reached");
                    self.state.status =
                        RunStatus::Stopped(StopReason::OverPressure { max_pressure_mpa });
                    return Err(SimError::OverPressure {
                        max_pressure_mpa,
                        elapsed_s,
                    });
                }
            }
        }

        debug!(
            ticks,
            elapsed_s = self.state.elapsed_s,
            stored = self.network.stored_volume(),
            "batch complete"
        );
        Ok(BatchOutcome::Completed { ticks })
    }

    /// Zero the clock and all segment state. Node pressure, injection and
    /// fixed flags survive.
    pub fn reset(&mut self) {
        self.network.reset_state();
        self.state.elapsed_s = 0;
        self.state.status = RunStatus::Idle;
        self.state.monitor.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gf_network::{NetworkBuilder, PipeSpec};
    use std::sync::{Arc, Mutex};

    fn line() -> Network {
        let mut builder = NetworkBuilder::new();
        let a = builder.add_node("A");
        let b = builder.add_node("B");
        builder.add_edge("A-B", a, b, PipeSpec::new(40.0, 500.0));
        builder.build().unwrap()
    }

    fn quick_checks() -> SimConfig {
        SimConfig {
            stability_interval_s: 10,
            ..SimConfig::default()
        }
    }

    #[test]
    fn speed_ticks() {
        assert_eq!(SimulationSpeed::Second.ticks_per_batch(), 1);
        assert_eq!(SimulationSpeed::Minute.ticks_per_batch(), 60);
        assert_eq!(SimulationSpeed::Hour.ticks_per_batch(), 3600);
        assert_eq!("Minute".parse::<SimulationSpeed>().unwrap(), SimulationSpeed::Minute);
        assert!("week".parse::<SimulationSpeed>().is_err());
    }

    #[test]
    fn batch_advances_clock() {
        let mut sched = Scheduler::new(line());
        sched.set_speed(SimulationSpeed::Minute);
        let outcome = sched.run_batch().unwrap();
        assert_eq!(outcome, BatchOutcome::Completed { ticks: 60 });
        assert_eq!(sched.elapsed_s(), 60);
        assert_eq!(sched.state().status, RunStatus::Running);
    }

    #[test]
    fn hook_sees_elapsed_before_each_tick() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut sched = Scheduler::new(line());
        sched.set_hook(move |elapsed, _net| sink.lock().unwrap().push(elapsed));
        sched.set_speed(SimulationSpeed::Minute);
        sched.run_batch().unwrap();
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 60);
        assert_eq!(seen[0], 0);
        assert_eq!(seen[59], 59);
    }

    #[test]
    fn hook_can_edit_the_network() {
        let mut sched = Scheduler::new(line());
        sched.set_hook(|elapsed, net| {
            if elapsed == 0
                && let Ok(b) = net.node_id("B")
                && let Some(node) = net.node_mut(b)
            {
                node.set_injection(250.0);
            }
        });
        sched.run_batch().unwrap();
        let net = sched.network();
        let b = net.node_id("B").unwrap();
        assert_eq!(net.node(b).unwrap().injection, 250.0);
        assert!(net.stored_volume() > 0.0);
    }

    #[test]
    fn quiet_network_reaches_steady_state() {
        let mut sched = Scheduler::with_config(line(), quick_checks(), QuickZ::default());
        sched.set_speed(SimulationSpeed::Minute);
        let outcome = sched.run_batch().unwrap();
        assert_eq!(outcome, BatchOutcome::SteadyState { elapsed_s: 20 });
        assert_eq!(
            sched.state().status,
            RunStatus::Stopped(StopReason::SteadyState)
        );
        // Stopped clocks do not advance.
        assert_eq!(
            sched.run_batch().unwrap(),
            BatchOutcome::Completed { ticks: 0 }
        );
        assert_eq!(sched.elapsed_s(), 20);
    }

    #[test]
    fn over_pressure_stops_the_run() {
        let mut net = line();
        let a = net.node_id("A").unwrap();
        net.node_mut(a).unwrap().fix_pressure(150.0);
        let config = SimConfig {
            stability_interval_s: 1,
            ..SimConfig::default()
        };
        let mut sched = Scheduler::with_config(net, config, QuickZ::default());
        sched.set_speed(SimulationSpeed::Minute);

        let err = sched.run_batch().unwrap_err();
        assert!(matches!(err, SimError::OverPressure { elapsed_s: 1, .. }));
        assert!(matches!(
            sched.state().status,
            RunStatus::Stopped(StopReason::OverPressure { .. })
        ));
    }

    #[test]
    fn reset_preserves_node_inputs() {
        let mut net = line();
        let a = net.node_id("A").unwrap();
        let b = net.node_id("B").unwrap();
        net.node_mut(a).unwrap().fix_pressure(5.0);
        net.node_mut(b).unwrap().set_injection(-1.0);
        let mut sched = Scheduler::new(net);
        sched.set_speed(SimulationSpeed::Minute);
        sched.run_batch().unwrap();
        assert!(sched.network().stored_volume() > 0.0);

        sched.reset();

        let net = sched.network();
        assert_eq!(sched.elapsed_s(), 0);
        assert_eq!(sched.state().status, RunStatus::Idle);
        assert_eq!(net.stored_volume(), 0.0);
        assert!(net.edges()[0].flows().iter().all(|q| *q == 0.0));
        assert!(net.node(a).unwrap().pressure_fixed);
        assert_eq!(net.node(a).unwrap().pressure, 5.0);
        assert_eq!(net.node(b).unwrap().injection, -1.0);
    }

    #[test]
    fn user_stop_and_restart() {
        let mut sched = Scheduler::new(line());
        sched.stop();
        assert_eq!(
            sched.run_batch().unwrap(),
            BatchOutcome::Completed { ticks: 0 }
        );
        sched.start();
        assert_eq!(
            sched.run_batch().unwrap(),
            BatchOutcome::Completed { ticks: 1 }
        );
    }
}
