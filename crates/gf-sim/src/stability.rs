//! Periodic steady-state and over-pressure detection.

use crate::config::SimConfig;

/// Result of one call to [`StabilityMonitor::check`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StabilityVerdict {
    /// Not a check tick.
    Pending,
    /// Checked; pressures still moving (or no earlier sample to compare).
    Unchanged,
    /// Every segment pressure moved less than the threshold since the last check.
    SteadyState,
    /// Some segment reached the pressure ceiling.
    OverPressure { max_pressure_mpa: f64 },
}

impl StabilityVerdict {
    /// True when the run should stop.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::SteadyState | Self::OverPressure { .. })
    }
}

/// Compares segment pressure snapshots taken every `interval_s` seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct StabilityMonitor {
    interval_s: u64,
    threshold_mpa: f64,
    ceiling_mpa: f64,
    previous: Vec<f64>,
}

impl StabilityMonitor {
    pub fn new(interval_s: u64, threshold_mpa: f64, ceiling_mpa: f64) -> Self {
        Self {
            interval_s,
            threshold_mpa,
            ceiling_mpa,
            previous: Vec::new(),
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(
            config.stability_interval_s,
            config.stability_threshold_mpa,
            config.pressure_ceiling_mpa,
        )
    }

    /// Last stored snapshot.
    pub fn previous(&self) -> &[f64] {
        &self.previous
    }

    pub fn clear(&mut self) {
        self.previous.clear();
    }

    /// Whether `elapsed_s` is a check tick.
    pub fn is_due(&self, elapsed_s: u64) -> bool {
        self.interval_s != 0 && elapsed_s % self.interval_s == 0
    }

    /// Inspect `pressures` at `elapsed_s`.
    ///
    /// Only multiples of the interval are checked. Over-pressure wins over
    /// steadiness and does not replace the stored snapshot. Snapshots of
    /// different length never compare as steady.
    pub fn check(&mut self, elapsed_s: u64, pressures: &[f64]) -> StabilityVerdict {
        if !self.is_due(elapsed_s) {
            return StabilityVerdict::Pending;
        }

        let max = pressures.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max >= self.ceiling_mpa {
            return StabilityVerdict::OverPressure {
                max_pressure_mpa: max,
            };
        }

        let steady = !self.previous.is_empty()
            && self.previous.len() == pressures.len()
            && self
                .previous
                .iter()
                .zip(pressures)
                .all(|(old, new)| (new - old).abs() < self.threshold_mpa);

        self.previous.clear();
        self.previous.extend_from_slice(pressures);

        if steady {
            StabilityVerdict::SteadyState
        } else {
            StabilityVerdict::Unchanged
        }
    }
}

impl Default for StabilityMonitor {
    fn default() -> Self {
        Self::from_config(&SimConfig::default())
    }
}
