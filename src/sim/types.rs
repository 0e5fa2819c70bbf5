//! Core simulation types: configuration and per-step records.

use std::fmt;

use serde::Serialize;

use crate::battery::Connection;

/// Centralized simulation configuration.
///
/// The engine and every profile reference this struct for timing
/// parameters, so step counts and step lengths are defined in one place.
///
/// # Examples
///
/// ```
/// use cambat_sim::sim::types::SimConfig;
///
/// let cfg = SimConfig::new(48, 30.0, 42);
/// assert_eq!(cfg.total_minutes(), 1440.0);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct SimConfig {
    /// Number of simulation steps.
    pub steps: usize,
    /// Simulated duration of one step in minutes.
    pub minutes_per_step: f32,
    /// Master random seed for reproducibility.
    pub seed: u64,
}

impl SimConfig {
    /// Creates a new simulation configuration.
    ///
    /// # Arguments
    ///
    /// * `steps` - Number of steps to simulate (must be > 0)
    /// * `minutes_per_step` - Duration of one step in minutes (must be > 0)
    /// * `seed` - Master random seed
    ///
    /// # Panics
    ///
    /// Panics if `steps` is zero or `minutes_per_step` is not positive.
    pub fn new(steps: usize, minutes_per_step: f32, seed: u64) -> Self {
        assert!(steps > 0, "steps must be > 0");
        assert!(minutes_per_step > 0.0, "minutes_per_step must be > 0");
        Self {
            steps,
            minutes_per_step,
            seed,
        }
    }

    /// Total simulated time across all steps, in minutes.
    pub fn total_minutes(&self) -> f32 {
        self.steps as f32 * self.minutes_per_step
    }
}

/// Complete record of one simulation step.
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    /// Step index.
    pub step: usize,
    /// Simulated time at the start of the step, in minutes.
    pub time_min: f32,
    /// Connection state during the step.
    pub connection: Connection,
    /// Camera draw rate applied this step (units per minute).
    pub draw_rate: f32,
    /// Charger setting during the step.
    pub charger_setting: u8,
    /// Charge removed this step.
    pub drained: f32,
    /// Charge added this step.
    pub charged: f32,
    /// Stored charge after the step.
    pub charge: f32,
    /// Charge as a fraction of capacity after the step (0.0 to 1.0).
    pub soc: f32,
    /// Total drain since the monitor was last reset.
    pub cumulative_drain: f32,
}

impl fmt::Display for StepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>3} ({:>6.1} min) | {:<8} set={} draw={:.2}/min | \
             -{:.2} +{:.2} | charge={:>6.2} (SoC={:>5.1}%) | drained={:.2}",
            self.step,
            self.time_min,
            self.connection,
            self.charger_setting,
            self.draw_rate,
            self.drained,
            self.charged,
            self.charge,
            self.soc * 100.0,
            self.cumulative_drain,
        )
    }
}
