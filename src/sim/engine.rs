//! Simulation engine that drives the battery through a connection plan.

use crate::battery::CameraBattery;
use crate::profile::DrawProfile;

use super::clock::{Clock, Tick};
use super::plan::{ConnectionPlan, WindowTarget};
use super::types::{SimConfig, StepResult};

/// Simulation engine owning the battery, draw profile, and plan.
///
/// Each step applies the scheduled connection transition, samples the
/// camera's draw rate, and invokes every time-stepped battery operation.
/// The operations are connection-gated inside the model, so the engine
/// calls them unconditionally and lets the inactive ones return zero.
pub struct Engine {
    config: SimConfig,
    battery: CameraBattery,
    profile: DrawProfile,
    plan: ConnectionPlan,
    /// Whether camera-side charging runs during shooting sessions.
    camera_assist: bool,
}

impl Engine {
    /// Creates a new simulation engine.
    ///
    /// # Arguments
    ///
    /// * `config` - Simulation configuration
    /// * `battery` - Battery under simulation
    /// * `profile` - Camera draw-rate profile
    /// * `plan` - Scheduled connection windows
    /// * `camera_assist` - Invoke camera-side charging during sessions
    pub fn new(
        config: SimConfig,
        battery: CameraBattery,
        profile: DrawProfile,
        plan: ConnectionPlan,
        camera_assist: bool,
    ) -> Self {
        Self {
            config,
            battery,
            profile,
            plan,
            camera_assist,
        }
    }

    /// The simulation configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The battery in its current state.
    pub fn battery(&self) -> &CameraBattery {
        &self.battery
    }

    /// Executes one simulation step and returns its record.
    ///
    /// # Arguments
    ///
    /// * `tick` - The step index and start time to simulate
    pub fn step(&mut self, tick: Tick) -> StepResult {
        let minutes = self.config.minutes_per_step;

        // 1. Apply the scheduled connection transition
        match self.plan.target_at(tick.step) {
            Some(WindowTarget::Camera) => self.battery.attach_camera(),
            Some(WindowTarget::External { setting }) => {
                self.battery.attach_external();
                // The setting only moves through button presses; at most
                // one full wrap reaches any valid target.
                while self.battery.charger_setting() != setting {
                    self.battery.press_setting_button();
                }
            }
            None => self.battery.detach(),
        }

        // 2. Sample the camera's draw rate for this step
        let draw_rate = self.profile.rate_at(tick.step);
        self.battery.set_camera_power_consumption(draw_rate);

        // 3. Run the gated operations; at most one connection is live
        let drained = self.battery.drain(minutes);
        let mut charged = self.battery.charge_from_external(minutes);
        if self.camera_assist {
            charged += self.battery.charge_from_camera(minutes);
        }

        let capacity = self.battery.capacity();
        let soc = if capacity > 0.0 {
            self.battery.charge() / capacity
        } else {
            0.0
        };

        StepResult {
            step: tick.step,
            time_min: tick.time_min,
            connection: self.battery.connection(),
            draw_rate,
            charger_setting: self.battery.charger_setting(),
            drained,
            charged,
            charge: self.battery.charge(),
            soc,
            cumulative_drain: self.battery.cumulative_drain(),
        }
    }

    /// Runs the full scenario and returns one record per step.
    pub fn run(&mut self) -> Vec<StepResult> {
        let mut clock = Clock::new(self.config.steps, self.config.minutes_per_step);
        let mut results = Vec::with_capacity(self.config.steps);
        clock.run(|tick| results.push(self.step(tick)));
        results
    }
}
