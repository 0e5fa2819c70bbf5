//! Shared test fixtures for integration tests.

use cambat_sim::battery::CameraBattery;
use cambat_sim::config::ScenarioConfig;
use cambat_sim::profile::DrawProfile;
use cambat_sim::sim::engine::Engine;
use cambat_sim::sim::plan::{ConnectionPlan, ConnectionWindow, WindowTarget};
use cambat_sim::sim::types::SimConfig;

/// Default simulation configuration (48 half-hour steps, seed 42).
pub fn default_config() -> SimConfig {
    SimConfig::new(48, 30.0, 42)
}

/// Default battery (capacity 100, starting at half charge).
pub fn default_battery() -> CameraBattery {
    CameraBattery::new(50.0, 100.0)
}

/// Default draw profile matching the baseline usage table.
pub fn default_profile(config: &SimConfig) -> DrawProfile {
    DrawProfile::new(1.0, 0.5, 0.0, 0.05, config.steps, config.seed)
}

/// Default plan: morning session (steps 6-20), evening charge at
/// setting 2 (steps 36-46).
pub fn default_plan() -> ConnectionPlan {
    ConnectionPlan::new(vec![
        ConnectionWindow::new(6, 20, WindowTarget::Camera),
        ConnectionWindow::new(36, 46, WindowTarget::External { setting: 2 }),
    ])
}

/// Builds the default baseline engine used across integration tests.
pub fn default_engine() -> Engine {
    let config = default_config();
    let battery = default_battery();
    let profile = default_profile(&config);
    Engine::new(config, battery, profile, default_plan(), false)
}

/// Builds an engine from a validated scenario configuration, mirroring
/// the CLI wiring.
pub fn build_engine(cfg: &ScenarioConfig) -> Engine {
    let s = &cfg.simulation;
    let sim_config = SimConfig::new(s.steps, s.minutes_per_step, s.seed);
    let battery = CameraBattery::new(cfg.battery.starting_charge, cfg.battery.capacity);
    let profile = DrawProfile::new(
        cfg.usage.base_rate,
        cfg.usage.amp,
        cfg.usage.phase_rad,
        cfg.usage.noise_std,
        sim_config.steps,
        sim_config.seed,
    );

    let mut windows = Vec::new();
    for w in &cfg.sessions {
        windows.push(ConnectionWindow::new(
            w.start_step,
            w.end_step,
            WindowTarget::Camera,
        ));
    }
    for w in &cfg.charges {
        windows.push(ConnectionWindow::new(
            w.start_step,
            w.end_step,
            WindowTarget::External { setting: w.setting },
        ));
    }

    Engine::new(
        sim_config,
        battery,
        profile,
        ConnectionPlan::new(windows),
        cfg.usage.camera_assist,
    )
}
