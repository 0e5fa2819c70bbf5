//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::battery::NUM_CHARGER_SETTINGS;

/// Top-level scenario configuration parsed from TOML.
///
/// All tables have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Simulation timing and global parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Battery parameters.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Camera usage parameters.
    #[serde(default)]
    pub usage: UsageConfig,
    /// Shooting-session windows (battery in the camera).
    #[serde(default)]
    pub sessions: Vec<SessionWindowConfig>,
    /// External-charger windows.
    #[serde(default)]
    pub charges: Vec<ChargeWindowConfig>,
}

/// Simulation timing and global parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of steps to simulate (must be > 0).
    pub steps: usize,
    /// Simulated duration of one step in minutes (must be > 0).
    pub minutes_per_step: f32,
    /// Master random seed.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps: 48,
            minutes_per_step: 30.0,
            seed: 42,
        }
    }
}

/// Battery parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Maximum charge the battery can hold.
    pub capacity: f32,
    /// Charge at the start of the scenario (clamped to capacity).
    pub starting_charge: f32,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            capacity: 100.0,
            starting_charge: 50.0,
        }
    }
}

/// Camera usage parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UsageConfig {
    /// Baseline draw rate (units per minute).
    pub base_rate: f32,
    /// Sinusoidal swing amplitude (units per minute).
    pub amp: f32,
    /// Phase offset (radians).
    pub phase_rad: f32,
    /// Gaussian noise standard deviation (units per minute).
    pub noise_std: f32,
    /// Whether camera-side charging runs during sessions.
    pub camera_assist: bool,
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            base_rate: 1.0,
            amp: 0.5,
            phase_rad: 0.0,
            noise_std: 0.05,
            camera_assist: false,
        }
    }
}

/// One shooting-session window over `[start_step, end_step)`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionWindowConfig {
    /// Start step (inclusive).
    pub start_step: usize,
    /// End step (exclusive).
    pub end_step: usize,
}

/// One external-charger window over `[start_step, end_step)`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChargeWindowConfig {
    /// Start step (inclusive).
    pub start_step: usize,
    /// End step (exclusive).
    pub end_step: usize,
    /// Charger setting, in `0..NUM_CHARGER_SETTINGS`.
    pub setting: u8,
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.capacity"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: a morning shoot and an evening
    /// recharge over one simulated day at half-hour resolution.
    pub fn baseline() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            battery: BatteryConfig::default(),
            usage: UsageConfig::default(),
            sessions: vec![SessionWindowConfig {
                start_step: 6,
                end_step: 20,
            }],
            charges: vec![ChargeWindowConfig {
                start_step: 36,
                end_step: 46,
                setting: 2,
            }],
        }
    }

    /// Returns the field-day preset: heavy all-day shooting with a short
    /// midday fast charge at the top setting.
    pub fn field_day() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            battery: BatteryConfig {
                capacity: 120.0,
                starting_charge: 120.0,
            },
            usage: UsageConfig {
                base_rate: 1.6,
                amp: 0.8,
                noise_std: 0.1,
                ..UsageConfig::default()
            },
            sessions: vec![
                SessionWindowConfig {
                    start_step: 2,
                    end_step: 24,
                },
                SessionWindowConfig {
                    start_step: 26,
                    end_step: 44,
                },
            ],
            charges: vec![ChargeWindowConfig {
                start_step: 24,
                end_step: 26,
                setting: 3,
            }],
        }
    }

    /// Returns the trickle-topup preset: a depleted battery left on the
    /// charger at the lowest active setting for the whole scenario.
    pub fn trickle_topup() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            battery: BatteryConfig {
                capacity: 100.0,
                starting_charge: 20.0,
            },
            usage: UsageConfig::default(),
            sessions: vec![],
            charges: vec![ChargeWindowConfig {
                start_step: 0,
                end_step: 48,
                setting: 1,
            }],
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "field_day", "trickle_topup"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "field_day" => Ok(Self::field_day()),
            "trickle_topup" => Ok(Self::trickle_topup()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is
    /// invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown
    /// fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.simulation;

        if s.steps == 0 {
            errors.push(ConfigError {
                field: "simulation.steps".into(),
                message: "must be > 0".into(),
            });
        }
        if s.minutes_per_step <= 0.0 {
            errors.push(ConfigError {
                field: "simulation.minutes_per_step".into(),
                message: "must be > 0".into(),
            });
        }

        let bat = &self.battery;
        if bat.capacity <= 0.0 {
            errors.push(ConfigError {
                field: "battery.capacity".into(),
                message: "must be > 0".into(),
            });
        }
        if bat.starting_charge < 0.0 {
            errors.push(ConfigError {
                field: "battery.starting_charge".into(),
                message: "must be >= 0".into(),
            });
        }

        let usage = &self.usage;
        if usage.base_rate < 0.0 {
            errors.push(ConfigError {
                field: "usage.base_rate".into(),
                message: "must be >= 0".into(),
            });
        }
        if usage.noise_std < 0.0 {
            errors.push(ConfigError {
                field: "usage.noise_std".into(),
                message: "must be >= 0".into(),
            });
        }

        for (i, w) in self.sessions.iter().enumerate() {
            self.validate_window(&mut errors, &format!("sessions[{i}]"), w.start_step, w.end_step);
        }
        for (i, w) in self.charges.iter().enumerate() {
            self.validate_window(&mut errors, &format!("charges[{i}]"), w.start_step, w.end_step);
            if w.setting >= NUM_CHARGER_SETTINGS {
                errors.push(ConfigError {
                    field: format!("charges[{i}].setting"),
                    message: format!("must be < {NUM_CHARGER_SETTINGS}"),
                });
            }
        }

        self.validate_overlaps(&mut errors);

        errors
    }

    fn validate_window(
        &self,
        errors: &mut Vec<ConfigError>,
        path: &str,
        start_step: usize,
        end_step: usize,
    ) {
        if start_step >= end_step {
            errors.push(ConfigError {
                field: format!("{path}.start_step"),
                message: "must be < end_step".into(),
            });
        }
        if end_step > self.simulation.steps {
            errors.push(ConfigError {
                field: format!("{path}.end_step"),
                message: "must be <= simulation.steps".into(),
            });
        }
    }

    /// A battery cannot be in two places at once, so any two windows of
    /// either kind must not overlap.
    fn validate_overlaps(&self, errors: &mut Vec<ConfigError>) {
        let mut spans: Vec<(usize, usize, String)> = Vec::new();
        for (i, w) in self.sessions.iter().enumerate() {
            spans.push((w.start_step, w.end_step, format!("sessions[{i}]")));
        }
        for (i, w) in self.charges.iter().enumerate() {
            spans.push((w.start_step, w.end_step, format!("charges[{i}]")));
        }
        spans.sort_by_key(|(start, _, _)| *start);

        for pair in spans.windows(2) {
            let (_, prev_end, prev_path) = &pair[0];
            let (next_start, _, next_path) = &pair[1];
            if next_start < prev_end {
                errors.push(ConfigError {
                    field: next_path.clone(),
                    message: format!("overlaps {prev_path}"),
                });
            }
        }
    }
}
