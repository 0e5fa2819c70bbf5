//! Camera battery model: connection state, charge/drain arithmetic, and
//! drain monitoring.

use serde::Serialize;
use std::fmt;

/// Number of external charger settings. Valid settings are numbered
/// between 0 inclusive and `NUM_CHARGER_SETTINGS` exclusive.
pub const NUM_CHARGER_SETTINGS: u8 = 4;

/// Charge gained per minute per setting-unit while charging.
pub const CHARGE_RATE: f32 = 2.0;

/// Camera power consumption at construction, in energy units per minute.
pub const DEFAULT_CAMERA_POWER_CONSUMPTION: f32 = 1.0;

/// Which single device the battery is currently attached to.
///
/// A battery is attached to the camera, to the external charger, or to
/// neither — never to both. Representing the connection as one enum
/// makes that exclusivity structural instead of a convention over flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Connection {
    /// Attached to neither device.
    Detached,
    /// Powering the camera.
    Camera,
    /// Docked on the external charger.
    External,
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Connection::Detached => "detached",
            Connection::Camera => "camera",
            Connection::External => "external",
        };
        f.pad(name)
    }
}

/// A simulated camera battery.
///
/// `CameraBattery` tracks stored charge between 0 and a fixed capacity,
/// the current connection, the external charger's setting, and the total
/// energy drained since the monitor was last reset. Time-stepped
/// operations take a duration in minutes and return the charge delta
/// they actually applied after clamping.
///
/// Every operation is infallible: numeric inputs are accepted as given,
/// and clamping at the charge bounds is the only corrective behavior.
///
/// # Examples
///
/// ```
/// use cambat_sim::battery::CameraBattery;
///
/// let mut battery = CameraBattery::new(50.0, 100.0);
/// battery.attach_camera();
/// let drained = battery.drain(10.0);
/// assert_eq!(drained, 10.0);
/// assert_eq!(battery.charge(), 40.0);
/// ```
#[derive(Debug, Clone)]
pub struct CameraBattery {
    /// Current stored charge, kept within `[0, capacity]`.
    charge: f32,
    /// Maximum charge the battery can hold.
    capacity: f32,
    /// External charger setting, in `0..NUM_CHARGER_SETTINGS`.
    charger_setting: u8,
    /// Current connection state.
    connection: Connection,
    /// Total charge drained since construction or the last monitor reset.
    cumulative_drain: f32,
    /// Rate at which the camera draws charge, in units per minute.
    camera_power_consumption: f32,
}

impl CameraBattery {
    /// Creates a new battery simulation.
    ///
    /// The starting charge is clamped so it never exceeds the capacity;
    /// no other validation is applied. The battery starts detached with
    /// the charger setting at 0 and the drain monitor at zero.
    ///
    /// # Arguments
    ///
    /// * `starting_charge` - Initial stored charge
    /// * `capacity` - Maximum charge the battery can hold
    pub fn new(starting_charge: f32, capacity: f32) -> Self {
        Self {
            charge: starting_charge.min(capacity),
            capacity,
            charger_setting: 0,
            connection: Connection::Detached,
            cumulative_drain: 0.0,
            camera_power_consumption: DEFAULT_CAMERA_POWER_CONSUMPTION,
        }
    }

    /// Registers one press of the external charger's setting button.
    ///
    /// The setting advances by one and wraps back to 0 past the maximum.
    /// There is no direct setter; repeated presses are the only way the
    /// setting changes.
    pub fn press_setting_button(&mut self) {
        self.charger_setting = (self.charger_setting + 1) % NUM_CHARGER_SETTINGS;
    }

    /// Moves the battery onto the external charger.
    pub fn attach_external(&mut self) {
        self.connection = Connection::External;
    }

    /// Inserts the battery into the camera.
    pub fn attach_camera(&mut self) {
        self.connection = Connection::Camera;
    }

    /// Removes the battery from whichever device holds it.
    pub fn detach(&mut self) {
        self.connection = Connection::Detached;
    }

    /// Charges the battery through the camera for the given number of
    /// minutes.
    ///
    /// Has an effect only while attached to the camera; otherwise the
    /// call is a gated no-op returning 0. The charge never exceeds the
    /// capacity.
    ///
    /// # Returns
    ///
    /// The charge actually added after clamping.
    pub fn charge_from_camera(&mut self, minutes: f32) -> f32 {
        let old_charge = self.charge;
        self.charge = (self.charge + minutes * CHARGE_RATE * self.camera_gate()).min(self.capacity);
        self.charge - old_charge
    }

    /// Drains the battery through the camera for the given number of
    /// minutes.
    ///
    /// Has an effect only while attached to the camera. The charge is
    /// clamped at 0, and the actual decrease is added to the drain
    /// monitor.
    ///
    /// # Returns
    ///
    /// The charge actually removed, always >= 0.
    pub fn drain(&mut self, minutes: f32) -> f32 {
        let old_charge = self.charge;
        self.charge = (self.charge - minutes * self.camera_power_consumption * self.camera_gate())
            .max(0.0);
        let drained = old_charge - self.charge;
        self.cumulative_drain += drained;
        drained
    }

    /// Charges the battery on the external charger for the given number
    /// of minutes.
    ///
    /// The rate scales with the current charger setting, so at setting 0
    /// the charge is unchanged even while docked. Has an effect only
    /// while attached to the external charger; the charge never exceeds
    /// the capacity.
    ///
    /// # Returns
    ///
    /// The charge actually added after clamping.
    pub fn charge_from_external(&mut self, minutes: f32) -> f32 {
        let old_charge = self.charge;
        self.charge = (self.charge
            + minutes * CHARGE_RATE * f32::from(self.charger_setting) * self.external_gate())
        .min(self.capacity);
        self.charge - old_charge
    }

    /// Resets the drain monitor to zero without touching the charge.
    pub fn reset_drain_monitor(&mut self) {
        self.cumulative_drain = 0.0;
    }

    /// Total charge drained since construction or the last monitor reset.
    pub fn cumulative_drain(&self) -> f32 {
        self.cumulative_drain
    }

    /// Maximum charge the battery can hold.
    pub fn capacity(&self) -> f32 {
        self.capacity
    }

    /// Current stored charge.
    pub fn charge(&self) -> f32 {
        self.charge
    }

    /// Charge available to the camera: the stored charge while attached
    /// to the camera, 0 otherwise.
    pub fn camera_charge(&self) -> f32 {
        self.charge * self.camera_gate()
    }

    /// Rate at which the camera draws charge, in units per minute.
    pub fn camera_power_consumption(&self) -> f32 {
        self.camera_power_consumption
    }

    /// Current external charger setting.
    pub fn charger_setting(&self) -> u8 {
        self.charger_setting
    }

    /// Current connection state.
    pub fn connection(&self) -> Connection {
        self.connection
    }

    /// Overwrites the camera's power consumption rate. No bounds are
    /// enforced.
    pub fn set_camera_power_consumption(&mut self, rate: f32) {
        self.camera_power_consumption = rate;
    }

    /// 1.0 while attached to the camera, 0.0 otherwise.
    fn camera_gate(&self) -> f32 {
        match self.connection {
            Connection::Camera => 1.0,
            _ => 0.0,
        }
    }

    /// 1.0 while attached to the external charger, 0.0 otherwise.
    fn external_gate(&self) -> f32 {
        match self.connection {
            Connection::External => 1.0,
            _ => 0.0,
        }
    }
}
