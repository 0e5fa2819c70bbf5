//! API response and query types.
//!
//! Field names follow the CSV schema v1 conventions so the two export
//! surfaces stay consistent.

use serde::{Deserialize, Serialize};

use crate::battery::Connection;
use crate::sim::kpi::KpiReport;
use crate::sim::types::{SimConfig, StepResult};

/// Combined state response: config, KPIs, and latest telemetry record.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    /// Simulation configuration.
    pub config: SimConfig,
    /// Aggregate KPI report.
    pub kpi: KpiReport,
    /// Most recent telemetry record (last step), if any steps ran.
    pub latest_step: Option<TelemetryRecord>,
}

/// Single telemetry record using CSV schema v1 field names.
#[derive(Debug, Serialize)]
pub struct TelemetryRecord {
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
    /// Charge fraction after the step (0.0 to 1.0).
    pub soc: f32,
    /// Total drain since the monitor was last reset.
    pub cumulative_drain: f32,
}

impl From<&StepResult> for TelemetryRecord {
    fn from(r: &StepResult) -> Self {
        Self {
            step: r.step,
            time_min: r.time_min,
            connection: r.connection,
            draw_rate: r.draw_rate,
            charger_setting: r.charger_setting,
            drained: r.drained,
            charged: r.charged,
            charge: r.charge,
            soc: r.soc,
            cumulative_drain: r.cumulative_drain,
        }
    }
}

/// Optional range query parameters for the telemetry endpoint.
#[derive(Debug, Deserialize)]
pub struct TelemetryQuery {
    /// Start step (inclusive).
    pub from: Option<usize>,
    /// End step (inclusive).
    pub to: Option<usize>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
