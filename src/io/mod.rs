//! Telemetry input/output.

pub mod export;
