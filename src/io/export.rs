//! CSV export for simulation step results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::StepResult;

/// Schema v1 column header for CSV telemetry export.
const HEADER: &str = "step,time_min,connection,draw_rate,charger_setting,\
                      drained,charged,charge,soc,cumulative_drain";

/// Exports simulation results to a CSV file at the given path.
///
/// Writes a header row followed by one data row per step using the
/// schema v1 column layout. Produces deterministic output for identical
/// inputs.
///
/// # Arguments
///
/// * `results` - Complete simulation step results
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(results: &[StepResult], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(results, buf)
}

/// Writes simulation results as CSV to any writer.
///
/// # Arguments
///
/// * `results` - Complete simulation step results
/// * `writer` - Destination implementing `Write`
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(results: &[StepResult], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    // Header
    wtr.write_record(HEADER.split(',').map(str::trim))?;

    // Data rows
    for r in results {
        wtr.write_record(&[
            r.step.to_string(),
            format!("{:.2}", r.time_min),
            r.connection.to_string(),
            format!("{:.4}", r.draw_rate),
            r.charger_setting.to_string(),
            format!("{:.4}", r.drained),
            format!("{:.4}", r.charged),
            format!("{:.4}", r.charge),
            format!("{:.4}", r.soc),
            format!("{:.4}", r.cumulative_drain),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
