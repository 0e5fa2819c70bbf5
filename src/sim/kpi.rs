//! Post-hoc KPI computation from simulation results.

use std::fmt;

use serde::Serialize;

use super::types::StepResult;

/// Aggregate key performance indicators derived from a complete run.
///
/// Computed post-hoc from `Vec<StepResult>` so step data and reported
/// metrics cannot disagree.
#[derive(Debug, Clone, Serialize)]
pub struct KpiReport {
    /// Total charge removed across the run.
    pub total_drained: f32,
    /// Total charge added across the run.
    pub total_charged: f32,
    /// Stored charge after the final step.
    pub final_charge: f32,
    /// Charge fraction after the final step (0.0 to 1.0).
    pub final_soc: f32,
    /// Lowest end-of-step charge seen.
    pub min_charge: f32,
    /// Number of steps ending with an empty battery.
    pub empty_steps: usize,
    /// Number of steps ending at full capacity.
    pub full_steps: usize,
    /// Equivalent full discharge cycles (total drained / capacity).
    pub equivalent_full_cycles: f32,
}

impl KpiReport {
    /// Computes all KPIs from the complete step record vector.
    ///
    /// # Arguments
    ///
    /// * `results` - Complete simulation step results
    /// * `capacity` - Battery capacity for full/cycle accounting
    ///
    /// # Returns
    ///
    /// A `KpiReport` with all fields populated; zeros for an empty run.
    pub fn from_results(results: &[StepResult], capacity: f32) -> Self {
        if results.is_empty() {
            return Self {
                total_drained: 0.0,
                total_charged: 0.0,
                final_charge: 0.0,
                final_soc: 0.0,
                min_charge: 0.0,
                empty_steps: 0,
                full_steps: 0,
                equivalent_full_cycles: 0.0,
            };
        }

        let mut total_drained = 0.0_f32;
        let mut total_charged = 0.0_f32;
        let mut min_charge = f32::INFINITY;
        let mut empty_steps = 0_usize;
        let mut full_steps = 0_usize;

        for r in results {
            total_drained += r.drained;
            total_charged += r.charged;
            min_charge = min_charge.min(r.charge);

            if r.charge <= 0.0 {
                empty_steps += 1;
            }
            if capacity > 0.0 && r.charge >= capacity {
                full_steps += 1;
            }
        }

        let last = &results[results.len() - 1];
        let cycles = if capacity > 0.0 {
            total_drained / capacity
        } else {
            0.0
        };

        Self {
            total_drained,
            total_charged,
            final_charge: last.charge,
            final_soc: last.soc,
            min_charge,
            empty_steps,
            full_steps,
            equivalent_full_cycles: cycles,
        }
    }
}

impl fmt::Display for KpiReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- KPI Report ---")?;
        writeln!(f, "Total drained:      {:.2}", self.total_drained)?;
        writeln!(f, "Total charged:      {:.2}", self.total_charged)?;
        writeln!(
            f,
            "Final charge:       {:.2} (SoC={:.1}%)",
            self.final_charge,
            self.final_soc * 100.0
        )?;
        writeln!(f, "Minimum charge:     {:.2}", self.min_charge)?;
        writeln!(
            f,
            "Steps empty/full:   {}/{}",
            self.empty_steps, self.full_steps
        )?;
        write!(
            f,
            "Equivalent cycles:  {:.2}",
            self.equivalent_full_cycles
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battery::Connection;

    fn make_result(drained: f32, charged: f32, charge: f32) -> StepResult {
        StepResult {
            step: 0,
            time_min: 0.0,
            connection: Connection::Detached,
            draw_rate: 1.0,
            charger_setting: 0,
            drained,
            charged,
            charge,
            soc: charge / 100.0,
            cumulative_drain: drained,
        }
    }

    #[test]
    fn totals_and_final_values() {
        let results = vec![
            make_result(10.0, 0.0, 40.0),
            make_result(5.0, 0.0, 35.0),
            make_result(0.0, 20.0, 55.0),
        ];
        let kpi = KpiReport::from_results(&results, 100.0);
        assert_eq!(kpi.total_drained, 15.0);
        assert_eq!(kpi.total_charged, 20.0);
        assert_eq!(kpi.final_charge, 55.0);
        assert_eq!(kpi.min_charge, 35.0);
    }

    #[test]
    fn empty_and_full_step_counting() {
        let results = vec![
            make_result(0.0, 0.0, 0.0),
            make_result(0.0, 0.0, 100.0),
            make_result(0.0, 0.0, 0.0),
            make_result(0.0, 0.0, 50.0),
        ];
        let kpi = KpiReport::from_results(&results, 100.0);
        assert_eq!(kpi.empty_steps, 2);
        assert_eq!(kpi.full_steps, 1);
    }

    #[test]
    fn equivalent_cycles_scale_with_capacity() {
        let results = vec![make_result(25.0, 0.0, 0.0); 4];
        let kpi = KpiReport::from_results(&results, 50.0);
        assert_eq!(kpi.equivalent_full_cycles, 2.0);
    }

    #[test]
    fn empty_results() {
        let kpi = KpiReport::from_results(&[], 100.0);
        assert_eq!(kpi.total_drained, 0.0);
        assert_eq!(kpi.min_charge, 0.0);
        assert_eq!(kpi.empty_steps, 0);
    }

    #[test]
    fn display_does_not_panic() {
        let kpi = KpiReport::from_results(&[make_result(1.0, 2.0, 3.0)], 100.0);
        let s = format!("{kpi}");
        assert!(s.contains("KPI Report"));
    }
}
