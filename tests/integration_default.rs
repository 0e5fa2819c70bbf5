//! Integration tests for the default simulation scenario.

mod common;

use cambat_sim::battery::Connection;
use cambat_sim::sim::kpi::KpiReport;

#[test]
fn full_run_produces_correct_step_count() {
    let mut engine = common::default_engine();
    let results = engine.run();
    assert_eq!(results.len(), 48);
}

#[test]
fn determinism_two_identical_runs_produce_identical_results() {
    let mut engine1 = common::default_engine();
    let mut engine2 = common::default_engine();

    let results1 = engine1.run();
    let results2 = engine2.run();

    assert_eq!(results1.len(), results2.len());
    for (r1, r2) in results1.iter().zip(results2.iter()) {
        assert_eq!(r1.connection, r2.connection);
        assert_eq!(r1.draw_rate, r2.draw_rate);
        assert_eq!(r1.drained, r2.drained);
        assert_eq!(r1.charged, r2.charged);
        assert_eq!(r1.charge, r2.charge);
        assert_eq!(r1.cumulative_drain, r2.cumulative_drain);
    }
}

#[test]
fn charge_stays_within_battery_bounds() {
    let mut engine = common::default_engine();
    let capacity = engine.battery().capacity();
    let results = engine.run();

    for r in &results {
        assert!(
            r.charge >= 0.0 && r.charge <= capacity,
            "charge out of bounds at t={}: {}",
            r.step,
            r.charge
        );
    }
}

#[test]
fn drain_happens_only_during_camera_sessions() {
    let mut engine = common::default_engine();
    let results = engine.run();

    for r in &results {
        if r.connection != Connection::Camera {
            assert_eq!(
                r.drained, 0.0,
                "drain outside a session at t={}, connection {}",
                r.step, r.connection
            );
        }
    }
}

#[test]
fn charging_happens_only_on_the_external_charger() {
    let mut engine = common::default_engine();
    let results = engine.run();

    for r in &results {
        if r.connection != Connection::External {
            assert_eq!(
                r.charged, 0.0,
                "charge off the charger at t={}, connection {}",
                r.step, r.connection
            );
        }
    }
}

#[test]
fn connection_follows_the_plan() {
    let mut engine = common::default_engine();
    let results = engine.run();

    for r in &results {
        let expected = match r.step {
            6..20 => Connection::Camera,
            36..46 => Connection::External,
            _ => Connection::Detached,
        };
        assert_eq!(r.connection, expected, "wrong connection at t={}", r.step);
    }
}

#[test]
fn cumulative_drain_is_non_decreasing() {
    let mut engine = common::default_engine();
    let results = engine.run();

    let mut previous = 0.0_f32;
    for r in &results {
        assert!(
            r.cumulative_drain >= previous,
            "cumulative drain decreased at t={}",
            r.step
        );
        previous = r.cumulative_drain;
    }
}

#[test]
fn energy_bookkeeping_holds_between_steps() {
    let mut engine = common::default_engine();
    let starting_charge = engine.battery().charge();
    let results = engine.run();

    let mut previous = starting_charge;
    for r in &results {
        let expected = previous - r.drained + r.charged;
        assert!(
            (r.charge - expected).abs() < 1e-3,
            "charge mismatch at t={}: got {}, expected {}",
            r.step,
            r.charge,
            expected
        );
        previous = r.charge;
    }
}

#[test]
fn kpi_totals_match_step_records() {
    let mut engine = common::default_engine();
    let capacity = engine.battery().capacity();
    let results = engine.run();
    let kpi = KpiReport::from_results(&results, capacity);

    let drained_sum: f32 = results.iter().map(|r| r.drained).sum();
    let charged_sum: f32 = results.iter().map(|r| r.charged).sum();
    assert!((kpi.total_drained - drained_sum).abs() < 1e-3);
    assert!((kpi.total_charged - charged_sum).abs() < 1e-3);
    assert_eq!(kpi.final_charge, results.last().unwrap().charge);
}

#[test]
fn final_battery_state_matches_last_record() {
    let mut engine = common::default_engine();
    let results = engine.run();

    let last = results.last().unwrap();
    assert_eq!(engine.battery().charge(), last.charge);
    assert_eq!(engine.battery().cumulative_drain(), last.cumulative_drain);
}
