//! Simulator entry point — CLI wiring and config-driven engine construction.

use std::path::Path;
use std::process;

use cambat_sim::battery::CameraBattery;
use cambat_sim::config::ScenarioConfig;
use cambat_sim::io::export::export_csv;
use cambat_sim::profile::DrawProfile;
use cambat_sim::sim::engine::Engine;
use cambat_sim::sim::kpi::KpiReport;
use cambat_sim::sim::plan::{ConnectionPlan, ConnectionWindow, WindowTarget};
use cambat_sim::sim::types::{SimConfig, StepResult};

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    telemetry_out: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("cambat-sim — Camera battery charge/drain simulator");
    eprintln!();
    eprintln!("Usage: cambat-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (baseline)");
    eprintln!("  --seed <u64>             Override random seed");
    eprintln!("  --telemetry-out <path>   Export step results to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server after simulation");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        seed_override: None,
        telemetry_out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --scenario requires a path argument");
                    process::exit(1);
                }
                cli.scenario_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --seed requires a u64 argument");
                    process::exit(1);
                }
                if let Ok(s) = args[i].parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{}\" is not a valid u64", args[i]);
                    process::exit(1);
                }
            }
            "--telemetry-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --telemetry-out requires a path argument");
                    process::exit(1);
                }
                cli.telemetry_out = Some(args[i].clone());
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --port requires a u16 argument");
                    process::exit(1);
                }
                if let Ok(p) = args[i].parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{}\" is not a valid u16", args[i]);
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Builds the engine from a validated scenario configuration.
fn build_engine(cfg: &ScenarioConfig) -> Engine {
    let s = &cfg.simulation;
    let sim_config = SimConfig::new(s.steps, s.minutes_per_step, s.seed);

    let bat = &cfg.battery;
    let battery = CameraBattery::new(bat.starting_charge, bat.capacity);

    let usage = &cfg.usage;
    let profile = DrawProfile::new(
        usage.base_rate,
        usage.amp,
        usage.phase_rad,
        usage.noise_std,
        sim_config.steps,
        sim_config.seed,
    );

    // Sessions ahead of charge windows; validation has ruled out overlap.
    let mut windows = Vec::with_capacity(cfg.sessions.len() + cfg.charges.len());
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
    let plan = ConnectionPlan::new(windows);

    Engine::new(sim_config, battery, profile, plan, usage.camera_assist)
}

/// Runs the simulation and returns config, results, and the KPI report.
fn run_simulation(cfg: &ScenarioConfig) -> (SimConfig, Vec<StepResult>, KpiReport) {
    let mut engine = build_engine(cfg);
    let results = engine.run();
    let kpi = KpiReport::from_results(&results, engine.battery().capacity());
    (engine.config().clone(), results, kpi)
}

fn main() {
    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then baseline default
    let mut scenario = if let Some(ref path) = cli.scenario_path {
        match ScenarioConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ScenarioConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ScenarioConfig::baseline()
    };

    // Apply seed override
    if let Some(seed) = cli.seed_override {
        scenario.simulation.seed = seed;
    }

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Build and run
    #[cfg_attr(not(feature = "api"), expect(unused_variables))]
    let (sim_config, results, kpi) = run_simulation(&scenario);

    // Print per-step results
    for r in &results {
        println!("{r}");
    }

    // Print KPI report
    println!("\n{kpi}");

    // Export CSV if requested
    if let Some(ref path) = cli.telemetry_out {
        if let Err(e) = export_csv(&results, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Telemetry written to {path}");
    }

    // Start API server if requested
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(cambat_sim::api::AppState {
            config: sim_config,
            kpi,
            results,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        rt.block_on(cambat_sim::api::serve(state, addr));
    }
}
