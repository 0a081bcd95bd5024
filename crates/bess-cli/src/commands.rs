//! Subcommand handlers. All decision logic lives in the library crates;
//! these functions only parse flags, wire the pieces together, and print.

use crate::cli::{BatteryArgs, ScenarioArgs, SolverArgs};
use crate::prices::{
    load_prices_csv, write_prices_csv, write_schedule_csv, write_solve_json, SolveReport,
};
use anyhow::{Context, Result};
use bess_batch::{run_sweep, SweepRunnerConfig};
use bess_core::{BatterySpecification, PriceSeries};
use bess_dispatch::{
    report, solve_dispatch, summary, DispatchBackend, DispatchProblemBuilder, DispatchSolverConfig,
};
use bess_scenarios::{generate, ScenarioSpec, VolatilityPreset};
use std::path::{Path, PathBuf};
use tracing::info;

pub fn scenario_from_args(args: &ScenarioArgs) -> Result<ScenarioSpec> {
    let preset: VolatilityPreset = args.preset.parse()?;
    let mut spec = ScenarioSpec::new(args.seed)
        .with_preset(preset)
        .with_horizon(args.steps, args.step_hours);
    if let Some(volatility) = args.volatility {
        spec.volatility = volatility;
    }
    spec.allow_negative_prices = args.allow_negative;
    spec.validate()?;
    Ok(spec)
}

pub fn battery_from_args(args: &BatteryArgs) -> Result<BatterySpecification> {
    let mut battery = BatterySpecification::new(args.capacity, args.power)
        .with_round_trip_efficiency(args.round_trip_efficiency)
        .with_hurdle_rate(args.hurdle_rate)
        .with_initial_soc(args.initial_soc);
    if let Some(target) = args.final_soc_target {
        battery = battery.with_final_soc_target(target);
    }
    battery.validate()?;
    Ok(battery)
}

pub fn solver_from_args(args: &SolverArgs) -> Result<DispatchSolverConfig> {
    let backend: DispatchBackend = args.backend.parse()?;
    Ok(DispatchSolverConfig {
        backend,
        max_time_seconds: args.max_time,
        ..DispatchSolverConfig::default()
    })
}

pub fn handle_generate(scenario: &ScenarioArgs, out: &Path) -> Result<()> {
    let spec = scenario_from_args(scenario)?;
    let series = generate(&spec)?;
    write_prices_csv(out, &series)?;
    info!(
        "Wrote {} prices (seed {}, preset {}) to {}",
        series.len(),
        spec.seed,
        scenario.preset,
        out.display()
    );
    Ok(())
}

pub fn handle_solve(
    prices_path: Option<&Path>,
    scenario: &ScenarioArgs,
    battery_args: &BatteryArgs,
    solver_args: &SolverArgs,
    out: Option<&Path>,
    json_out: Option<&Path>,
) -> Result<()> {
    let prices: PriceSeries = match prices_path {
        Some(path) => {
            info!("Loading prices from {}", path.display());
            load_prices_csv(path, scenario.step_hours)?
        }
        None => {
            let spec = scenario_from_args(scenario)?;
            info!("Generating prices from seed {}", spec.seed);
            generate(&spec)?
        }
    };
    let battery = battery_from_args(battery_args)?;
    let solver = solver_from_args(solver_args)?;

    let problem = DispatchProblemBuilder::new(prices.clone(), battery.clone()).build()?;
    let result = solve_dispatch(&problem, &solver)?;
    println!("{}", summary(&result, &battery));

    let (schedule, revenue) = report(&result, &prices, &battery)?;
    if let Some(path) = out {
        write_schedule_csv(path, &prices, &schedule, &revenue)?;
        info!("Schedule written to {}", path.display());
    }
    if let Some(path) = json_out {
        let payload = SolveReport {
            battery: &battery,
            objective: result.objective.context("optimal result has no objective")?,
            schedule: &schedule,
            revenue: &revenue,
        };
        write_solve_json(path, &payload)?;
        info!("Full result written to {}", path.display());
    }
    Ok(())
}

pub fn handle_sweep(
    scenario: &ScenarioArgs,
    battery_args: &BatteryArgs,
    solver_args: &SolverArgs,
    trials: usize,
    threads: usize,
    out: &PathBuf,
) -> Result<()> {
    let config = SweepRunnerConfig {
        scenario: scenario_from_args(scenario)?,
        battery: battery_from_args(battery_args)?,
        solver: solver_from_args(solver_args)?,
        num_trials: trials,
        output_root: out.clone(),
        threads,
    };
    let outcome = run_sweep(&config)?;
    println!(
        "Sweep finished: {} ok, {} failed out of {} trials",
        outcome.success,
        outcome.failure,
        outcome.jobs.len()
    );
    if let Some(mean) = outcome.mean_net_profit {
        println!("Mean net profit: {mean:.2}");
    }
    println!("Manifest: {}", outcome.manifest_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn scenario_args_respect_preset_and_overrides() {
        let cli = parse(&[
            "bess", "generate", "--seed", "7", "--preset", "crisis", "--volatility", "0.3",
            "--out", "p.csv",
        ]);
        let crate::cli::Commands::Generate { scenario, .. } = cli.command.unwrap() else {
            panic!("expected generate");
        };
        let spec = scenario_from_args(&scenario).unwrap();
        assert_eq!(spec.seed, 7);
        assert!((spec.volatility - 0.3).abs() < 1e-12);
        assert!((spec.crisis.spike_magnitude - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_preset_is_rejected() {
        let cli = parse(&["bess", "generate", "--preset", "wild", "--out", "p.csv"]);
        let crate::cli::Commands::Generate { scenario, .. } = cli.command.unwrap() else {
            panic!("expected generate");
        };
        assert!(scenario_from_args(&scenario).is_err());
    }

    #[test]
    fn battery_args_build_a_valid_specification() {
        let cli = parse(&[
            "bess",
            "solve",
            "--capacity",
            "100",
            "--power",
            "25",
            "--hurdle-rate",
            "12.5",
            "--final-soc-target",
            "50",
        ]);
        let crate::cli::Commands::Solve { battery, .. } = cli.command.unwrap() else {
            panic!("expected solve");
        };
        let spec = battery_from_args(&battery).unwrap();
        assert!((spec.hurdle_rate_per_mwh - 12.5).abs() < 1e-12);
        assert_eq!(spec.final_soc_target_mwh, Some(50.0));
    }
}
