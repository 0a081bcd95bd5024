use crate::job::{jobs_from_seeds, SweepJob, SweepRecord};
use crate::manifest::{write_sweep_manifest, SweepManifest};
use anyhow::{Context, Result};
use bess_core::{BatterySpecification, DispatchSchedule, RevenueCurve};
use bess_dispatch::{report, solve_dispatch, DispatchProblemBuilder, DispatchSolverConfig};
use bess_scenarios::{generate, ScenarioSpec};
use chrono::Utc;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Runner settings for a Monte Carlo sweep: one dispatch solve per seed.
pub struct SweepRunnerConfig {
    pub scenario: ScenarioSpec,
    pub battery: BatterySpecification,
    pub solver: DispatchSolverConfig,
    pub num_trials: usize,
    pub output_root: PathBuf,
    /// 0 means auto-detect the CPU count.
    pub threads: usize,
}

/// Summary returned after the run so clients can log success/failure counts
/// and the manifest location.
pub struct SweepSummary {
    pub success: usize,
    pub failure: usize,
    pub mean_net_profit: Option<f64>,
    pub manifest_path: PathBuf,
    pub jobs: Vec<SweepRecord>,
}

/// Per-trial result file written next to the manifest.
#[derive(Serialize)]
struct TrialResult<'a> {
    seed: u64,
    objective: f64,
    schedule: &'a DispatchSchedule,
    revenue: &'a RevenueCurve,
}

pub fn run_sweep(config: &SweepRunnerConfig) -> Result<SweepSummary> {
    fs::create_dir_all(&config.output_root).with_context(|| {
        format!(
            "creating sweep output root '{}'",
            config.output_root.display()
        )
    })?;

    let thread_count = if config.threads == 0 {
        num_cpus::get()
    } else {
        config.threads
    };
    let pool = ThreadPoolBuilder::new()
        .num_threads(thread_count)
        .build()
        .context("building Rayon thread pool for sweep runs")?;

    let jobs = jobs_from_seeds(&config.scenario, config.num_trials);
    let records: Vec<SweepRecord> =
        pool.install(|| jobs.par_iter().map(|job| run_trial(job, config)).collect());

    let success = records
        .iter()
        .filter(|record| record.status == "ok")
        .count();
    let failure = records.len() - success;
    let mean_net_profit = if success > 0 {
        let total: f64 = records.iter().filter_map(|r| r.net_profit).sum();
        Some(total / success as f64)
    } else {
        None
    };

    let manifest = SweepManifest {
        created_at: Utc::now(),
        num_trials: records.len(),
        success,
        failure,
        mean_net_profit,
        jobs: records.clone(),
    };
    let manifest_path = config.output_root.join("sweep_manifest.json");
    write_sweep_manifest(&manifest_path, &manifest)?;
    Ok(SweepSummary {
        success,
        failure,
        mean_net_profit,
        manifest_path,
        jobs: records,
    })
}

/// Execute a single trial: generate the priced horizon for this seed, solve
/// the dispatch problem, and write the schedule and revenue curve to JSON.
fn run_trial(job: &SweepJob, config: &SweepRunnerConfig) -> SweepRecord {
    let output_file = config.output_root.join(&job.job_id).join("result.json");

    let runner = || -> Result<(f64, DispatchSchedule, RevenueCurve)> {
        let prices = generate(&job.scenario)?;
        let problem = DispatchProblemBuilder::new(prices.clone(), config.battery.clone()).build()?;
        let result = solve_dispatch(&problem, &config.solver)?;
        let (schedule, curve) = report(&result, &prices, &config.battery)?;
        let objective = result.objective.unwrap_or_else(|| curve.net_profit());
        write_trial_result(&output_file, &job.seed, objective, &schedule, &curve)?;
        Ok((objective, schedule, curve))
    };

    match runner() {
        Ok((objective, schedule, curve)) => SweepRecord {
            job_id: job.job_id.clone(),
            seed: job.seed,
            status: "ok".to_string(),
            error: None,
            output: output_file.display().to_string(),
            net_profit: Some(objective),
            gross_revenue: Some(curve.gross_revenue()),
            degradation_cost: Some(curve.total_degradation_cost()),
            throughput_mwh: Some(schedule.total_throughput_mwh()),
            equivalent_cycles: Some(schedule.equivalent_cycles(config.battery.capacity_mwh)),
        },
        Err(err) => {
            eprintln!("sweep trial {} failed: {err}", job.job_id);
            SweepRecord {
                job_id: job.job_id.clone(),
                seed: job.seed,
                status: "error".to_string(),
                error: Some(err.to_string()),
                output: output_file.display().to_string(),
                net_profit: None,
                gross_revenue: None,
                degradation_cost: None,
                throughput_mwh: None,
                equivalent_cycles: None,
            }
        }
    }
}

fn write_trial_result(
    path: &Path,
    seed: &u64,
    objective: f64,
    schedule: &DispatchSchedule,
    revenue: &RevenueCurve,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating trial directory '{}'", parent.display()))?;
    }
    let result = TrialResult {
        seed: *seed,
        objective,
        schedule,
        revenue,
    };
    let json = serde_json::to_string_pretty(&result).context("serializing trial result")?;
    fs::write(path, json).with_context(|| format!("writing trial result '{}'", path.display()))?;
    Ok(())
}
