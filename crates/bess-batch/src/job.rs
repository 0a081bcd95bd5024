use bess_scenarios::ScenarioSpec;
use serde::{Deserialize, Serialize};

/// One Monte Carlo draw: a scenario spec reseeded for this trial.
#[derive(Debug, Clone)]
pub struct SweepJob {
    pub job_id: String,
    pub seed: u64,
    pub scenario: ScenarioSpec,
}

/// Per-job outcome row collected into the sweep manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepRecord {
    pub job_id: String,
    pub seed: u64,
    pub status: String,
    pub error: Option<String>,
    pub output: String,
    pub net_profit: Option<f64>,
    pub gross_revenue: Option<f64>,
    pub degradation_cost: Option<f64>,
    pub throughput_mwh: Option<f64>,
    pub equivalent_cycles: Option<f64>,
}

/// Fan a base scenario out over consecutive seeds starting at its own.
pub fn jobs_from_seeds(base: &ScenarioSpec, num_trials: usize) -> Vec<SweepJob> {
    (0..num_trials as u64)
        .map(|offset| {
            let seed = base.seed.wrapping_add(offset);
            let mut scenario = base.clone();
            scenario.seed = seed;
            SweepJob {
                job_id: format!("trial-{seed}"),
                seed,
                scenario,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jobs_from_seeds_builds_consecutive_trials() {
        let base = ScenarioSpec::new(42);
        let jobs = jobs_from_seeds(&base, 3);
        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[0].job_id, "trial-42");
        assert_eq!(jobs[2].seed, 44);
        assert_eq!(jobs[1].scenario.num_steps, base.num_steps);
    }
}
