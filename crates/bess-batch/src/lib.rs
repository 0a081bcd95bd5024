//! Parallel Monte Carlo sweeps: re-seed a scenario, solve the dispatch
//! problem for every draw, and collect the revenue distribution.

pub mod job;
pub mod manifest;
pub mod runner;

pub use job::{jobs_from_seeds, SweepJob, SweepRecord};
pub use manifest::{load_sweep_manifest, write_sweep_manifest, SweepManifest};
pub use runner::{run_sweep, SweepRunnerConfig, SweepSummary};
