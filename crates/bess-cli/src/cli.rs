use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a synthetic price horizon and write it to CSV
    Generate {
        #[command(flatten)]
        scenario: ScenarioArgs,
        /// Output CSV path (step,price)
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Solve the dispatch problem for one price horizon
    Solve {
        /// Load prices from a CSV file instead of generating them
        #[arg(long)]
        prices: Option<PathBuf>,
        #[command(flatten)]
        scenario: ScenarioArgs,
        #[command(flatten)]
        battery: BatteryArgs,
        #[command(flatten)]
        solver: SolverArgs,
        /// Write the solved schedule and revenue curve to this CSV file
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Write the full result (schedule + revenue curve) as JSON
        #[arg(long)]
        json_out: Option<PathBuf>,
    },
    /// Run a Monte Carlo sweep over consecutive seeds
    Sweep {
        #[command(flatten)]
        scenario: ScenarioArgs,
        #[command(flatten)]
        battery: BatteryArgs,
        #[command(flatten)]
        solver: SolverArgs,
        /// Number of trials
        #[arg(long, default_value_t = 100)]
        trials: usize,
        /// Worker threads (0 = auto-detect)
        #[arg(long, default_value_t = 0)]
        threads: usize,
        /// Output directory for trial results and the sweep manifest
        #[arg(short, long)]
        out: PathBuf,
    },
}

/// Scenario generation flags shared by `generate`, `solve`, and `sweep`.
#[derive(Args, Debug)]
pub struct ScenarioArgs {
    /// RNG seed
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of steps in the horizon
    #[arg(long, default_value_t = 720)]
    pub steps: usize,

    /// Hours per step
    #[arg(long, default_value_t = 1.0)]
    pub step_hours: f64,

    /// Volatility preset: low, normal, extreme, or crisis
    #[arg(long, default_value = "normal")]
    pub preset: String,

    /// Override the preset's log-normal volatility
    #[arg(long)]
    pub volatility: Option<f64>,

    /// Let prices go below zero instead of flooring at zero
    #[arg(long, default_value_t = false)]
    pub allow_negative: bool,
}

/// Battery asset flags shared by `solve` and `sweep`.
#[derive(Args, Debug)]
pub struct BatteryArgs {
    /// Usable energy capacity (MWh)
    #[arg(long, default_value_t = 200.0)]
    pub capacity: f64,

    /// Charge/discharge power limit (MW)
    #[arg(long, default_value_t = 50.0)]
    pub power: f64,

    /// Round-trip efficiency, split symmetrically across the two legs
    #[arg(long, default_value_t = 0.90)]
    pub round_trip_efficiency: f64,

    /// Degradation hurdle rate ($/MWh of throughput)
    #[arg(long, default_value_t = 0.0)]
    pub hurdle_rate: f64,

    /// Stored energy at the start of the horizon (MWh)
    #[arg(long, default_value_t = 0.0)]
    pub initial_soc: f64,

    /// Require at least this much stored energy at the end (MWh)
    #[arg(long)]
    pub final_soc_target: Option<f64>,
}

/// Solver backend flags.
#[derive(Args, Debug)]
pub struct SolverArgs {
    /// LP/MILP backend: clarabel or highs
    #[arg(long, default_value = "clarabel")]
    pub backend: String,

    /// Solver wall-clock budget in seconds
    #[arg(long, default_value_t = 300.0)]
    pub max_time: f64,
}
