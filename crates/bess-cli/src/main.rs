use bess_cli::cli::{Cli, Commands};
use bess_cli::commands;
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("failed to install the tracing subscriber");
        return ExitCode::FAILURE;
    }

    let result = match &cli.command {
        Some(Commands::Generate { scenario, out }) => commands::handle_generate(scenario, out),
        Some(Commands::Solve {
            prices,
            scenario,
            battery,
            solver,
            out,
            json_out,
        }) => commands::handle_solve(
            prices.as_deref(),
            scenario,
            battery,
            solver,
            out.as_deref(),
            json_out.as_deref(),
        ),
        Some(Commands::Sweep {
            scenario,
            battery,
            solver,
            trials,
            threads,
            out,
        }) => commands::handle_sweep(scenario, battery, solver, *trials, *threads, out),
        None => {
            info!("No subcommand provided. Use `bess --help` for more information.");
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Command failed: {e:?}");
            ExitCode::FAILURE
        }
    }
}
