use anyhow::Result;
use clap::Parser;
use engagemap::cli::{Cli, CommonArgs, Commands};
use engagemap::commands::{self, AnalysisKind, AnalyzeConfig};
use engagemap::Error;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit status for data the analyzers reject
const INPUT_ERROR_EXIT: u8 = 2;

// Main orchestrator function
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.command.verbosity());

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if is_input_error(&e) {
                eprintln!("Invalid input: {:#}", e);
                ExitCode::from(INPUT_ERROR_EXIT)
            } else {
                eprintln!("Error: {:#}", e);
                ExitCode::FAILURE
            }
        }
    }
}

// Input errors keep their type through anyhow context layers
fn is_input_error(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<Error>()
        .is_some_and(Error::is_input_error)
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Alignment { common } => {
            commands::handle_analyze(build_analyze_config(AnalysisKind::Alignment, common, None))
        }
        Commands::Dynamics { common } => {
            commands::handle_analyze(build_analyze_config(AnalysisKind::Dynamics, common, None))
        }
        Commands::Cascade { common, alpha } => {
            commands::handle_analyze(build_analyze_config(AnalysisKind::Cascade, common, alpha))
        }
        Commands::Init { force } => commands::init_config(force),
    }
}

// Pure function to map -v count to a default filter
fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

// Side effect: install the global subscriber (also receives `log` records).
// RUST_LOG takes precedence over -v.
fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

// Pure function to build analyze configuration
fn build_analyze_config(
    analysis: AnalysisKind,
    common: CommonArgs,
    alpha: Option<f64>,
) -> AnalyzeConfig {
    AnalyzeConfig {
        analysis,
        input: common.input,
        format: common.format,
        output: common.output,
        config: common.config,
        alpha,
    }
}
