//! Library half of `llm-cost-gov`: everything `main.rs` needs plus
//! what its own integration tests (`tests/focus_export.rs`) link
//! against. The binary target is a thin wrapper around [`dispatch`].

pub mod cli;
pub mod cli_error;
pub mod commands;
pub mod config;
pub mod exitcode;
pub mod focus_csv;
pub mod jsonl;
pub mod manifest;

use cli::Command;
use cli_error::CliError;
use config::GovernanceConfig;

pub fn dispatch(command: &Command, config: &GovernanceConfig) -> Result<(), CliError> {
    match command {
        Command::Estimate(args) => commands::estimate::run(args, config),
        Command::Pipe(args) => commands::pipe::run(args, config),
        Command::Update(args) => commands::update::run(args, config),
        Command::Diff(args) => commands::diff::run(args),
        Command::Init(args) => commands::init::run(args),
        Command::Benchmark(args) => commands::benchmark::run(args),
        Command::Fairness(args) => commands::fairness::run(args, config),
    }
}

/// `-v`/`-vv` raise the default level; `RUST_LOG` always takes
/// precedence when set.
pub fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "llm_cost_cli={default_level},llm_cost_core={default_level}"
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
