//! `llm-cost-gov`: offline LLM cost governance CLI. Parses arguments,
//! resolves the injectable [`GovernanceConfig`], dispatches to one of
//! seven subcommands, and translates the result into the
//! BSD-sysexits-style exit codes `exitcode` defines.

use clap::Parser;
use llm_cost_cli::cli::Cli;
use llm_cost_cli::cli_error::CliError;
use llm_cost_cli::config::GovernanceConfig;
use llm_cost_cli::{dispatch, exitcode, init_logging};

/// `main` itself deals in `anyhow::Error` (the "unexpected failure at
/// the boundary" shape); everything below it propagates the typed
/// [`CliError`] so the exit code can still be recovered by downcasting
/// before the process exits.
fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = GovernanceConfig::resolve(cli.pricing_file.clone(), cli.force_stale, cli.ci);
    let result = dispatch(&cli.command, &config).map_err(anyhow::Error::from);

    let code = match &result {
        Ok(()) => exitcode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "llm-cost-gov failed");
            eprintln!("error: {err}");
            err.downcast_ref::<CliError>()
                .map(exitcode::for_error)
                .unwrap_or(exitcode::GENERIC_ERROR)
        }
    };
    std::process::exit(code);
}
