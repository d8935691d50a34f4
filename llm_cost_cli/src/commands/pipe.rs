//! `pipe`: stream JSONL prompts from stdin, pricing each line
//! independently and stopping once a running quota is breached. Each
//! line's cost is flushed to stdout as it's computed, so output up to
//! the breaching line is always complete; on breach a final summary
//! line is flushed before the process exits with a distinct status.

use std::io::{self, Write};

use llm_cost_core::cost::{self, PicoUsd, UsageOptions};
use llm_cost_core::pricing::Catalogue;
use llm_cost_core::CoreError;
use serde::Serialize;

use crate::cli::PipeArgs;
use crate::cli_error::CliError;
use crate::config::GovernanceConfig;
use crate::jsonl::JsonlReader;

#[derive(Debug, Serialize)]
struct PipeResult {
    id: Option<String>,
    model: String,
    input_tokens: u64,
    total_cost: String,
    running_tokens: u64,
    running_cost: String,
}

#[derive(Debug, Serialize)]
struct PipeSummary {
    summary: &'static str,
    lines_processed: u64,
    running_tokens: u64,
    running_cost: String,
    quota_breach: String,
}

pub fn run(args: &PipeArgs, config: &GovernanceConfig) -> Result<(), CliError> {
    let vocab_name = args.vocab.into();
    let vocab = super::load_vocab(&args.vocab_file, vocab_name)?;

    let (catalogue, _source) = Catalogue::resolve(&config.resolution_inputs());
    catalogue
        .enforce_staleness(chrono::Utc::now(), config.ci, config.force_stale)
        .map_err(|e| CliError::Core(CoreError::Pricing(e)))?;

    let stdin = io::stdin();
    let reader = JsonlReader::new(stdin.lock());
    let mut arena = llm_cost_core::bpe::EncodeArena::new();
    let mut stdout = io::stdout();

    let mut running_tokens: u64 = 0;
    let mut running_cost = PicoUsd::zero();
    let mut lines_processed: u64 = 0;

    for line in reader {
        let line = line.map_err(CliError::Jsonl)?;
        let price = catalogue
            .lookup(&line.model)
            .ok_or_else(|| CliError::UnknownModel(line.model.clone()))?;

        let tokens = super::encode_tokens(&line.text, vocab_name, &vocab, &mut arena)?;
        let input_tokens = tokens.len() as u64;
        let result = cost::calculate(price, input_tokens, 0, &UsageOptions::default())
            .map_err(|e| CliError::Core(CoreError::Cost(e)))?;

        running_tokens += input_tokens;
        running_cost = running_cost + result.total();
        lines_processed += 1;

        let row = PipeResult {
            id: line.id.clone(),
            model: line.model.clone(),
            input_tokens,
            total_cost: result.total().to_string(),
            running_tokens,
            running_cost: running_cost.to_string(),
        };
        let text = serde_json::to_string(&row).expect("serializing a pipe result never fails");
        writeln!(stdout, "{text}").map_err(|source| CliError::Io {
            path: std::path::PathBuf::from("<stdout>"),
            source,
        })?;

        let breach = if let Some(max_tokens) = args.max_tokens {
            (running_tokens > max_tokens).then(|| {
                format!("running token count {running_tokens} exceeded --max-tokens {max_tokens}")
            })
        } else {
            None
        };
        let breach = breach.or_else(|| {
            let max_cost_usd = args.max_cost_usd?;
            let limit = PicoUsd::from_usd(max_cost_usd);
            (running_cost > limit)
                .then(|| format!("running cost {running_cost} exceeded --max-cost-usd {limit}"))
        });

        if let Some(reason) = breach {
            let summary = PipeSummary {
                summary: "quota_breach",
                lines_processed,
                running_tokens,
                running_cost: running_cost.to_string(),
                quota_breach: reason.clone(),
            };
            let text =
                serde_json::to_string(&summary).expect("serializing a pipe summary never fails");
            writeln!(stdout, "{text}").map_err(|source| CliError::Io {
                path: std::path::PathBuf::from("<stdout>"),
                source,
            })?;
            stdout.flush().map_err(|source| CliError::Io {
                path: std::path::PathBuf::from("<stdout>"),
                source,
            })?;
            return Err(CliError::QuotaExceeded(reason));
        }
    }

    stdout.flush().map_err(|source| CliError::Io {
        path: std::path::PathBuf::from("<stdout>"),
        source,
    })?;

    Ok(())
}
