//! `fairness`: tokenize one prompt once and price it against every
//! requested model (or, absent `--models`, every model the resolved
//! catalogue declares), so a user can compare providers on equal terms
//! before committing a workload to one of them.

use llm_cost_core::cost::{self, PicoUsd, UsageOptions};
use llm_cost_core::pricing::Catalogue;
use llm_cost_core::CoreError;
use serde::Serialize;

use crate::cli::FairnessArgs;
use crate::cli_error::CliError;
use crate::config::GovernanceConfig;

#[derive(Debug, Serialize)]
struct FairnessRow {
    model: String,
    provider: String,
    input_tokens: u64,
    total_cost: String,
    #[serde(skip)]
    cost: PicoUsd,
}

pub fn run(args: &FairnessArgs, config: &GovernanceConfig) -> Result<(), CliError> {
    let vocab_name = args.vocab.into();
    let vocab = super::load_vocab(&args.vocab_file, vocab_name)?;
    let (_, text) = super::read_prompt_strict(&args.prompt_file)?;

    let (catalogue, _source) = Catalogue::resolve(&config.resolution_inputs());
    catalogue
        .enforce_staleness(chrono::Utc::now(), config.ci, config.force_stale)
        .map_err(|e| CliError::Core(CoreError::Pricing(e)))?;

    let mut arena = llm_cost_core::bpe::EncodeArena::new();
    let tokens = super::encode_tokens(&text, vocab_name, &vocab, &mut arena)?;
    let input_tokens = tokens.len() as u64;

    let models: Vec<String> = if args.models.is_empty() {
        catalogue.model_names().into_iter().map(String::from).collect()
    } else {
        args.models.clone()
    };

    let mut rows = Vec::new();
    for model in &models {
        let price = catalogue
            .lookup(model)
            .ok_or_else(|| CliError::UnknownModel(model.clone()))?;
        let result = cost::calculate(price, input_tokens, 0, &UsageOptions::default())
            .map_err(|e| CliError::Core(CoreError::Cost(e)))?;
        rows.push(FairnessRow {
            model: model.clone(),
            provider: price.provider.to_string(),
            input_tokens,
            total_cost: result.total().to_string(),
            cost: result.total(),
        });
    }

    rows.sort_by(|a, b| a.cost.cmp(&b.cost));
    let text = serde_json::to_string_pretty(&rows).expect("serializing fairness rows never fails");
    println!("{text}");
    Ok(())
}
