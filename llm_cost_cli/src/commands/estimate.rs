//! `estimate`: tokenize and price every prompt in a manifest, enforce
//! its policy, and emit either a JSON array or a FOCUS CSV export.

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

use llm_cost_core::bpe::EncodeArena;
use llm_cost_core::cost::{self, PicoUsd, UsageOptions};
use llm_cost_core::focus::{FocusInput, FocusRow};
use llm_cost_core::policy::{self, PromptUsage};
use llm_cost_core::pricing::Catalogue;
use llm_cost_core::resource;
use llm_cost_core::CoreError;
use serde::Serialize;

use crate::cli::{EstimateArgs, OutputFormat};
use crate::cli_error::CliError;
use crate::config::GovernanceConfig;
use crate::manifest::Manifest;

#[derive(Debug, Serialize)]
struct EstimateRow {
    resource_id: String,
    model: String,
    input_tokens: u64,
    output_tokens: u64,
    input_cost: String,
    output_cost: String,
    cache_read_cost: String,
    cache_write_cost: String,
    total_cost: String,
}

struct Computed {
    model: String,
    cost: PicoUsd,
    tags: HashMap<String, String>,
    json_row: Option<EstimateRow>,
    focus_row: Option<FocusRow>,
}

pub fn run(args: &EstimateArgs, config: &GovernanceConfig) -> Result<(), CliError> {
    let manifest = Manifest::load(&args.manifest)?;
    let vocab_name = args.vocab.into();
    let vocab = super::load_vocab(&args.vocab_file, vocab_name)?;

    let (catalogue, _source) = Catalogue::resolve(&config.resolution_inputs());
    catalogue
        .enforce_staleness(chrono::Utc::now(), config.ci, config.force_stale)
        .map_err(|e| CliError::Core(CoreError::Pricing(e)))?;

    let mut arena = EncodeArena::new();
    let mut seen_ids = super::ResourceIdSet::new();
    let mut computed = Vec::with_capacity(manifest.prompts.len());

    for entry in &manifest.prompts {
        let (bytes, text) = super::read_prompt_strict(&entry.path)?;
        let model = manifest
            .model_for(entry)
            .ok_or_else(|| {
                CliError::Usage(format!("{}: no model specified", entry.path.display()))
            })?
            .to_string();
        let price = catalogue
            .lookup(&model)
            .ok_or_else(|| CliError::UnknownModel(model.clone()))?
            .clone();

        let tokens = super::encode_tokens(&text, vocab_name, &vocab, &mut arena)?;
        let input_tokens = tokens.len() as u64;

        // `estimate` prices prompt files, not completions; absent an
        // actual response there is no output token count to charge.
        let output_tokens = 0u64;

        let effective_options = UsageOptions {
            cache_hit_ratio: args.cache_hit_ratio,
            include_cache_write: false,
        };
        let effective = cost::calculate(&price, input_tokens, output_tokens, &effective_options)
            .map_err(|e| CliError::Core(CoreError::Cost(e)))?;
        let list = cost::calculate(&price, input_tokens, output_tokens, &UsageOptions::default())
            .map_err(|e| CliError::Core(CoreError::Cost(e)))?;

        let path_str = entry.path.to_string_lossy().to_string();
        let resource_id =
            resource::resource_id(entry.prompt_id.as_deref(), &path_str, &bytes, &mut seen_ids);

        let tags: HashMap<String, String> = entry
            .tags
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let (json_row, focus_row) = match args.format {
            OutputFormat::Json => (
                Some(EstimateRow {
                    resource_id: resource_id.clone(),
                    model: model.clone(),
                    input_tokens,
                    output_tokens,
                    input_cost: effective.input.to_string(),
                    output_cost: effective.output.to_string(),
                    cache_read_cost: effective.cache_read.to_string(),
                    cache_write_cost: effective.cache_write.to_string(),
                    total_cost: effective.total().to_string(),
                }),
                None,
            ),
            OutputFormat::Focus => {
                let content_hash = resource::content_hash(&bytes);
                let focus_input = FocusInput {
                    resource_id: &resource_id,
                    resource_name: &path_str,
                    provider: price.provider,
                    input_tokens,
                    output_tokens,
                    cache_hit_ratio: args.cache_hit_ratio,
                    content_hash,
                    tags: &entry.tags,
                    effective,
                    list,
                };
                (None, Some(FocusRow::map(&focus_input)))
            }
        };

        computed.push(Computed {
            model,
            cost: effective.total(),
            tags,
            json_row,
            focus_row,
        });
    }

    let policy_usages: Vec<PromptUsage<'_>> = computed
        .iter()
        .map(|c| PromptUsage {
            model: &c.model,
            cost: c.cost,
            tags: &c.tags,
        })
        .collect();
    policy::evaluate(&manifest.policy(), &policy_usages)
        .map_err(|e| CliError::Core(CoreError::Policy(e)))?;

    match args.format {
        OutputFormat::Json => {
            let rows: Vec<&EstimateRow> = computed.iter().filter_map(|c| c.json_row.as_ref()).collect();
            let text = serde_json::to_string_pretty(&rows)
                .expect("serializing estimate rows never fails");
            write_output_bytes(&args.out, text.as_bytes())?;
        }
        OutputFormat::Focus => {
            let mut rows: Vec<FocusRow> = computed.into_iter().filter_map(|c| c.focus_row).collect();
            rows.sort_by(|a, b| a.resource_id.cmp(&b.resource_id));
            let mut buf = Vec::new();
            crate::focus_csv::write_rows(&mut buf, &rows).map_err(CliError::FocusCsv)?;
            write_output_bytes(&args.out, &buf)?;
        }
    }

    Ok(())
}

fn write_output_bytes(out: &Option<PathBuf>, bytes: &[u8]) -> Result<(), CliError> {
    match out {
        Some(path) => std::fs::write(path, bytes).map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        }),
        None => std::io::stdout()
            .write_all(bytes)
            .map_err(|source| CliError::Io {
                path: PathBuf::from("<stdout>"),
                source,
            }),
    }
}
