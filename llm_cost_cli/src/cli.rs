//! Argument parsing and subcommand dispatch. Plain `clap` derive,
//! preferring derive macros over hand-rolled parsing elsewhere in the
//! workspace.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "llm-cost-gov",
    version,
    about = "Offline LLM cost governance: tokenize, price, and enforce budget policy"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Override the pricing catalogue file (highest-priority source in
    /// the resolution chain).
    #[arg(long, global = true)]
    pub pricing_file: Option<PathBuf>,

    /// Proceed even when the pricing catalogue is critically stale.
    #[arg(long, global = true)]
    pub force_stale: bool,

    /// Force CI semantics on (`true`) or off (`false`) for the staleness
    /// fail-open policy, overriding `CI`/`GITHUB_ACTIONS` auto-detection.
    #[arg(long, global = true)]
    pub ci: Option<bool>,

    /// Increase log verbosity; repeatable (`-v`, `-vv`).
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute token counts and cost for every prompt in a manifest.
    Estimate(EstimateArgs),
    /// Stream JSONL prompts from stdin, pricing each line independently.
    Pipe(PipeArgs),
    /// Verify and install a fetched pricing catalogue into the user cache.
    Update(UpdateArgs),
    /// Compare two previously-exported FOCUS CSV runs by resource id.
    Diff(DiffArgs),
    /// Write a starter project manifest.
    Init(InitArgs),
    /// Measure encoder throughput over a text corpus.
    Benchmark(BenchmarkArgs),
    /// Compare the cost of the same prompt across multiple models.
    Fairness(FairnessArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Focus,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum VocabChoice {
    Cl100kBase,
    O200kBase,
}

impl From<VocabChoice> for llm_cost_core::vocab::VocabName {
    fn from(choice: VocabChoice) -> Self {
        match choice {
            VocabChoice::Cl100kBase => llm_cost_core::vocab::VocabName::Cl100kBase,
            VocabChoice::O200kBase => llm_cost_core::vocab::VocabName::O200kBase,
        }
    }
}

#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Project manifest (TOML) listing prompts to estimate.
    pub manifest: PathBuf,

    /// BPE2-format vocabulary binary to tokenize with.
    #[arg(long)]
    pub vocab_file: PathBuf,

    #[arg(long, value_enum, default_value = "o200k-base")]
    pub vocab: VocabChoice,

    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Write output here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Fraction of input tokens assumed served from a prompt cache.
    #[arg(long)]
    pub cache_hit_ratio: Option<f64>,
}

#[derive(Args, Debug)]
pub struct PipeArgs {
    #[arg(long)]
    pub vocab_file: PathBuf,

    #[arg(long, value_enum, default_value = "o200k-base")]
    pub vocab: VocabChoice,

    /// Stop and exit non-zero once accumulated cost exceeds this budget.
    #[arg(long)]
    pub max_cost_usd: Option<f64>,

    /// Stop and exit non-zero once accumulated tokens exceed this count.
    #[arg(long)]
    pub max_tokens: Option<u64>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Freshly fetched catalogue JSON (the network fetch itself is an
    /// external collaborator; this command only verifies and installs).
    pub catalogue_file: PathBuf,
    /// Detached minisign-legacy signature over `catalogue_file`.
    pub signature_file: PathBuf,
}

#[derive(Args, Debug)]
pub struct DiffArgs {
    pub before: PathBuf,
    pub after: PathBuf,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    #[arg(long, default_value = "llm-cost.toml")]
    pub out: PathBuf,

    /// Optionally preview a token count for one sample prompt, decoded
    /// leniently (invalid UTF-8 is replaced, never a hard failure).
    #[arg(long)]
    pub preview: Option<PathBuf>,

    #[arg(long)]
    pub vocab_file: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "o200k-base")]
    pub vocab: VocabChoice,
}

#[derive(Args, Debug)]
pub struct BenchmarkArgs {
    #[arg(long)]
    pub vocab_file: PathBuf,

    #[arg(long, value_enum, default_value = "o200k-base")]
    pub vocab: VocabChoice,

    pub corpus_file: PathBuf,
}

#[derive(Args, Debug)]
pub struct FairnessArgs {
    pub prompt_file: PathBuf,

    #[arg(long)]
    pub vocab_file: PathBuf,

    #[arg(long, value_enum, default_value = "o200k-base")]
    pub vocab: VocabChoice,

    /// Models to compare; defaults to every model in the catalogue.
    #[arg(long)]
    pub models: Vec<String>,
}
