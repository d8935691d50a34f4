//! `init`: write a starter project manifest so a new user has something
//! to edit rather than an empty file and a blank page.

use crate::cli::InitArgs;
use crate::cli_error::CliError;

const STARTER_MANIFEST: &str = r#"# default_model is used by any prompt entry that does not set its own `model`.
default_model = "gpt-4o"

# Uncomment to restrict which models prompts in this manifest may use.
# allowed_models = ["gpt-4o", "claude-3-opus"]

# Uncomment to cap the total estimated cost across every prompt below.
# max_cost_usd = 5.00

[[prompts]]
path = "prompts/example.txt"
# prompt_id = "example"
# tags = { team = "search" }
"#;

pub fn run(args: &InitArgs) -> Result<(), CliError> {
    if args.out.exists() {
        return Err(CliError::Usage(format!(
            "{} already exists; remove it or choose a different --out",
            args.out.display()
        )));
    }
    std::fs::write(&args.out, STARTER_MANIFEST).map_err(|source| CliError::Io {
        path: args.out.clone(),
        source,
    })?;
    println!("wrote starter manifest to {}", args.out.display());

    if let Some(preview_path) = &args.preview {
        let vocab_file = args.vocab_file.as_ref().ok_or_else(|| {
            CliError::Usage("--preview requires --vocab-file".to_string())
        })?;
        let vocab_name = args.vocab.into();
        let vocab = super::load_vocab(vocab_file, vocab_name)?;
        let text = super::read_prompt_lossy(preview_path)?;
        let mut arena = llm_cost_core::bpe::EncodeArena::new();
        let tokens = super::encode_tokens(&text, vocab_name, &vocab, &mut arena)?;
        println!(
            "preview: {} tokenizes to {} tokens",
            preview_path.display(),
            tokens.len()
        );
    }

    Ok(())
}
