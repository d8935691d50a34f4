pub mod benchmark;
pub mod diff;
pub mod estimate;
pub mod fairness;
pub mod init;
pub mod pipe;
pub mod update;

use std::collections::HashSet;
use std::path::Path;

use llm_cost_core::bpe::{self, EncodeArena};
use llm_cost_core::vocab::{VocabName, Vocabulary};
use llm_cost_core::CoreError;

use crate::cli_error::CliError;

/// Shared by every command that tokenizes: load a BPE2 vocabulary file
/// from disk into memory.
pub fn load_vocab(path: &Path, name: VocabName) -> Result<Vocabulary, CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Vocabulary::load(name, &bytes)
        .map_err(|e| CliError::Core(CoreError::Vocab(e)))
}

/// Read a prompt file strictly as UTF-8: `estimate`/`pipe` fail fast on
/// invalid UTF-8 rather than silently lossy-decoding a cost/policy
/// gate's input.
pub fn read_prompt_strict(path: &Path) -> Result<(Vec<u8>, String), CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes.clone()).map_err(|_| {
        CliError::Usage(format!("{}: input is not valid UTF-8", path.display()))
    })?;
    Ok((bytes, text))
}

/// Read a prompt file with lossy UTF-8 decoding, for `init`'s
/// interactive token-count preview. Never worth failing a wizard over
/// one bad byte, unlike the cost/policy gates `read_prompt_strict` guards.
pub fn read_prompt_lossy(path: &Path) -> Result<String, CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn encode_tokens(
    text: &str,
    vocab_name: VocabName,
    vocab: &Vocabulary,
    arena: &mut EncodeArena,
) -> Result<Vec<llm_cost_core::Rank>, CliError> {
    arena.reset();
    bpe::encode(text, vocab_name, vocab, arena)
        .map_err(|e| CliError::Core(CoreError::Encode(e)))
}

pub type ResourceIdSet = HashSet<String>;
