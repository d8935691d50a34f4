//! Splitting a string into BPE-mergeable pieces.
//!
//! The encoder runs BPE within each piece independently; `split` preserves
//! a concatenation property: for any split `s = a ++ b` at a piece
//! boundary, `pieces(s) = pieces(a) ++ pieces(b)`.
//! `fancy_regex::Regex::find_iter` already gives this for free since each
//! match only ever depends on the text from the previous match's end
//! onward (the lookahead in `\s+(?!\S)` only looks forward, never
//! backward, so re-splitting a suffix starting at a match boundary always
//! reproduces the same pieces).

use crate::vocab::VocabName;

use super::pattern::pattern_for;

#[derive(Debug, thiserror::Error)]
pub enum PreTokenizeError {
    #[error("pre-tokenizer pattern match failed: {0}")]
    RegexEngine(String),
}

/// Split `text` into pieces per `vocab_name`'s pre-tokenizer pattern.
/// Total on any `&str` (always valid UTF-8 by Rust's type system) — see
/// `DESIGN.md` for the UTF-8 strictness policy, which lives at the CLI
/// boundary, not here.
pub fn split<'a>(text: &'a str, vocab_name: VocabName) -> Result<Vec<&'a str>, PreTokenizeError> {
    let pattern = pattern_for(vocab_name);
    let mut pieces = Vec::new();
    for found in pattern.find_iter(text) {
        let m = found.map_err(|e| PreTokenizeError::RegexEngine(e.to_string()))?;
        pieces.push(m.as_str());
    }
    Ok(pieces)
}
