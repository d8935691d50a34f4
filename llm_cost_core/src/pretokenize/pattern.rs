//! The cl100k_base / o200k_base pre-tokenizer regex patterns.
//!
//! These pin the exact llama.cpp-derived patterns (including the
//! `\s+(?!\S)` trailing-whitespace lookahead) and compile them with
//! `fancy-regex` rather than `regex`, since lookahead is not expressible
//! in the latter. Compiled once with `std::sync::LazyLock`, the usual
//! lazy-static idiom for this kind of constant regex elsewhere in the
//! workspace.

use std::sync::LazyLock;

use fancy_regex::Regex;

use crate::vocab::VocabName;

/// The cl100k_base split pattern, byte-identical to OpenAI's reference
/// `cl100k_base` pre-tokenizer regex.
pub const CL100K_PATTERN: &str =
    r"'(?i:[sdmt]|ll|ve|re)|[^\r\n\p{L}\p{N}]?\p{L}+|\p{N}{1,3}| ?[^\s\p{L}\p{N}]+[\r\n]*|\s*[\r\n]+|\s+(?!\S)|\s+";

/// The o200k_base split pattern: broader digit handling (still 1-3 digits,
/// but cased separately from the letter-run alternatives below) and a
/// refined, case-folded contraction set, matching OpenAI's reference
/// `o200k_base` pre-tokenizer regex.
pub const O200K_PATTERN: &str = concat!(
    r"[^\r\n\p{L}\p{N}]?[\p{Lu}\p{Lt}\p{Lm}\p{Lo}\p{M}]*[\p{Ll}\p{Lm}\p{Lo}\p{M}]+(?i:'s|'t|'re|'ve|'m|'ll|'d)?",
    r"|[^\r\n\p{L}\p{N}]?[\p{Lu}\p{Lt}\p{Lm}\p{Lo}\p{M}]+[\p{Ll}\p{Lm}\p{Lo}\p{M}]*(?i:'s|'t|'re|'ve|'m|'ll|'d)?",
    r"|\p{N}{1,3}",
    r"| ?[^\s\p{L}\p{N}]+[\r\n/]*",
    r"|\s*[\r\n]+",
    r"|\s+(?!\S)",
    r"|\s+",
);

static CL100K_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(CL100K_PATTERN).expect("cl100k pattern is a fixed, valid regex"));

static O200K_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(O200K_PATTERN).expect("o200k pattern is a fixed, valid regex"));

/// Return the compiled pattern for a vocabulary's pre-tokenizer.
pub fn pattern_for(vocab_name: VocabName) -> &'static Regex {
    match vocab_name {
        VocabName::Cl100kBase => &CL100K_REGEX,
        VocabName::O200kBase => &O200K_REGEX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_compile() {
        let _ = pattern_for(VocabName::Cl100kBase);
        let _ = pattern_for(VocabName::O200kBase);
    }
}
