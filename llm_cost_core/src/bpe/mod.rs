//! The byte-level BPE encoder: pre-tokenize, then rank-ordered merge within
//! each piece. See `encoder` for the merge algorithm and `arena` for the
//! reusable per-encode scratch storage.

pub mod arena;
pub mod encoder;

pub use arena::EncodeArena;
pub use encoder::BpeError;

use crate::pretokenize::{self, PreTokenizeError};
use crate::vocab::{VocabName, Vocabulary};
use crate::Rank;

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error(transparent)]
    PreTokenize(#[from] PreTokenizeError),

    #[error(transparent)]
    Bpe(#[from] BpeError),
}

/// Encode a full UTF-8 string: split into pieces, then run byte-level BPE
/// merges within each piece, concatenating the results. This is the public
/// entry point for the pipeline: raw text -> pre-tokenizer -> byte piece
/// -> BPE encoder -> token ids.
///
/// `arena` should be reset by the caller once per input (not per piece —
/// pieces of the same input share one growing arena, which is then reset
/// before the next input, giving pipe mode O(1) amortised allocation per
/// line).
pub fn encode(
    text: &str,
    vocab_name: VocabName,
    vocab: &Vocabulary,
    arena: &mut EncodeArena,
) -> Result<Vec<Rank>, EncodeError> {
    let pieces = pretokenize::split(text, vocab_name)?;
    let mut tokens = Vec::new();
    for piece in pieces {
        let piece_tokens = encoder::encode_piece(vocab, piece.as_bytes(), arena)?;
        tokens.extend(piece_tokens);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::builder::VocabBuilder;

    fn byte_vocab() -> Vocabulary {
        let mut builder = VocabBuilder::new();
        for byte in 0u16..=255 {
            builder.push_token(&[byte as u8]);
        }
        Vocabulary::load(VocabName::Cl100kBase, &builder.build()).unwrap()
    }

    #[test]
    fn empty_input_yields_empty_sequence() {
        let vocab = byte_vocab();
        let mut arena = EncodeArena::new();
        let out = encode("", VocabName::O200kBase, &vocab, &mut arena).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn isolated_spaces_are_byte_level_fallback() {
        // Three spaces under cl100k_base with a byte-only vocabulary
        // encode as three individual space tokens.
        let vocab = byte_vocab();
        let mut arena = EncodeArena::new();
        let out = encode("   ", VocabName::Cl100kBase, &vocab, &mut arena).unwrap();
        let space = vocab.rank_of(b" ").unwrap();
        assert_eq!(out, vec![space, space, space]);
    }

    #[test]
    fn deterministic_across_repeated_encodes() {
        let vocab = byte_vocab();
        let mut arena = EncodeArena::new();
        let a = encode("Hello, world! 123", VocabName::O200kBase, &vocab, &mut arena).unwrap();
        arena.reset();
        let b = encode("Hello, world! 123", VocabName::O200kBase, &vocab, &mut arena).unwrap();
        assert_eq!(a, b);
    }
}
