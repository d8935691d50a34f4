//! The rank-ordered byte-pair merge encoder.
//!
//! A struct-of-arrays slot list (`token`/`prev`/`next`/`valid`, parallel
//! arrays indexed by slot) plus a binary-heap of `(rank, left_slot)`
//! merge candidates with lazy deletion, so the merge loop never scans a
//! `HashMap<(String, String), usize>` keyed by merge text — slots are
//! addressed by index throughout rather than through a graph of owning
//! nodes.

use crate::vocab::Vocabulary;
use crate::Rank;

use super::arena::{Candidate, EncodeArena, NONE};

#[derive(Debug, thiserror::Error)]
pub enum BpeError {
    #[error("internal invariant violated: {0}")]
    Invariant(String),
}

/// Encode a single pre-tokenized piece (bytes, never crossing a piece
/// boundary) into its ordered token sequence. Byte-level: every byte in
/// `piece` starts life as its own token (the vocabulary guarantees every
/// byte value has an entry, so this step never fails).
///
/// `arena` must be `.reset()` between calls by the caller that owns it
/// (callers sharing one arena across many pieces within one input should
/// NOT reset between pieces of the *same* input, only between separate
/// inputs — each call here only appends to and reads from the arena's
/// current piece range, so no reset is needed internally).
pub fn encode_piece(
    vocab: &Vocabulary,
    piece: &[u8],
    arena: &mut EncodeArena,
) -> Result<Vec<Rank>, BpeError> {
    let base = arena.token.len();
    let n = piece.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    for (i, &byte) in piece.iter().enumerate() {
        let rank = vocab.rank_of(&[byte]).ok_or_else(|| {
            BpeError::Invariant(format!(
                "vocabulary has no single-byte token for byte {byte}; byte-level totality violated"
            ))
        })?;
        arena.token.push(rank);
        arena.prev.push(if i == 0 { NONE } else { (base + i - 1) as u32 });
        arena.next.push(if i + 1 < n { (base + i + 1) as u32 } else { NONE });
        arena.valid.push(true);
    }

    let slot_of = |local: usize| base + local;

    for local in 0..n.saturating_sub(1) {
        let left = slot_of(local) as u32;
        push_candidate(vocab, arena, left)?;
    }

    while let Some(Candidate { rank, left }) = arena.heap.pop() {
        if !arena.valid[left as usize] {
            continue;
        }
        let right = arena.next[left as usize];
        if right == NONE {
            continue;
        }
        if !arena.valid[right as usize] {
            continue;
        }
        let current_rank = match merge_rank(vocab, arena, left, right) {
            Some(r) => r,
            None => continue,
        };
        if current_rank != rank {
            continue;
        }

        arena.token[left as usize] = current_rank;
        let new_right = arena.next[right as usize];
        arena.next[left as usize] = new_right;
        if new_right != NONE {
            arena.prev[new_right as usize] = left;
        }
        arena.valid[right as usize] = false;

        let left_prev = arena.prev[left as usize];
        if left_prev != NONE {
            push_candidate(vocab, arena, left_prev)?;
        }
        if arena.next[left as usize] != NONE {
            push_candidate(vocab, arena, left)?;
        }
    }

    let mut out = Vec::with_capacity(n);
    let mut cursor = base as u32;
    loop {
        if arena.valid[cursor as usize] {
            out.push(arena.token[cursor as usize]);
        }
        let next = arena.next[cursor as usize];
        if next == NONE {
            break;
        }
        cursor = next;
    }
    Ok(out)
}

fn push_candidate(
    vocab: &Vocabulary,
    arena: &mut EncodeArena,
    left: u32,
) -> Result<(), BpeError> {
    let right = arena.next[left as usize];
    if right == NONE {
        return Ok(());
    }
    if let Some(rank) = merge_rank(vocab, arena, left, right) {
        arena.heap.push(Candidate { rank, left });
    }
    Ok(())
}

fn merge_rank(vocab: &Vocabulary, arena: &mut EncodeArena, left: u32, right: u32) -> Option<Rank> {
    let left_bytes = vocab.bytes_of(arena.token[left as usize]);
    let right_bytes = vocab.bytes_of(arena.token[right as usize]);
    arena.scratch.clear();
    arena.scratch.extend_from_slice(left_bytes);
    arena.scratch.extend_from_slice(right_bytes);
    vocab.rank_of(&arena.scratch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::builder::VocabBuilder;
    use crate::vocab::VocabName;

    fn byte_vocab_with_merges(merges: &[&[u8]]) -> Vocabulary {
        let mut builder = VocabBuilder::new();
        for byte in 0u16..=255 {
            builder.push_token(&[byte as u8]);
        }
        for merge in merges {
            builder.push_token(merge);
        }
        Vocabulary::load(VocabName::Cl100kBase, &builder.build()).unwrap()
    }

    #[test]
    fn empty_piece_yields_empty_sequence() {
        let vocab = byte_vocab_with_merges(&[]);
        let mut arena = EncodeArena::new();
        let out = encode_piece(&vocab, b"", &mut arena).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn byte_level_totality() {
        let vocab = byte_vocab_with_merges(&[]);
        for byte in 0u16..=255 {
            let mut arena = EncodeArena::new();
            let out = encode_piece(&vocab, &[byte as u8], &mut arena).unwrap();
            assert!(!out.is_empty());
        }
    }

    #[test]
    fn merges_greedily_by_rank() {
        // "he" (rank 256) ranks before "ll" (rank 257) before "hello" (258).
        let vocab = byte_vocab_with_merges(&[b"he", b"ll", b"hello"]);
        let mut arena = EncodeArena::new();
        let out = encode_piece(&vocab, b"hello", &mut arena).unwrap();
        // Expect "he" + "ll" + "o" to merge greedily by rank, but since
        // "hello" is a token too and "he"+"llo" isn't a registered merge,
        // the actual result depends on which adjacent merges exist. With
        // "he" and "ll" both registered and no "hello"-from-those-parts
        // merge, expect tokens for "he", "ll", "o".
        let he = vocab.rank_of(b"he").unwrap();
        let ll = vocab.rank_of(b"ll").unwrap();
        let o = vocab.rank_of(b"o").unwrap();
        assert_eq!(out, vec![he, ll, o]);
    }

    #[test]
    fn determinism_across_repeated_calls() {
        let vocab = byte_vocab_with_merges(&[b"ab", b"abc", b"abcd"]);
        let piece = b"abcdabcdabcd";
        let mut arena = EncodeArena::new();
        let first = encode_piece(&vocab, piece, &mut arena).unwrap();
        arena.reset();
        let second = encode_piece(&vocab, piece, &mut arena).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn no_quadratic_blowup_on_pathological_input() {
        let vocab = byte_vocab_with_merges(&[b"aa"]);
        let small = "a".repeat(10_000);
        let large = "a".repeat(100_000);

        let mut arena = EncodeArena::new();
        let start_small = std::time::Instant::now();
        let _ = encode_piece(&vocab, small.as_bytes(), &mut arena).unwrap();
        let small_elapsed = start_small.elapsed();

        arena.reset();
        let start_large = std::time::Instant::now();
        let _ = encode_piece(&vocab, large.as_bytes(), &mut arena).unwrap();
        let large_elapsed = start_large.elapsed();

        // Sub-quadratic: 10x the input should cost well under 10x * 10x the
        // time. Generous margin to avoid CI flakiness.
        assert!(
            large_elapsed.as_secs_f64() <= small_elapsed.as_secs_f64() * 50.0 + 0.5,
            "large={:?} small={:?}",
            large_elapsed,
            small_elapsed
        );
    }

    #[test]
    fn arena_reuse_across_many_pieces_in_one_input() {
        let vocab = byte_vocab_with_merges(&[b"he", b"ll", b"o"]);
        let mut arena = EncodeArena::new();
        let first = encode_piece(&vocab, b"hello", &mut arena).unwrap();
        arena.reset();
        let second = encode_piece(&vocab, b"hello", &mut arena).unwrap();
        assert_eq!(first, second);
    }
}
