//! The `Vocabulary` type: an immutable, loaded BPE2 vocabulary with O(1)
//! rank -> bytes and bytes -> rank lookup.
//!
//! `Vocabulary` owns the full byte buffer (`Arc<[u8]>` so it can be
//! shared across an `Arc` without cloning the blob) and the entry table
//! built by `vocab::format`, plus a `FxHashMap` for the reverse
//! bytes -> rank lookup.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use sha2::{Digest, Sha256};

use super::format::{self, Entry, VocabFormatError};
use crate::Rank;

#[derive(Debug, thiserror::Error)]
pub enum VocabError {
    #[error(transparent)]
    Format(#[from] VocabFormatError),
}

/// A vocabulary's fixed, well-known name. Determines which pre-tokenizer
/// pattern `pretokenize` applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VocabName {
    Cl100kBase,
    O200kBase,
}

impl VocabName {
    pub fn as_str(&self) -> &'static str {
        match self {
            VocabName::Cl100kBase => "cl100k_base",
            VocabName::O200kBase => "o200k_base",
        }
    }
}

/// An immutable, loaded vocabulary. Construction validates every
/// invariant: ranks `0..N` are contiguous, each rank maps to a unique
/// non-empty byte sequence, and the reverse (bytes -> rank) lookup is
/// total on the encoded vocabulary.
pub struct Vocabulary {
    name: VocabName,
    blob: Arc<[u8]>,
    entries: Vec<Entry>,
    by_bytes: FxHashMap<Box<[u8]>, Rank>,
    max_token_len: u32,
    source_sha256: [u8; format::SHA256_LEN],
}

impl Vocabulary {
    /// Load a vocabulary from a BPE2 binary buffer. `name` is supplied by
    /// the caller (the binary format does not self-describe which
    /// pre-tokenizer pattern applies; that association lives one level up,
    /// in whatever embeds or selects the blob).
    pub fn load(name: VocabName, buf: &[u8]) -> Result<Self, VocabError> {
        let header = format::parse_header(buf)?;
        let (entries, blob) = format::parse_entries_and_blob(buf, &header)?;

        let mut by_bytes = FxHashMap::with_capacity_and_hasher(entries.len(), Default::default());
        for (rank, entry) in entries.iter().enumerate() {
            let bytes = &blob[entry.offset as usize..entry.offset as usize + entry.length as usize];
            by_bytes.insert(bytes.to_vec().into_boxed_slice(), rank as Rank);
        }

        Ok(Vocabulary {
            name,
            blob: Arc::from(blob),
            entries,
            by_bytes,
            max_token_len: header.max_token_len,
            source_sha256: header.source_sha256,
        })
    }

    pub fn name(&self) -> VocabName {
        self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_token_len(&self) -> u32 {
        self.max_token_len
    }

    pub fn source_sha256(&self) -> [u8; format::SHA256_LEN] {
        self.source_sha256
    }

    /// O(1) decode: rank -> its byte sequence. Panics if `rank` is outside
    /// `0..len()` — callers only ever pass ranks produced by this same
    /// vocabulary's encoder or lookup, so an out-of-range rank is an
    /// internal invariant violation, not a user error.
    pub fn bytes_of(&self, rank: Rank) -> &[u8] {
        let entry = self.entries[rank as usize];
        &self.blob[entry.offset as usize..entry.offset as usize + entry.length as usize]
    }

    /// O(1) forward lookup: byte sequence -> rank, if present in the
    /// vocabulary.
    pub fn rank_of(&self, bytes: &[u8]) -> Option<Rank> {
        self.by_bytes.get(bytes).copied()
    }

    /// Re-derive the SHA-256 of the concatenated blob as currently loaded,
    /// for provenance spot-checks independent of the header's recorded
    /// hash (the header hash is over the *original* `.tiktoken` source, not
    /// the BPE2 blob, so this is a different, supplementary check used only
    /// by test fixtures and the `vocab::builder` round-trip tests).
    #[doc(hidden)]
    pub fn blob_sha256(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(&self.blob);
        hasher.finalize().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::builder::VocabBuilder;

    fn tiny_vocab() -> Vocabulary {
        let mut builder = VocabBuilder::new();
        for byte in 0u16..=255 {
            builder.push_token(&[byte as u8]);
        }
        builder.push_token(b"he");
        builder.push_token(b"llo");
        builder.push_token(b"hello");
        let bytes = builder.build();
        Vocabulary::load(VocabName::Cl100kBase, &bytes).unwrap()
    }

    #[test]
    fn round_trips_every_token() {
        let vocab = tiny_vocab();
        for rank in 0..vocab.len() as Rank {
            let bytes = vocab.bytes_of(rank).to_vec();
            assert_eq!(vocab.rank_of(&bytes), Some(rank));
        }
    }

    #[test]
    fn every_rank_maps_to_nonempty_bytes_within_max_len() {
        let vocab = tiny_vocab();
        for rank in 0..vocab.len() as Rank {
            let bytes = vocab.bytes_of(rank);
            assert!(!bytes.is_empty());
            assert!(bytes.len() as u32 <= vocab.max_token_len());
        }
    }

    #[test]
    fn byte_level_totality() {
        let vocab = tiny_vocab();
        for byte in 0u16..=255 {
            assert!(vocab.rank_of(&[byte as u8]).is_some());
        }
    }

    #[test]
    fn rejects_truncated_file() {
        let err = Vocabulary::load(VocabName::Cl100kBase, &[0u8; 4]).unwrap_err();
        assert!(matches!(err, VocabError::Format(VocabFormatError::TruncatedHeader { .. })));
    }
}
