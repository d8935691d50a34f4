//! Serialize a set of tokens into the BPE2 binary format.
//!
//! Real multi-hundred-KB `cl100k_base` / `o200k_base` vocabulary blobs
//! are not checked into this repo, so tests and the embedded snapshot
//! build construct small, exact-format vocabularies with this builder
//! instead of shipping multi-gigabyte binary files.
//!
//! `pub` (not `#[cfg(test)]`-gated) because `llm_cost_cli`'s pricing/vocab
//! fixture tooling uses it too, but `#[doc(hidden)]` since it is not part of
//! the crate's public contract.

use sha2::{Digest, Sha256};

use super::format::{HEADER_LEN, MAGIC, SHA256_LEN, SUPPORTED_VERSION};

#[doc(hidden)]
#[derive(Debug, Default)]
pub struct VocabBuilder {
    tokens: Vec<Vec<u8>>,
}

impl VocabBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a token's byte sequence; its rank is its insertion order.
    pub fn push_token(&mut self, bytes: &[u8]) -> &mut Self {
        self.tokens.push(bytes.to_vec());
        self
    }

    /// Serialize into the BPE2 binary format, computing the header's
    /// source SHA-256 over the concatenated token bytes (since this builder
    /// has no real `.tiktoken` source file to hash).
    pub fn build(&self) -> Vec<u8> {
        let max_len = self.tokens.iter().map(|t| t.len()).max().unwrap_or(0) as u32;
        let blob: Vec<u8> = self.tokens.concat();
        let blob_size = blob.len() as u32;

        let mut hasher = Sha256::new();
        for token in &self.tokens {
            hasher.update(token);
        }
        let source_sha256: [u8; SHA256_LEN] = hasher.finalize().into();

        let mut out = Vec::with_capacity(HEADER_LEN + self.tokens.len() * 8 + blob.len());
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&SUPPORTED_VERSION.to_le_bytes());
        out.extend_from_slice(&(self.tokens.len() as u32).to_le_bytes());
        out.extend_from_slice(&max_len.to_le_bytes());
        out.extend_from_slice(&blob_size.to_le_bytes());
        out.extend_from_slice(&source_sha256);
        out.extend_from_slice(&[0u8; 12]); // reserved

        let mut offset = 0u32;
        for token in &self.tokens {
            out.extend_from_slice(&offset.to_le_bytes());
            out.extend_from_slice(&(token.len() as u32).to_le_bytes());
            offset += token.len() as u32;
        }

        out.extend_from_slice(&blob);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::loader::Vocabulary;
    use crate::vocab::VocabName;

    #[test]
    fn builder_output_loads_back() {
        let mut builder = VocabBuilder::new();
        builder.push_token(b"a").push_token(b"b").push_token(b"ab");
        let bytes = builder.build();
        let vocab = Vocabulary::load(VocabName::Cl100kBase, &bytes).unwrap();
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.bytes_of(2), b"ab");
        assert_eq!(vocab.rank_of(b"ab"), Some(2));
    }
}
