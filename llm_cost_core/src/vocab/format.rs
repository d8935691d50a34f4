//! The BPE2 binary vocabulary format.
//!
//! Adapted from: `llm_models::local_model::gguf::tools::gguf_file` — same
//! "validate the header, then trust byte-exact offsets into the rest of the
//! buffer" reading discipline, but for a much flatter format: a fixed
//! 64-byte header, a flat `(offset, length)` entry table, and a single
//! trailing blob of concatenated token byte sequences.
//!
//! ```text
//! byte 0..3   magic "BPE2"
//! byte 4..7   format version (u32 LE, = 1)
//! byte 8..11  token count N (u32 LE)
//! byte 12..15 max token byte length (u32 LE)
//! byte 16..19 blob size in bytes (u32 LE)
//! byte 20..51 SHA-256 of the originating .tiktoken source (32 bytes)
//! byte 52..63 reserved, zero (12 bytes)
//! byte 64..   N * (offset: u32 LE, length: u32 LE)
//! byte ...    blob (concatenated token byte sequences)
//! ```

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;

pub const MAGIC: &[u8; 4] = b"BPE2";
pub const SUPPORTED_VERSION: u32 = 1;
pub const HEADER_LEN: usize = 64;
pub const SHA256_LEN: usize = 32;
const ENTRY_LEN: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum VocabFormatError {
    #[error("vocabulary file is too short to contain a header: {len} bytes")]
    TruncatedHeader { len: usize },

    #[error("bad magic bytes: expected {expected:?}, found {found:?}")]
    BadMagic { expected: [u8; 4], found: [u8; 4] },

    #[error("unsupported format version: {0}")]
    UnsupportedVersion(u32),

    #[error("file truncated: expected at least {expected} bytes, found {found}")]
    TruncatedFile { expected: usize, found: usize },

    #[error("entry {index} out of bounds: offset {offset}, length {length}, blob size {blob_size}")]
    EntryOutOfBounds {
        index: usize,
        offset: u32,
        length: u32,
        blob_size: u32,
    },

    #[error("declared blob size {declared} does not match remaining bytes {actual}")]
    BlobSizeMismatch { declared: u32, actual: usize },
}

/// The parsed, still-unvalidated 64-byte header.
#[derive(Debug, Clone, Copy)]
pub struct Header {
    pub version: u32,
    pub token_count: u32,
    pub max_token_len: u32,
    pub blob_size: u32,
    pub source_sha256: [u8; SHA256_LEN],
}

/// A single entry in the `(offset, length)` table, pointing into the blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub offset: u32,
    pub length: u32,
}

/// Parse and validate the 64-byte header. Does not touch the entry table or
/// blob — callers validate those separately once they know `token_count`.
pub fn parse_header(buf: &[u8]) -> Result<Header, VocabFormatError> {
    if buf.len() < HEADER_LEN {
        return Err(VocabFormatError::TruncatedHeader { len: buf.len() });
    }

    let mut found = [0u8; 4];
    found.copy_from_slice(&buf[0..4]);
    if &found != MAGIC {
        return Err(VocabFormatError::BadMagic {
            expected: *MAGIC,
            found,
        });
    }

    let mut cursor = Cursor::new(&buf[4..HEADER_LEN]);
    let version = cursor
        .read_u32::<LittleEndian>()
        .expect("slice is pre-sliced to header length");
    if version != SUPPORTED_VERSION {
        return Err(VocabFormatError::UnsupportedVersion(version));
    }
    let token_count = cursor
        .read_u32::<LittleEndian>()
        .expect("slice is pre-sliced to header length");
    let max_token_len = cursor
        .read_u32::<LittleEndian>()
        .expect("slice is pre-sliced to header length");
    let blob_size = cursor
        .read_u32::<LittleEndian>()
        .expect("slice is pre-sliced to header length");

    let mut source_sha256 = [0u8; SHA256_LEN];
    source_sha256.copy_from_slice(&buf[20..20 + SHA256_LEN]);

    Ok(Header {
        version,
        token_count,
        max_token_len,
        blob_size,
        source_sha256,
    })
}

/// Parse the `N * (offset, length)` entry table immediately following the
/// header, and return it alongside the blob slice. Every entry is checked
/// against `blob_size` before returning; alignment-unsafe reads are avoided
/// by always going through `byteorder`'s explicit little-endian reads
/// rather than transmuting the buffer.
pub fn parse_entries_and_blob<'a>(
    buf: &'a [u8],
    header: &Header,
) -> Result<(Vec<Entry>, &'a [u8]), VocabFormatError> {
    let entries_len = header.token_count as usize * ENTRY_LEN;
    let entries_end = HEADER_LEN
        .checked_add(entries_len)
        .expect("entries_len overflow would imply an absurd token_count");

    if buf.len() < entries_end {
        return Err(VocabFormatError::TruncatedFile {
            expected: entries_end,
            found: buf.len(),
        });
    }

    let mut entries = Vec::with_capacity(header.token_count as usize);
    let mut cursor = Cursor::new(&buf[HEADER_LEN..entries_end]);
    for index in 0..header.token_count as usize {
        let offset = cursor
            .read_u32::<LittleEndian>()
            .map_err(|_| VocabFormatError::TruncatedFile {
                expected: entries_end,
                found: buf.len(),
            })?;
        let length = cursor
            .read_u32::<LittleEndian>()
            .map_err(|_| VocabFormatError::TruncatedFile {
                expected: entries_end,
                found: buf.len(),
            })?;
        entries.push(Entry { offset, length });
        let _ = index;
    }

    let blob = &buf[entries_end..];
    if blob.len() != header.blob_size as usize {
        return Err(VocabFormatError::BlobSizeMismatch {
            declared: header.blob_size,
            actual: blob.len(),
        });
    }

    for (index, entry) in entries.iter().enumerate() {
        let end = entry.offset as u64 + entry.length as u64;
        if end > header.blob_size as u64 {
            return Err(VocabFormatError::EntryOutOfBounds {
                index,
                offset: entry.offset,
                length: entry.length,
                blob_size: header.blob_size,
            });
        }
    }

    Ok((entries, blob))
}
