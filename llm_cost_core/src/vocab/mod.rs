//! The BPE2 binary vocabulary format and the immutable `Vocabulary` it
//! loads into. See `format` for the on-disk layout and `loader` for the
//! loaded, queryable representation.

pub mod builder;
pub mod format;
pub mod loader;

pub use format::VocabFormatError;
pub use loader::{VocabError, VocabName, Vocabulary};
