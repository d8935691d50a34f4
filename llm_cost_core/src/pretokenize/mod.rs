//! Splits input text into regex-defined pieces; the BPE encoder runs within
//! each piece independently. See `split` for the public entry point and
//! `pattern` for the cl100k/o200k pattern definitions.

pub mod pattern;
pub mod split;

pub use split::{split, PreTokenizeError};
