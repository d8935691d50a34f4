//! Resource-id derivation and content hashing for prompts.

pub mod identity;

pub use identity::{content_hash, resource_id};
