//! The pricing catalogue's JSON schema (version 1).
//!
//! A plain serde-derived schema over USD-per-10^6-token `f64` rates,
//! preferring plain config structs over builder machinery for
//! deserialized data.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Provider enum values use exact case as required for downstream FOCUS
/// conformance: `OpenAI`, `Anthropic`, `Google`, `Azure`, `AWS`,
/// `Mistral`, `Cohere`, `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    OpenAI,
    Anthropic,
    Google,
    Azure,
    AWS,
    Mistral,
    Cohere,
    Unknown,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Provider::OpenAI => "OpenAI",
            Provider::Anthropic => "Anthropic",
            Provider::Google => "Google",
            Provider::Azure => "Azure",
            Provider::AWS => "AWS",
            Provider::Mistral => "Mistral",
            Provider::Cohere => "Cohere",
            Provider::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// A single model's pricing entry. Rate fields are `Option<f64>` since
/// "no such rate" and "zero rate" are distinct — conflating the two
/// would silently under-price cache usage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceDef {
    pub provider: Provider,
    pub display_name: String,
    pub input_cost_per_mtok: f64,
    pub output_cost_per_mtok: f64,
    #[serde(default)]
    pub cache_read_cost_per_mtok: Option<f64>,
    #[serde(default)]
    pub cache_write_cost_per_mtok: Option<f64>,
    #[serde(default)]
    pub reasoning_cost_per_mtok: Option<f64>,
    pub context_window: u64,
    #[serde(default)]
    pub deprecation_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl PriceDef {
    /// All declared rates are non-negative.
    pub fn has_non_negative_rates(&self) -> bool {
        let optional_ok = [
            self.cache_read_cost_per_mtok,
            self.cache_write_cost_per_mtok,
            self.reasoning_cost_per_mtok,
        ]
        .into_iter()
        .flatten()
        .all(|rate| rate >= 0.0);
        self.input_cost_per_mtok >= 0.0 && self.output_cost_per_mtok >= 0.0 && optional_ok
    }
}

/// A revoked signing key entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Revocation {
    pub key_id: String,
    pub revoked_at: DateTime<Utc>,
    pub reason: String,
}

pub const SCHEMA_VERSION: u32 = 1;

/// The full pricing catalogue document, as parsed from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogueDocument {
    pub schema_version: u32,
    pub generated_at: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub source: String,
    pub models: HashMap<String, PriceDef>,
    #[serde(default)]
    pub aliases: HashMap<String, String>,
    #[serde(default)]
    pub revocations: Vec<Revocation>,
}
