//! The budget/allow-list policy value itself. Parsing from TOML is a
//! CLI-boundary concern (`llm_cost_cli::manifest`); this module only
//! defines the shape, as a plain serde-derived struct matching the rest
//! of this crate's deserialized-configuration style.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Policy {
    #[serde(default)]
    pub allowed_models: Option<Vec<String>>,
    #[serde(default)]
    pub max_cost_usd: Option<f64>,
}
