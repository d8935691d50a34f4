//! TOML project manifest parsing: turns a project's manifest file into
//! the `Policy` value the core consumes. Plain serde-derived structs,
//! matching this workspace's usual style for deserialized
//! configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use llm_cost_core::policy::Policy;

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("reading manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromptEntry {
    pub path: PathBuf,
    #[serde(default)]
    pub prompt_id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub default_model: Option<String>,
    #[serde(default)]
    pub allowed_models: Option<Vec<String>>,
    #[serde(default)]
    pub max_cost_usd: Option<f64>,
    #[serde(default)]
    pub prompts: Vec<PromptEntry>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Manifest, ManifestError> {
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn policy(&self) -> Policy {
        Policy {
            allowed_models: self.allowed_models.clone(),
            max_cost_usd: self.max_cost_usd,
        }
    }

    /// Resolve the model for a prompt entry: its own override, else the
    /// manifest-wide default.
    pub fn model_for<'a>(&'a self, entry: &'a PromptEntry) -> Option<&'a str> {
        entry.model.as_deref().or(self.default_model.as_deref())
    }
}
