//! Resolution chain, staleness policy, and alias-resolving lookup for the
//! pricing catalogue.
//!
//! Directory resolution takes an injectable `GovernanceConfig` rather
//! than reading a global cache path — `llm_cost_cli` is the only place
//! that actually reads `std::env`; this module only ever receives
//! already-resolved paths and a `CiContext`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::embedded::EMBEDDED_PRICING_JSON;
use super::schema::{CatalogueDocument, PriceDef, SCHEMA_VERSION};
use crate::CiContext;

pub const MAX_CATALOGUE_BYTES: usize = 10 * 1024 * 1024;
pub const MAX_MODEL_ENTRIES: usize = 1000;
const STALE_GRACE: chrono::Duration = chrono::Duration::days(30);

#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("pricing catalogue at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("pricing catalogue is too large: {bytes} bytes exceeds the {limit} byte limit")]
    TooLarge { bytes: usize, limit: usize },

    #[error("pricing catalogue declares {count} models, exceeding the {limit} entry limit")]
    TooManyModels { count: usize, limit: usize },

    #[error("unsupported schema_version {found}, expected {expected}")]
    UnsupportedSchemaVersion { found: u32, expected: u32 },

    #[error("malformed pricing catalogue JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error(
        "pricing catalogue is critically stale (valid_until {valid_until}, now {now}); pass --force-stale to proceed"
    )]
    CriticallyStale {
        valid_until: DateTime<Utc>,
        now: DateTime<Utc>,
    },
}

/// Where a successfully-loaded catalogue came from, for diagnostics and
/// for the `update` command's "which source did we actually use" report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogueSource {
    ExplicitPath(PathBuf),
    EnvPath(PathBuf),
    UserCache(PathBuf),
    Embedded,
}

/// Caller-resolved configuration for catalogue resolution. Every field is
/// already resolved by `llm_cost_cli` from `--pricing-file`,
/// `LLM_COST_DB_PATH`, and the platform cache directory respectively — this
/// module performs no environment reads of its own.
#[derive(Debug, Clone, Default)]
pub struct ResolutionInputs {
    pub explicit_path: Option<PathBuf>,
    pub env_path: Option<PathBuf>,
    pub user_cache_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    Fresh,
    Stale,
    Critical,
}

/// An immutable, loaded and validated pricing catalogue.
#[derive(Debug, Clone)]
pub struct Catalogue {
    doc: CatalogueDocument,
}

impl Catalogue {
    /// Parse and validate a catalogue document from raw JSON bytes,
    /// applying hardening limits and a schema version check. Does not
    /// evaluate staleness — callers call `staleness` separately with the
    /// `now` they want to evaluate against.
    pub fn parse(bytes: &[u8]) -> Result<Self, PricingError> {
        if bytes.len() > MAX_CATALOGUE_BYTES {
            return Err(PricingError::TooLarge {
                bytes: bytes.len(),
                limit: MAX_CATALOGUE_BYTES,
            });
        }
        let doc: CatalogueDocument = serde_json::from_slice(bytes)?;
        if doc.schema_version != SCHEMA_VERSION {
            return Err(PricingError::UnsupportedSchemaVersion {
                found: doc.schema_version,
                expected: SCHEMA_VERSION,
            });
        }
        if doc.models.len() > MAX_MODEL_ENTRIES {
            return Err(PricingError::TooManyModels {
                count: doc.models.len(),
                limit: MAX_MODEL_ENTRIES,
            });
        }
        Ok(Catalogue { doc })
    }

    /// Resolve a catalogue from the chain: explicit path, then
    /// env-resolved path, then user cache, then the embedded snapshot.
    /// A failure at an earlier step is logged and the chain
    /// continues; the embedded snapshot cannot fail to parse (it is a
    /// build-time asset validated by this crate's own tests).
    pub fn resolve(inputs: &ResolutionInputs) -> (Self, CatalogueSource) {
        let candidates = [
            inputs.explicit_path.clone().map(CatalogueSource::ExplicitPath),
            inputs.env_path.clone().map(CatalogueSource::EnvPath),
            inputs.user_cache_path.clone().map(CatalogueSource::UserCache),
        ];

        for candidate in candidates.into_iter().flatten() {
            let path = match &candidate {
                CatalogueSource::ExplicitPath(p)
                | CatalogueSource::EnvPath(p)
                | CatalogueSource::UserCache(p) => p.clone(),
                CatalogueSource::Embedded => unreachable!(),
            };
            match Self::read_and_parse(&path) {
                Ok(catalogue) => return (catalogue, candidate),
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to load pricing catalogue from this source, trying next"
                    );
                }
            }
        }

        let embedded = Self::parse(EMBEDDED_PRICING_JSON.as_bytes())
            .expect("embedded pricing snapshot must always parse");
        (embedded, CatalogueSource::Embedded)
    }

    fn read_and_parse(path: &Path) -> Result<Self, PricingError> {
        let bytes = std::fs::read(path).map_err(|source| PricingError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&bytes)
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.doc.generated_at
    }

    pub fn valid_until(&self) -> DateTime<Utc> {
        self.doc.valid_until
    }

    pub fn source_label(&self) -> &str {
        &self.doc.source
    }

    pub fn model_count(&self) -> usize {
        self.doc.models.len()
    }

    /// Every model name this catalogue declares pricing for, in sorted
    /// order so callers that enumerate "every model" (the `fairness`
    /// command, absent an explicit `--models` list) get a stable order.
    pub fn model_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.doc.models.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Classify the catalogue's staleness relative to `now`:
    /// `now <= valid_until` is `Fresh`, within 30 days past is `Stale`,
    /// beyond that is `Critical`.
    pub fn staleness(&self, now: DateTime<Utc>) -> Staleness {
        if now <= self.doc.valid_until {
            Staleness::Fresh
        } else if now - self.doc.valid_until <= STALE_GRACE {
            Staleness::Stale
        } else {
            Staleness::Critical
        }
    }

    /// Enforce the staleness policy: in an interactive context, critical
    /// staleness is a hard error unless `force_stale` is set; in CI it is
    /// downgraded to a warning so pricing-data age alone never breaks a
    /// pipeline.
    pub fn enforce_staleness(
        &self,
        now: DateTime<Utc>,
        ci: CiContext,
        force_stale: bool,
    ) -> Result<Staleness, PricingError> {
        let staleness = self.staleness(now);
        match staleness {
            Staleness::Fresh => Ok(staleness),
            Staleness::Stale => {
                tracing::warn!(
                    valid_until = %self.doc.valid_until,
                    "pricing catalogue is stale"
                );
                Ok(staleness)
            }
            Staleness::Critical => {
                if force_stale || ci == CiContext::Ci {
                    tracing::warn!(
                        valid_until = %self.doc.valid_until,
                        now = %now,
                        forced = force_stale,
                        ci = matches!(ci, CiContext::Ci),
                        "pricing catalogue is critically stale"
                    );
                    Ok(staleness)
                } else {
                    Err(PricingError::CriticallyStale {
                        valid_until: self.doc.valid_until,
                        now,
                    })
                }
            }
        }
    }

    /// Resolve a model name to its `PriceDef`, consulting `aliases` on a
    /// direct miss and never recursing past one alias step.
    pub fn lookup(&self, model_name: &str) -> Option<&PriceDef> {
        if let Some(def) = self.doc.models.get(model_name) {
            return Some(def);
        }
        let canonical = self.doc.aliases.get(model_name)?;
        self.doc.models.get(canonical)
    }

    pub fn is_revoked(&self, key_id: &str) -> bool {
        self.doc.revocations.iter().any(|r| r.key_id == key_id)
    }

    /// Every key id this catalogue lists as revoked, for callers (the
    /// `update` command) that need to pass a revocation list into
    /// signature verification before trusting a freshly fetched catalogue.
    pub fn revoked_key_ids(&self) -> Vec<String> {
        self.doc.revocations.iter().map(|r| r.key_id.clone()).collect()
    }
}
