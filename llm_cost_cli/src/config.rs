//! Injectable CLI configuration, resolved once from flags and the
//! environment at startup and threaded through every command instead of
//! read piecemeal from `std::env` deep in call stacks — "no global
//! mutable cache path" is a design constraint on this binary itself,
//! not just on `llm_cost_core`.
//!
//! Directory resolution uses the `directories` crate for platform cache
//! roots.

use std::path::PathBuf;

use llm_cost_core::pricing::ResolutionInputs;
use llm_cost_core::CiContext;

#[derive(Debug, Clone)]
pub struct GovernanceConfig {
    pub pricing_file: Option<PathBuf>,
    pub force_stale: bool,
    pub ci: CiContext,
}

impl GovernanceConfig {
    pub fn resolve(pricing_file: Option<PathBuf>, force_stale: bool, ci_override: Option<bool>) -> Self {
        let ci = match ci_override {
            Some(true) => CiContext::Ci,
            Some(false) => CiContext::Interactive,
            None => detect_ci_from_env(),
        };
        GovernanceConfig {
            pricing_file,
            force_stale,
            ci,
        }
    }

    pub fn resolution_inputs(&self) -> ResolutionInputs {
        ResolutionInputs {
            explicit_path: self.pricing_file.clone(),
            env_path: std::env::var_os("LLM_COST_DB_PATH").map(PathBuf::from),
            user_cache_path: user_cache_dir().map(|dir| dir.join("pricing_db.json")),
        }
    }
}

/// `LLM_COST_GOV_CI` overrides the generic `CI`/`GITHUB_ACTIONS`
/// auto-detection, for callers (diff, benchmark) that want CI semantics
/// without actually running inside a CI runner.
fn detect_ci_from_env() -> CiContext {
    if let Ok(value) = std::env::var("LLM_COST_GOV_CI") {
        return CiContext::detect_from_env(Some(&value), None);
    }
    CiContext::detect_from_env(
        std::env::var("CI").ok().as_deref(),
        std::env::var("GITHUB_ACTIONS").ok().as_deref(),
    )
}

/// `${XDG_CACHE_HOME:-$HOME/.cache}/llm-cost/` on Unix-like systems,
/// `%LOCALAPPDATA%\llm-cost\` on Windows.
pub fn user_cache_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.cache_dir().join("llm-cost"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn llm_cost_gov_ci_override_takes_precedence() {
        std::env::set_var("LLM_COST_GOV_CI", "true");
        std::env::remove_var("CI");
        std::env::remove_var("GITHUB_ACTIONS");
        let config = GovernanceConfig::resolve(None, false, None);
        assert_eq!(config.ci, CiContext::Ci);
        std::env::remove_var("LLM_COST_GOV_CI");
    }

    #[test]
    fn explicit_flag_overrides_everything() {
        std::env::set_var("CI", "true");
        let config = GovernanceConfig::resolve(None, false, Some(false));
        assert_eq!(config.ci, CiContext::Interactive);
        std::env::remove_var("CI");
    }
}
