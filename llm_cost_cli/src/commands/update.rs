//! `update`: verify a freshly fetched pricing catalogue against its
//! detached signature and install it into the user cache directory.
//! The fetch itself happens outside this binary; this command only
//! trusts and stores what it is handed.

use llm_cost_core::pricing::Catalogue;
use llm_cost_core::verify;
use llm_cost_core::CoreError;

use crate::cli::UpdateArgs;
use crate::cli_error::CliError;
use crate::config::{self, GovernanceConfig};

pub fn run(args: &UpdateArgs, config: &GovernanceConfig) -> Result<(), CliError> {
    let catalogue_bytes = std::fs::read(&args.catalogue_file).map_err(|source| CliError::Io {
        path: args.catalogue_file.clone(),
        source,
    })?;
    let signature_text = std::fs::read_to_string(&args.signature_file).map_err(|source| CliError::Io {
        path: args.signature_file.clone(),
        source,
    })?;

    let (current, _source) = Catalogue::resolve(&config.resolution_inputs());
    let revoked = current.revoked_key_ids();

    verify::verify(&catalogue_bytes, &signature_text, &revoked)
        .map_err(|e| CliError::Core(CoreError::Verify(e)))?;

    let parsed = Catalogue::parse(&catalogue_bytes).map_err(|e| CliError::Core(CoreError::Pricing(e)))?;

    let cache_dir = config::user_cache_dir()
        .ok_or_else(|| CliError::Usage("could not resolve a user cache directory".to_string()))?;
    std::fs::create_dir_all(&cache_dir).map_err(|source| CliError::Io {
        path: cache_dir.clone(),
        source,
    })?;

    let dest = cache_dir.join("pricing_db.json");
    std::fs::write(&dest, &catalogue_bytes).map_err(|source| CliError::Io {
        path: dest.clone(),
        source,
    })?;
    let sig_dest = cache_dir.join("pricing_db.json.sig");
    std::fs::write(&sig_dest, &signature_text).map_err(|source| CliError::Io {
        path: sig_dest.clone(),
        source,
    })?;

    tracing::info!(
        models = parsed.model_count(),
        valid_until = %parsed.valid_until(),
        path = %dest.display(),
        "installed verified pricing catalogue"
    );

    Ok(())
}
