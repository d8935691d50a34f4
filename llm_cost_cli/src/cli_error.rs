//! The CLI boundary's own error type: wraps every subsystem's typed
//! error so `main` has one thing to match on for exit-code translation,
//! propagating with `#[from]` at the binary crate's boundary the same
//! way each subsystem wraps its own errors internally.

use std::path::PathBuf;

use crate::focus_csv::FocusCsvError;
use crate::jsonl::JsonlError;
use crate::manifest::ManifestError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] llm_cost_core::CoreError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Jsonl(#[from] JsonlError),

    #[error(transparent)]
    FocusCsv(#[from] FocusCsvError),

    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown model '{0}'")]
    UnknownModel(String),

    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    QuotaExceeded(String),
}
