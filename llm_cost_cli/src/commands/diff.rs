//! `diff`: compare two previously-exported FOCUS CSV runs by resource id.

use std::fs::File;

use llm_cost_core::diff::{self, DiffStatus};
use serde::Serialize;

use crate::cli::DiffArgs;
use crate::cli_error::CliError;
use crate::focus_csv;

#[derive(Debug, Serialize)]
struct DiffEntry {
    resource_id: String,
    status: &'static str,
    before_cost: Option<String>,
    after_cost: Option<String>,
    cost_delta: String,
    content_changed: bool,
}

#[derive(Debug, Serialize)]
struct DiffReport {
    total_delta: String,
    entries: Vec<DiffEntry>,
}

fn status_label(status: DiffStatus) -> &'static str {
    match status {
        DiffStatus::Added => "added",
        DiffStatus::Removed => "removed",
        DiffStatus::Changed => "changed",
        DiffStatus::Unchanged => "unchanged",
    }
}

pub fn run(args: &DiffArgs) -> Result<(), CliError> {
    let before_file = File::open(&args.before).map_err(|source| CliError::Io {
        path: args.before.clone(),
        source,
    })?;
    let after_file = File::open(&args.after).map_err(|source| CliError::Io {
        path: args.after.clone(),
        source,
    })?;

    let before = focus_csv::read_rows(before_file).map_err(CliError::FocusCsv)?;
    let after = focus_csv::read_rows(after_file).map_err(CliError::FocusCsv)?;

    let result = diff::diff(&before, &after);
    let report = DiffReport {
        total_delta: result.total_delta().to_string(),
        entries: result
            .entries
            .iter()
            .map(|e| DiffEntry {
                resource_id: e.resource_id.clone(),
                status: status_label(e.status),
                before_cost: e.before_cost.map(|c| c.to_string()),
                after_cost: e.after_cost.map(|c| c.to_string()),
                cost_delta: e.cost_delta.to_string(),
                content_changed: e.content_changed,
            })
            .collect(),
    };

    let text = serde_json::to_string_pretty(&report).expect("serializing a diff report never fails");
    println!("{text}");
    Ok(())
}
