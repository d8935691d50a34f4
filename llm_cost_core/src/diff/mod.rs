//! `CostDiff`: a pure comparison of two FOCUS row sets by resource id,
//! using each row's content hash to distinguish "the prompt changed"
//! from "only its price changed." A natural counterpart to the FOCUS
//! exporter for the `diff` command.

use std::collections::BTreeMap;

use crate::cost::PicoUsd;
use crate::focus::FocusRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffStatus {
    Added,
    Removed,
    Changed,
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct ResourceDiff {
    pub resource_id: String,
    pub status: DiffStatus,
    pub before_cost: Option<PicoUsd>,
    pub after_cost: Option<PicoUsd>,
    pub cost_delta: PicoUsd,
    pub content_changed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CostDiff {
    pub entries: Vec<ResourceDiff>,
}

impl CostDiff {
    pub fn total_delta(&self) -> PicoUsd {
        self.entries.iter().map(|e| e.cost_delta).sum()
    }
}

/// Diff two FOCUS row sets. Rows are keyed by `resource_id`; the result
/// is emitted in resource-id lexicographic order, mirroring the FOCUS
/// exporter's own ordering guarantee so diffs are themselves byte-stable.
pub fn diff(before: &[FocusRow], after: &[FocusRow]) -> CostDiff {
    let before_by_id: BTreeMap<&str, &FocusRow> =
        before.iter().map(|r| (r.resource_id.as_str(), r)).collect();
    let after_by_id: BTreeMap<&str, &FocusRow> =
        after.iter().map(|r| (r.resource_id.as_str(), r)).collect();

    let mut ids: Vec<&str> = before_by_id
        .keys()
        .chain(after_by_id.keys())
        .copied()
        .collect();
    ids.sort_unstable();
    ids.dedup();

    let mut entries = Vec::with_capacity(ids.len());
    for id in ids {
        let before_row = before_by_id.get(id).copied();
        let after_row = after_by_id.get(id).copied();

        let entry = match (before_row, after_row) {
            (None, Some(after_row)) => ResourceDiff {
                resource_id: id.to_string(),
                status: DiffStatus::Added,
                before_cost: None,
                after_cost: Some(after_row.effective_cost),
                cost_delta: after_row.effective_cost,
                content_changed: true,
            },
            (Some(before_row), None) => ResourceDiff {
                resource_id: id.to_string(),
                status: DiffStatus::Removed,
                before_cost: Some(before_row.effective_cost),
                after_cost: None,
                cost_delta: PicoUsd(-before_row.effective_cost.0),
                content_changed: true,
            },
            (Some(before_row), Some(after_row)) => {
                let content_changed = before_row.x_content_hash != after_row.x_content_hash;
                let delta = PicoUsd(after_row.effective_cost.0 - before_row.effective_cost.0);
                let status = if delta.0 != 0 {
                    DiffStatus::Changed
                } else {
                    DiffStatus::Unchanged
                };
                ResourceDiff {
                    resource_id: id.to_string(),
                    status,
                    before_cost: Some(before_row.effective_cost),
                    after_cost: Some(after_row.effective_cost),
                    cost_delta: delta,
                    content_changed,
                }
            }
            (None, None) => unreachable!("resource id came from one of the two maps"),
        };
        entries.push(entry);
    }

    CostDiff { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::Provider;
    use std::collections::BTreeMap as Map;

    fn row(id: &str, cost_usd: f64, content_hash: &str) -> FocusRow {
        FocusRow {
            billed_cost: PicoUsd::zero(),
            effective_cost: PicoUsd::from_usd(cost_usd),
            list_cost: PicoUsd::from_usd(cost_usd),
            usage_quantity: 100,
            usage_unit: "Tokens",
            resource_id: id.to_string(),
            resource_name: format!("{id}.txt"),
            service_name: "LLM Inference",
            service_category: "AI and Machine Learning",
            provider: Provider::OpenAI.to_string(),
            charge_category: "Usage",
            tags_json: "{}".to_string(),
            x_input_tokens: 50,
            x_output_tokens: 50,
            x_cache_hit_ratio: None,
            x_content_hash: content_hash.to_string(),
        }
    }

    #[test]
    fn detects_added_and_removed_resources() {
        let before = vec![row("a", 1.0, "hash-a")];
        let after = vec![row("b", 1.0, "hash-b")];
        let result = diff(&before, &after);
        let statuses: Map<&str, DiffStatus> = result
            .entries
            .iter()
            .map(|e| (e.resource_id.as_str(), e.status))
            .collect();
        assert_eq!(statuses["a"], DiffStatus::Removed);
        assert_eq!(statuses["b"], DiffStatus::Added);
    }

    #[test]
    fn detects_changed_and_unchanged_cost() {
        let before = vec![row("a", 1.0, "hash-a"), row("b", 2.0, "hash-b")];
        let after = vec![row("a", 1.5, "hash-a2"), row("b", 2.0, "hash-b")];
        let result = diff(&before, &after);
        let by_id: Map<&str, &ResourceDiff> =
            result.entries.iter().map(|e| (e.resource_id.as_str(), e)).collect();
        assert_eq!(by_id["a"].status, DiffStatus::Changed);
        assert!(by_id["a"].content_changed);
        assert_eq!(by_id["b"].status, DiffStatus::Unchanged);
        assert!(!by_id["b"].content_changed);
    }

    #[test]
    fn entries_are_in_resource_id_order() {
        let before = vec![row("zeta", 1.0, "h"), row("alpha", 1.0, "h")];
        let after = before.clone();
        let result = diff(&before, &after);
        let ids: Vec<&str> = result.entries.iter().map(|e| e.resource_id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "zeta"]);
    }
}
