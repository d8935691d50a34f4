//! Policy evaluation: allow-list and budget checks over a set of
//! computed `(prompt, model, cost)` tuples.

use std::collections::HashMap;

use super::manifest::Policy;
use crate::cost::PicoUsd;

const TAG_CARDINALITY_WARNING_THRESHOLD: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("model {model} is not in the allowed-models list {allowed_models:?}")]
    PolicyViolation {
        model: String,
        allowed_models: Vec<String>,
    },

    #[error("total cost {total} exceeds budget {limit}")]
    BudgetExceeded { total: PicoUsd, limit: PicoUsd },
}

/// One prompt's contribution to a policy evaluation pass.
pub struct PromptUsage<'a> {
    pub model: &'a str,
    pub cost: PicoUsd,
    pub tags: &'a HashMap<String, String>,
}

/// Evaluate `usages` against `policy`. Policy violations (a disallowed
/// model) take precedence over budget violations, since overspend on an
/// otherwise-sanctioned model is a softer failure than using a model
/// that was never approved at all.
pub fn evaluate(policy: &Policy, usages: &[PromptUsage<'_>]) -> Result<(), PolicyError> {
    if let Some(allowed) = &policy.allowed_models {
        for usage in usages {
            if !allowed.iter().any(|m| m == usage.model) {
                return Err(PolicyError::PolicyViolation {
                    model: usage.model.to_string(),
                    allowed_models: allowed.clone(),
                });
            }
        }
    }

    warn_on_high_cardinality_tags(usages);

    if let Some(max_cost_usd) = policy.max_cost_usd {
        let total: PicoUsd = usages.iter().map(|u| u.cost).sum();
        let limit = PicoUsd::from_usd(max_cost_usd);
        if total > limit {
            return Err(PolicyError::BudgetExceeded { total, limit });
        }
    }

    Ok(())
}

fn warn_on_high_cardinality_tags(usages: &[PromptUsage<'_>]) {
    let mut distinct_values: HashMap<&str, std::collections::HashSet<&str>> = HashMap::new();
    for usage in usages {
        for (key, value) in usage.tags {
            distinct_values
                .entry(key.as_str())
                .or_default()
                .insert(value.as_str());
        }
    }
    for (key, values) in distinct_values {
        if values.len() > TAG_CARDINALITY_WARNING_THRESHOLD {
            tracing::warn!(
                tag_key = key,
                distinct_values = values.len(),
                "tag key has high cardinality, which downstream FinOps tools may struggle with"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage<'a>(model: &'a str, cost_usd: f64, tags: &'a HashMap<String, String>) -> PromptUsage<'a> {
        PromptUsage {
            model,
            cost: PicoUsd::from_usd(cost_usd),
            tags,
        }
    }

    #[test]
    fn allows_when_no_policy_restrictions_are_set() {
        let policy = Policy::default();
        let tags = HashMap::new();
        let usages = vec![usage("gpt-4o", 1.0, &tags)];
        assert!(evaluate(&policy, &usages).is_ok());
    }

    #[test]
    fn rejects_disallowed_model() {
        let policy = Policy {
            allowed_models: Some(vec!["gpt-4o".to_string()]),
            max_cost_usd: None,
        };
        let tags = HashMap::new();
        let usages = vec![usage("claude-3-opus", 1.0, &tags)];
        let err = evaluate(&policy, &usages).unwrap_err();
        match err {
            PolicyError::PolicyViolation { model, .. } => assert_eq!(model, "claude-3-opus"),
            other => panic!("expected PolicyViolation, got {other:?}"),
        }
    }

    #[test]
    fn rejects_over_budget() {
        let policy = Policy {
            allowed_models: None,
            max_cost_usd: Some(1.0),
        };
        let tags = HashMap::new();
        let usages = vec![usage("gpt-4o", 2.0, &tags)];
        let err = evaluate(&policy, &usages).unwrap_err();
        assert!(matches!(err, PolicyError::BudgetExceeded { .. }));
    }

    #[test]
    fn policy_violation_takes_precedence_over_budget() {
        let policy = Policy {
            allowed_models: Some(vec!["gpt-4o".to_string()]),
            max_cost_usd: Some(0.01),
        };
        let tags = HashMap::new();
        let usages = vec![usage("claude-3-opus", 100.0, &tags)];
        let err = evaluate(&policy, &usages).unwrap_err();
        assert!(matches!(err, PolicyError::PolicyViolation { .. }));
    }

    #[test]
    fn high_cardinality_tags_warn_but_do_not_fail() {
        let policy = Policy::default();
        let mut tag_sets = Vec::new();
        for i in 0..150 {
            let mut tags = HashMap::new();
            tags.insert("customer".to_string(), format!("customer-{i}"));
            tag_sets.push(tags);
        }
        let usages: Vec<PromptUsage<'_>> = tag_sets
            .iter()
            .map(|tags| usage("gpt-4o", 0.01, tags))
            .collect();
        assert!(evaluate(&policy, &usages).is_ok());
    }
}
