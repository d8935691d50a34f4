//! Mapping every `CliError` variant to its BSD-sysexits-style exit code.
//! This is the one place that mapping lives; no command computes its
//! own exit code.

use llm_cost_core::policy::PolicyError;
use llm_cost_core::pricing::PricingError;
use llm_cost_core::CoreError;

use crate::cli_error::CliError;

pub const SUCCESS: i32 = 0;
pub const GENERIC_ERROR: i32 = 1;
pub const BUDGET_EXCEEDED: i32 = 2;
pub const POLICY_VIOLATION: i32 = 3;
pub const PRICING_ERROR: i32 = 4;
pub const USAGE_ERROR: i32 = 64;
pub const DATA_ERROR: i32 = 65;

pub fn for_error(err: &CliError) -> i32 {
    match err {
        CliError::Core(core) => for_core_error(core),
        CliError::Manifest(_) => USAGE_ERROR,
        CliError::Jsonl(_) => DATA_ERROR,
        CliError::FocusCsv(_) => GENERIC_ERROR,
        CliError::Io { .. } => GENERIC_ERROR,
        CliError::UnknownModel(_) => DATA_ERROR,
        CliError::Usage(_) => USAGE_ERROR,
        CliError::QuotaExceeded(_) => BUDGET_EXCEEDED,
    }
}

fn for_core_error(err: &CoreError) -> i32 {
    match err {
        CoreError::Vocab(_) => DATA_ERROR,
        CoreError::Encode(_) => DATA_ERROR,
        CoreError::Pricing(pricing) => for_pricing_error(pricing),
        CoreError::Verify(_) => DATA_ERROR,
        CoreError::Cost(_) => GENERIC_ERROR,
        CoreError::Policy(policy) => for_policy_error(policy),
        CoreError::Invariant(_) => GENERIC_ERROR,
    }
}

fn for_pricing_error(err: &PricingError) -> i32 {
    match err {
        PricingError::CriticallyStale { .. } => PRICING_ERROR,
        _ => DATA_ERROR,
    }
}

fn for_policy_error(err: &PolicyError) -> i32 {
    match err {
        PolicyError::BudgetExceeded { .. } => BUDGET_EXCEEDED,
        PolicyError::PolicyViolation { .. } => POLICY_VIOLATION,
    }
}
