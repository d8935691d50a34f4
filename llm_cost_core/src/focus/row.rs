//! FOCUS row mapping: given a prompt's computed cost and metadata,
//! produce the fixed FOCUS column set.

use std::collections::BTreeMap;

use super::canonical_json::encode_tags;
use crate::cost::{CostResult, PicoUsd};
use crate::pricing::Provider;

pub const COLUMNS: &[&str] = &[
    "BilledCost",
    "EffectiveCost",
    "ListCost",
    "UsageQuantity",
    "UsageUnit",
    "ResourceId",
    "ResourceName",
    "ServiceName",
    "ServiceCategory",
    "Provider",
    "ChargeCategory",
    "Tags",
    "x-input-tokens",
    "x-output-tokens",
    "x-cache-hit-ratio",
    "x-content-hash",
];

/// Everything the row mapper needs about one prompt to produce a FOCUS
/// row. `effective` is the cost actually charged after cache-hit
/// modelling; `list` is the same usage priced with no cache adjustment
/// at all, i.e. the sticker price.
pub struct FocusInput<'a> {
    pub resource_id: &'a str,
    pub resource_name: &'a str,
    pub provider: Provider,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cache_hit_ratio: Option<f64>,
    pub content_hash: [u8; 64],
    pub tags: &'a BTreeMap<String, String>,
    pub effective: CostResult,
    pub list: CostResult,
}

#[derive(Debug, Clone)]
pub struct FocusRow {
    pub billed_cost: PicoUsd,
    pub effective_cost: PicoUsd,
    pub list_cost: PicoUsd,
    pub usage_quantity: u64,
    pub usage_unit: &'static str,
    pub resource_id: String,
    pub resource_name: String,
    pub service_name: &'static str,
    pub service_category: &'static str,
    pub provider: String,
    pub charge_category: &'static str,
    pub tags_json: String,
    pub x_input_tokens: u64,
    pub x_output_tokens: u64,
    pub x_cache_hit_ratio: Option<f64>,
    pub x_content_hash: String,
}

impl FocusRow {
    pub fn map(input: &FocusInput<'_>) -> FocusRow {
        FocusRow {
            billed_cost: PicoUsd::zero(),
            effective_cost: input.effective.total(),
            list_cost: input.list.total(),
            usage_quantity: input.input_tokens + input.output_tokens,
            usage_unit: "Tokens",
            resource_id: input.resource_id.to_string(),
            resource_name: input.resource_name.to_string(),
            service_name: "LLM Inference",
            service_category: "AI and Machine Learning",
            provider: input.provider.to_string(),
            charge_category: "Usage",
            tags_json: encode_tags(input.tags),
            x_input_tokens: input.input_tokens,
            x_output_tokens: input.output_tokens,
            x_cache_hit_ratio: input.cache_hit_ratio,
            x_content_hash: hex::encode(input.content_hash),
        }
    }

    /// Render the row as CSV field values, in the exact order of
    /// [`COLUMNS`]. Cost columns use fixed 12-decimal precision via
    /// `PicoUsd`'s `Display` impl.
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.billed_cost.to_string(),
            self.effective_cost.to_string(),
            self.list_cost.to_string(),
            self.usage_quantity.to_string(),
            self.usage_unit.to_string(),
            self.resource_id.clone(),
            self.resource_name.clone(),
            self.service_name.to_string(),
            self.service_category.to_string(),
            self.provider.clone(),
            self.charge_category.to_string(),
            self.tags_json.clone(),
            self.x_input_tokens.to_string(),
            self.x_output_tokens.to_string(),
            self.x_cache_hit_ratio.map(|r| r.to_string()).unwrap_or_default(),
            self.x_content_hash.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::{calculate, UsageOptions};
    use crate::pricing::PriceDef;

    fn price() -> PriceDef {
        PriceDef {
            provider: Provider::OpenAI,
            display_name: "GPT-4o".to_string(),
            input_cost_per_mtok: 2.5,
            output_cost_per_mtok: 10.0,
            cache_read_cost_per_mtok: Some(1.25),
            cache_write_cost_per_mtok: None,
            reasoning_cost_per_mtok: None,
            context_window: 128_000,
            deprecation_date: None,
            notes: None,
        }
    }

    #[test]
    fn billed_cost_is_always_zero() {
        let p = price();
        let effective = calculate(&p, 1000, 500, &UsageOptions::default()).unwrap();
        let list = effective;
        let tags = BTreeMap::new();
        let input = FocusInput {
            resource_id: "r1",
            resource_name: "prompts/r1.txt",
            provider: p.provider,
            input_tokens: 1000,
            output_tokens: 500,
            cache_hit_ratio: None,
            content_hash: [0u8; 64],
            tags: &tags,
            effective,
            list,
        };
        let row = FocusRow::map(&input);
        assert_eq!(row.billed_cost, PicoUsd::zero());
        assert_eq!(row.usage_quantity, 1500);
    }

    #[test]
    fn tags_column_is_canonical_json() {
        let p = price();
        let cost = calculate(&p, 10, 10, &UsageOptions::default()).unwrap();
        let mut tags = BTreeMap::new();
        tags.insert("env".to_string(), "prod".to_string());
        tags.insert("app".to_string(), "chatbot".to_string());
        let input = FocusInput {
            resource_id: "r1",
            resource_name: "prompts/r1.txt",
            provider: p.provider,
            input_tokens: 10,
            output_tokens: 10,
            cache_hit_ratio: None,
            content_hash: [0u8; 64],
            tags: &tags,
            effective: cost,
            list: cost,
        };
        let row = FocusRow::map(&input);
        assert_eq!(row.tags_json, r#"{"app":"chatbot","env":"prod"}"#);
    }

    #[test]
    fn list_cost_differs_from_effective_cost_with_cache_discount() {
        let p = price();
        let list = calculate(&p, 1000, 0, &UsageOptions::default()).unwrap();
        let effective = calculate(
            &p,
            1000,
            0,
            &UsageOptions {
                cache_hit_ratio: Some(0.5),
                include_cache_write: false,
            },
        )
        .unwrap();
        let tags = BTreeMap::new();
        let input = FocusInput {
            resource_id: "r1",
            resource_name: "prompts/r1.txt",
            provider: p.provider,
            input_tokens: 1000,
            output_tokens: 0,
            cache_hit_ratio: Some(0.5),
            content_hash: [0u8; 64],
            tags: &tags,
            effective,
            list,
        };
        let row = FocusRow::map(&input);
        assert!(row.effective_cost < row.list_cost);
    }
}
