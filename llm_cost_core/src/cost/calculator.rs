//! The cost calculator: per-rate-kind breakdown and cache-hit modelling
//! over a `PriceDef` and a token usage tuple. Accumulates in `PicoUsd`
//! rather than `f64` so repeated totals are bit-for-bit reproducible.

use super::pico::PicoUsd;
use crate::pricing::PriceDef;

#[derive(Debug, thiserror::Error)]
pub enum CostError {
    #[error("cache_hit_ratio {ratio} is outside the valid [0, 1] range")]
    InvalidCacheHitRatio { ratio: f64 },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UsageOptions {
    pub cache_hit_ratio: Option<f64>,
    pub include_cache_write: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateKind {
    Input,
    Output,
    CacheRead,
    CacheWrite,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CostResult {
    pub input: PicoUsd,
    pub output: PicoUsd,
    pub cache_read: PicoUsd,
    pub cache_write: PicoUsd,
}

impl CostResult {
    pub fn total(&self) -> PicoUsd {
        self.input + self.output + self.cache_read + self.cache_write
    }

    pub fn component(&self, kind: RateKind) -> PicoUsd {
        match kind {
            RateKind::Input => self.input,
            RateKind::Output => self.output,
            RateKind::CacheRead => self.cache_read,
            RateKind::CacheWrite => self.cache_write,
        }
    }
}

/// `tokens * rate_per_mtok / 1_000_000`, multiplying before dividing so
/// the rate's own precision isn't lost early.
fn rate_cost(tokens: u64, rate_per_mtok: f64) -> PicoUsd {
    let usd = (tokens as f64 * rate_per_mtok) / 1_000_000.0;
    PicoUsd::from_usd(usd)
}

/// Compute a cost breakdown for `input_tokens`/`output_tokens` against
/// `price`. `CacheRead` falls back to the input rate when the price def
/// has none; `CacheWrite` falls back to zero.
pub fn calculate(
    price: &PriceDef,
    input_tokens: u64,
    output_tokens: u64,
    options: &UsageOptions,
) -> Result<CostResult, CostError> {
    let ratio = options.cache_hit_ratio.unwrap_or(0.0);
    if !(0.0..=1.0).contains(&ratio) {
        return Err(CostError::InvalidCacheHitRatio { ratio });
    }

    let cache_read_rate = price
        .cache_read_cost_per_mtok
        .unwrap_or(price.input_cost_per_mtok);
    let cache_write_rate = price.cache_write_cost_per_mtok.unwrap_or(0.0);

    let cached = (input_tokens as f64 * ratio).floor() as u64;
    let uncached = input_tokens - cached;

    let input = rate_cost(uncached, price.input_cost_per_mtok);
    let cache_read = rate_cost(cached, cache_read_rate);
    let cache_write = if options.include_cache_write {
        rate_cost(input_tokens, cache_write_rate)
    } else {
        PicoUsd::zero()
    };
    let output = rate_cost(output_tokens, price.output_cost_per_mtok);

    Ok(CostResult {
        input,
        output,
        cache_read,
        cache_write,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::Provider;

    fn price(input: f64, output: f64) -> PriceDef {
        PriceDef {
            provider: Provider::OpenAI,
            display_name: "test model".to_string(),
            input_cost_per_mtok: input,
            output_cost_per_mtok: output,
            cache_read_cost_per_mtok: None,
            cache_write_cost_per_mtok: None,
            reasoning_cost_per_mtok: None,
            context_window: 0,
            deprecation_date: None,
            notes: None,
        }
    }

    #[test]
    fn matches_the_scenario_example() {
        let p = price(2.50, 10.00);
        let result = calculate(&p, 1000, 500, &UsageOptions::default()).unwrap();
        assert_eq!(result.input.0, 2_500_000_000);
        assert_eq!(result.output.0, 5_000_000_000);
        assert_eq!(result.total().0, 7_500_000_000);
    }

    #[test]
    fn linearity_within_one_pico_usd() {
        let p = price(2.50, 10.00);
        let small = calculate(&p, 1000, 0, &UsageOptions::default()).unwrap();
        let large = calculate(&p, 2000, 0, &UsageOptions::default()).unwrap();
        let diff = (large.total().0 - 2 * small.total().0).abs();
        assert!(diff <= 1);
    }

    #[test]
    fn zero_tokens_yields_zero_cost() {
        let p = price(2.50, 10.00);
        let result = calculate(&p, 0, 0, &UsageOptions::default()).unwrap();
        assert_eq!(result.total(), PicoUsd::zero());
    }

    #[test]
    fn cache_split_equals_sum_of_parts() {
        let mut p = price(10.0, 0.0);
        p.cache_read_cost_per_mtok = Some(1.0);
        let options = UsageOptions {
            cache_hit_ratio: Some(0.25),
            include_cache_write: false,
        };
        let result = calculate(&p, 1000, 0, &options).unwrap();

        let cached = (1000.0_f64 * 0.25).floor() as u64;
        let uncached = 1000 - cached;
        let expected_input = rate_cost(uncached, 10.0);
        let expected_cache_read = rate_cost(cached, 1.0);
        assert_eq!(result.input, expected_input);
        assert_eq!(result.cache_read, expected_cache_read);
    }

    #[test]
    fn cache_read_falls_back_to_input_rate() {
        let p = price(5.0, 0.0);
        let options = UsageOptions {
            cache_hit_ratio: Some(1.0),
            include_cache_write: false,
        };
        let result = calculate(&p, 1000, 0, &options).unwrap();
        assert_eq!(result.input, PicoUsd::zero());
        assert_eq!(result.cache_read, rate_cost(1000, 5.0));
    }

    #[test]
    fn cache_write_amortisation_charges_full_input_tokens() {
        let mut p = price(5.0, 0.0);
        p.cache_write_cost_per_mtok = Some(6.25);
        let options = UsageOptions {
            cache_hit_ratio: None,
            include_cache_write: true,
        };
        let result = calculate(&p, 1000, 0, &options).unwrap();
        assert_eq!(result.cache_write, rate_cost(1000, 6.25));
    }

    #[test]
    fn rejects_out_of_range_cache_hit_ratio() {
        let p = price(1.0, 1.0);
        let options = UsageOptions {
            cache_hit_ratio: Some(1.5),
            include_cache_write: false,
        };
        let err = calculate(&p, 100, 0, &options).unwrap_err();
        assert!(matches!(err, CostError::InvalidCacheHitRatio { .. }));
    }
}
