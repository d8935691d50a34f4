//! Deterministic cost calculation over a `PriceDef` and a token usage
//! tuple, expressed in pico-USD fixed point.

pub mod calculator;
pub mod pico;

pub use calculator::{calculate, CostError, CostResult, RateKind, UsageOptions};
pub use pico::{ParsePicoUsdError, PicoUsd};
