//! Pico-USD (scale 10^12) fixed-point cost representation. Every cost
//! value that crosses a serialization boundary goes through this type
//! rather than a raw `f64`, so two runs on two platforms produce
//! byte-identical output.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct PicoUsd(pub i128);

impl PicoUsd {
    pub const SCALE: i128 = 1_000_000_000_000;

    pub const fn zero() -> Self {
        PicoUsd(0)
    }

    /// Convert a USD float to pico-USD using round-half-to-even, so the
    /// conversion is reproducible regardless of which direction ordinary
    /// rounding would otherwise break a tie.
    pub fn from_usd(usd: f64) -> Self {
        PicoUsd(round_half_even(usd * Self::SCALE as f64))
    }

    pub fn to_usd(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }
}

fn round_half_even(x: f64) -> i128 {
    let floor = x.floor();
    let floor_i = floor as i128;
    let diff = x - floor;
    if diff < 0.5 {
        floor_i
    } else if diff > 0.5 {
        floor_i + 1
    } else if floor_i % 2 == 0 {
        floor_i
    } else {
        floor_i + 1
    }
}

impl Add for PicoUsd {
    type Output = PicoUsd;
    fn add(self, rhs: PicoUsd) -> PicoUsd {
        PicoUsd(self.0 + rhs.0)
    }
}

impl Sum for PicoUsd {
    fn sum<I: Iterator<Item = PicoUsd>>(iter: I) -> Self {
        iter.fold(PicoUsd::zero(), Add::add)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid pico-USD value {0:?}")]
pub struct ParsePicoUsdError(String);

/// Parse the exact fixed-12-decimal format [`Display`](fmt::Display)
/// produces, so a FOCUS CSV column round-trips through this type without
/// going back through a lossy `f64`.
impl std::str::FromStr for PicoUsd {
    type Err = ParsePicoUsdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (whole, frac) = rest
            .split_once('.')
            .ok_or_else(|| ParsePicoUsdError(s.to_string()))?;
        if frac.len() != 12 || !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(ParsePicoUsdError(s.to_string()));
        }
        let whole: i128 = whole.parse().map_err(|_| ParsePicoUsdError(s.to_string()))?;
        let frac: i128 = frac.parse().map_err(|_| ParsePicoUsdError(s.to_string()))?;
        let magnitude = whole * Self::SCALE + frac;
        Ok(PicoUsd(if negative { -magnitude } else { magnitude }))
    }
}

/// Fixed 12-decimal-place rendering, as FOCUS cost columns require.
impl fmt::Display for PicoUsd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let negative = self.0 < 0;
        let magnitude = self.0.unsigned_abs();
        let whole = magnitude / Self::SCALE as u128;
        let frac = magnitude % Self::SCALE as u128;
        if negative {
            write!(f, "-{whole}.{frac:012}")
        } else {
            write!(f, "{whole}.{frac:012}")
        }
    }
}
