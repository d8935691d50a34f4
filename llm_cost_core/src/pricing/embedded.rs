//! The compile-time pricing snapshot, embedded via `include_str!` so the
//! resolution chain's final step always has something to fall back to,
//! guaranteeing offline operation even with no network, no cache
//! directory, and no explicit override.

pub const EMBEDDED_PRICING_JSON: &str =
    include_str!("../../assets/pricing_db_embedded.json");
