//! # llm_cost_core
//!
//! The tokenization, pricing, and cost-governance engine behind
//! `llm-cost-gov`. Everything in this crate is offline and deterministic:
//! no network calls, no model inference, no wall-clock-dependent behavior
//! beyond the pricing catalogue's staleness check (which takes `now` as an
//! explicit argument rather than reading the clock itself).
//!
//! Subsystems, leaves first:
//! * [`vocab`] — loads the BPE2 binary vocabulary format.
//! * [`pretokenize`] — splits text into BPE-mergeable pieces.
//! * [`bpe`] — the rank-ordered byte-pair merge encoder.
//! * [`pricing`] — the signed, versioned pricing catalogue.
//! * [`verify`] — Ed25519 / minisign-legacy signature verification.
//! * [`cost`] — token counts + pricing -> USD, in pico-USD fixed point.
//! * [`policy`] — budget and allow-list enforcement.
//! * [`resource`] — stable resource-id derivation.
//! * [`focus`] — FOCUS (FinOps Open Cost & Usage Specification) row mapping.
//! * [`diff`] — comparing two cost runs by resource id.

pub mod bpe;
pub mod cost;
pub mod diff;
pub mod error;
pub mod focus;
pub mod policy;
pub mod pretokenize;
pub mod pricing;
pub mod resource;
pub mod verify;
pub mod vocab;

#[allow(unused_imports)]
use tracing::{debug, error, info, trace, warn};

pub use error::{CoreError, CoreResult};

/// The position of a token in a vocabulary, used as both its identifier and
/// its merge priority (lower rank merges earlier). This is the single name
/// used throughout the crate for what some reference implementations call
/// a "token id".
pub type Rank = u32;

/// A context passed explicitly into anything that needs to know whether it
/// is running interactively or inside CI. Never read from the environment
/// inside this crate — `llm_cost_cli` is the only place `std::env` is
/// consulted; this crate takes configuration as explicit arguments
/// instead of relying on global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CiContext {
    Interactive,
    Ci,
}

impl CiContext {
    /// Detect CI status from the process environment. Called by
    /// `llm_cost_cli` only; kept here so the detection rule (`CI` or
    /// `GITHUB_ACTIONS` set to a non-empty value) has one definition.
    pub fn detect_from_env(ci: Option<&str>, github_actions: Option<&str>) -> Self {
        let is_set = |v: Option<&str>| matches!(v, Some(s) if !s.is_empty());
        if is_set(ci) || is_set(github_actions) {
            CiContext::Ci
        } else {
            CiContext::Interactive
        }
    }
}
