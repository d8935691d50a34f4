//! Signature verification for pricing catalogue updates: minisign-legacy
//! line parsing plus two-pinned-key Ed25519 verification.

pub mod minisign;
pub mod verifier;

pub use verifier::{verify, verify_with_keys, SignedBy, VerificationResult, VerifyError};
