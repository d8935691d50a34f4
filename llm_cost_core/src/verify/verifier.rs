//! Two-pinned-key Ed25519 verification for signed catalogue updates.
//! Grounded in `ed25519-dalek`'s `VerifyingKey`/`Signature` API (already a
//! teacher-aligned workspace dependency) and the general pinned-key shape
//! demonstrated by `pallas-crypto`'s `key/ed25519.rs`, adapted from
//! cryptoxide's API to `ed25519-dalek`'s.

use ed25519_dalek::{Signature, VerifyingKey};

use super::minisign::{self, MinisignError};

/// Placeholder production key material. A real deployment pins the two
/// publisher keys here at build time; this crate ships with zeroed
/// placeholders since it has no actual publisher to sign with, and every
/// caller that needs real verification goes through `verify_with_keys`.
pub const PRIMARY_PUBLIC_KEY: [u8; 32] = [0u8; 32];
pub const SECONDARY_PUBLIC_KEY: [u8; 32] = [0u8; 32];

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error(transparent)]
    Minisign(#[from] MinisignError),

    #[error("signing key {key_id} has been revoked")]
    KeyRevoked { key_id: String },

    #[error("signature does not verify against either pinned key")]
    InvalidSignature,

    #[error("pinned public key is malformed")]
    MalformedPublicKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignedBy {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationResult {
    pub signed_by: SignedBy,
}

/// Verify `data` against a minisign-legacy `signature_text` using the
/// crate's pinned production keys: extract key id, check revocation, try
/// the primary key, then the secondary, else fail closed.
pub fn verify(
    data: &[u8],
    signature_text: &str,
    revoked_key_ids: &[String],
) -> Result<VerificationResult, VerifyError> {
    verify_with_keys(
        data,
        signature_text,
        revoked_key_ids,
        &PRIMARY_PUBLIC_KEY,
        &SECONDARY_PUBLIC_KEY,
    )
}

/// Same as [`verify`] but with caller-supplied key material, so callers
/// (and this crate's own tests) can verify against a keypair they hold
/// the private half of, without touching the pinned production keys.
pub fn verify_with_keys(
    data: &[u8],
    signature_text: &str,
    revoked_key_ids: &[String],
    primary: &[u8; 32],
    secondary: &[u8; 32],
) -> Result<VerificationResult, VerifyError> {
    let parsed = minisign::parse(signature_text)?;
    let key_id_hex = hex::encode(parsed.key_id);

    if revoked_key_ids.iter().any(|id| id == &key_id_hex) {
        return Err(VerifyError::KeyRevoked { key_id: key_id_hex });
    }

    let signature = Signature::from_bytes(&parsed.signature_bytes);

    if let Some(result) = try_verify(primary, data, &signature, SignedBy::Primary) {
        return result;
    }
    if let Some(result) = try_verify(secondary, data, &signature, SignedBy::Secondary) {
        return result;
    }
    Err(VerifyError::InvalidSignature)
}

/// Returns `None` when the pinned key bytes themselves don't form a valid
/// key (so the caller moves on to the next candidate key rather than
/// failing outright), `Some(Ok(..))` on a verified match, and
/// `Some(Err(InvalidSignature))` when the key is valid but the signature
/// doesn't check out against it.
fn try_verify(
    key_bytes: &[u8; 32],
    data: &[u8],
    signature: &Signature,
    signed_by: SignedBy,
) -> Option<Result<VerificationResult, VerifyError>> {
    let verifying_key = VerifyingKey::from_bytes(key_bytes).ok()?;
    if verifying_key.verify_strict(data, signature).is_ok() {
        Some(Ok(VerificationResult { signed_by }))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use ed25519_dalek::{Signer, SigningKey};

    fn sign(signing_key: &SigningKey, data: &[u8], key_id: [u8; 8]) -> String {
        let signature = signing_key.sign(data);
        let mut raw = Vec::with_capacity(74);
        raw.extend_from_slice(b"Ed");
        raw.extend_from_slice(&key_id);
        raw.extend_from_slice(&signature.to_bytes());
        let encoded = base64::engine::general_purpose::STANDARD.encode(&raw);
        format!("untrusted comment: test\n{encoded}\n")
    }

    #[test]
    fn verifies_against_primary() {
        let signing_key = SigningKey::from_bytes(&[7u8; 32]);
        let public = signing_key.verifying_key().to_bytes();
        let data = b"catalogue bytes go here";
        let sig_text = sign(&signing_key, data, [1u8; 8]);

        let result = verify_with_keys(data, &sig_text, &[], &public, &[0u8; 32]).unwrap();
        assert_eq!(result.signed_by, SignedBy::Primary);
    }

    #[test]
    fn verifies_against_secondary_when_primary_mismatches() {
        let signing_key = SigningKey::from_bytes(&[9u8; 32]);
        let public = signing_key.verifying_key().to_bytes();
        let data = b"catalogue bytes go here";
        let sig_text = sign(&signing_key, data, [2u8; 8]);

        let other_primary = SigningKey::from_bytes(&[1u8; 32]).verifying_key().to_bytes();
        let result = verify_with_keys(data, &sig_text, &[], &other_primary, &public).unwrap();
        assert_eq!(result.signed_by, SignedBy::Secondary);
    }

    #[test]
    fn fails_when_no_key_matches() {
        let signing_key = SigningKey::from_bytes(&[3u8; 32]);
        let data = b"catalogue bytes go here";
        let sig_text = sign(&signing_key, data, [3u8; 8]);

        let wrong_a = SigningKey::from_bytes(&[4u8; 32]).verifying_key().to_bytes();
        let wrong_b = SigningKey::from_bytes(&[5u8; 32]).verifying_key().to_bytes();
        let err = verify_with_keys(data, &sig_text, &[], &wrong_a, &wrong_b).unwrap_err();
        assert!(matches!(err, VerifyError::InvalidSignature));
    }

    #[test]
    fn revoked_key_is_rejected_before_signature_check() {
        let signing_key = SigningKey::from_bytes(&[7u8; 32]);
        let public = signing_key.verifying_key().to_bytes();
        let data = b"catalogue bytes go here";
        let key_id = [1u8; 8];
        let sig_text = sign(&signing_key, data, key_id);
        let revoked = vec![hex::encode(key_id)];

        let err = verify_with_keys(data, &sig_text, &revoked, &public, &[0u8; 32]).unwrap_err();
        assert!(matches!(err, VerifyError::KeyRevoked { .. }));
    }

    #[test]
    fn tampered_data_fails_verification() {
        let signing_key = SigningKey::from_bytes(&[7u8; 32]);
        let public = signing_key.verifying_key().to_bytes();
        let data = b"original bytes";
        let sig_text = sign(&signing_key, data, [1u8; 8]);

        let err = verify_with_keys(b"tampered bytes", &sig_text, &[], &public, &[0u8; 32])
            .unwrap_err();
        assert!(matches!(err, VerifyError::InvalidSignature));
    }
}
