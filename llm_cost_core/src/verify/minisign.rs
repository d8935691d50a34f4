//! Parsing the minisign legacy signature format: an `untrusted comment:`
//! line followed by a base64-encoded `(algorithm, key id, signature)`
//! triple.

use base64::Engine;

const SIG_ALGORITHM_LEN: usize = 2;
const KEY_ID_LEN: usize = 8;
const SIGNATURE_LEN: usize = 64;
const RAW_LEN: usize = SIG_ALGORITHM_LEN + KEY_ID_LEN + SIGNATURE_LEN;
const MAX_LINE_LEN: usize = 1024;

#[derive(Debug, thiserror::Error)]
pub enum MinisignError {
    #[error("signature line exceeds the {MAX_LINE_LEN} byte limit")]
    LineTooLarge,

    #[error("no base64 signature line found")]
    MissingSignatureLine,

    #[error("signature is not valid base64: {0}")]
    BadBase64(#[from] base64::DecodeError),

    #[error("signature too short to contain a key id: {len} bytes, need at least {KEY_ID_LEN_PLUS_ALGO}", KEY_ID_LEN_PLUS_ALGO = SIG_ALGORITHM_LEN + KEY_ID_LEN)]
    TruncatedSignature { len: usize },

    #[error("signature has {len} bytes, expected exactly {RAW_LEN}")]
    WrongLength { len: usize },
}

#[derive(Debug, Clone, Copy)]
pub struct ParsedSignature {
    pub key_id: [u8; KEY_ID_LEN],
    pub signature_bytes: [u8; SIGNATURE_LEN],
}

/// Parse a minisign-legacy signature file's text. Every line is checked
/// against a 1 KiB hardening limit before any base64 decoding is
/// attempted.
pub fn parse(sig_text: &str) -> Result<ParsedSignature, MinisignError> {
    for line in sig_text.lines() {
        if line.len() > MAX_LINE_LEN {
            return Err(MinisignError::LineTooLarge);
        }
    }

    let b64_line = sig_text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with("untrusted comment:") && !line.starts_with("trusted comment:"))
        .ok_or(MinisignError::MissingSignatureLine)?;

    let raw = base64::engine::general_purpose::STANDARD.decode(b64_line)?;

    if raw.len() < SIG_ALGORITHM_LEN + KEY_ID_LEN {
        return Err(MinisignError::TruncatedSignature { len: raw.len() });
    }
    if raw.len() != RAW_LEN {
        return Err(MinisignError::WrongLength { len: raw.len() });
    }

    let mut key_id = [0u8; KEY_ID_LEN];
    key_id.copy_from_slice(&raw[SIG_ALGORITHM_LEN..SIG_ALGORITHM_LEN + KEY_ID_LEN]);
    let mut signature_bytes = [0u8; SIGNATURE_LEN];
    signature_bytes.copy_from_slice(&raw[SIG_ALGORITHM_LEN + KEY_ID_LEN..]);

    Ok(ParsedSignature {
        key_id,
        signature_bytes,
    })
}
