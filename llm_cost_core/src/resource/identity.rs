//! Resource-id derivation and content hashing.
//!
//! Uses BLAKE2b-512 here, deliberately distinct from the SHA-256 used
//! for vocabulary provenance in `vocab::format` — content identity and
//! file-format provenance are different concerns and shouldn't share a
//! hash family.

use std::collections::HashSet;

use blake2::{Blake2b512, Digest};

/// Derive a stable resource id for a prompt: an explicit `prompt_id`
/// wins outright; otherwise the path is slugified, de-duplicated against
/// `seen` within the same invocation, and falls back to a content-hash
/// prefix if slugification produces the empty string.
pub fn resource_id(prompt_id: Option<&str>, path: &str, content: &[u8], seen: &mut HashSet<String>) -> String {
    if let Some(id) = prompt_id {
        if !id.is_empty() && is_slug(id) {
            seen.insert(id.to_string());
            return id.to_string();
        }
    }

    let mut slug = slugify(path);
    if slug.is_empty() {
        slug = hex::encode(content_hash(content))[..12].to_string();
    }

    if !seen.contains(&slug) {
        seen.insert(slug.clone());
        return slug;
    }

    let mut n = 1u64;
    loop {
        let candidate = format!("{slug}-{n}");
        if !seen.contains(&candidate) {
            seen.insert(candidate.clone());
            return candidate;
        }
        n += 1;
    }
}

fn is_slug(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Lowercase, collapse runs of non-alphanumerics to single hyphens, trim
/// leading/trailing hyphens, and strip a leading directory prefix and
/// file extension.
fn slugify(path: &str) -> String {
    let base = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let stem = match base.rfind('.') {
        Some(idx) if idx > 0 => &base[..idx],
        _ => base,
    };

    let lowered = stem.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut last_was_sep = false;
    for c in lowered.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            last_was_sep = false;
        } else if !last_was_sep {
            out.push('-');
            last_was_sep = true;
        }
    }
    out.trim_matches('-').to_string()
}

/// BLAKE2b-512 of the raw bytes; used solely for diff/change-detection,
/// never as the resource identity itself.
pub fn content_hash(bytes: &[u8]) -> [u8; 64] {
    let mut hasher = Blake2b512::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    let mut out = [0u8; 64];
    out.copy_from_slice(&digest);
    out
}
