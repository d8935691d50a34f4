//! A minimal canonical-JSON encoder for the `Tags` column: object keys
//! sorted lexicographically, no insignificant whitespace, per the
//! RFC 8785 canonicalization subset. Only string-valued tag maps are supported —
//! the one shape this tool ever needs to serialize byte-stably.

use std::collections::BTreeMap;

/// Encode a tag map as a canonical JSON object. `BTreeMap` already
/// iterates keys in lexicographic (byte-wise) order, so no explicit sort
/// is needed here.
pub fn encode_tags(tags: &BTreeMap<String, String>) -> String {
    let mut out = String::from("{");
    for (index, (key, value)) in tags.iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        out.push('"');
        escape_into(&mut out, key);
        out.push_str("\":\"");
        escape_into(&mut out, value);
        out.push('"');
    }
    out.push('}');
    out
}

fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_sorted_lexicographically() {
        let mut tags = BTreeMap::new();
        tags.insert("zeta".to_string(), "1".to_string());
        tags.insert("alpha".to_string(), "2".to_string());
        let encoded = encode_tags(&tags);
        assert_eq!(encoded, r#"{"alpha":"2","zeta":"1"}"#);
    }

    #[test]
    fn empty_map_is_empty_object() {
        assert_eq!(encode_tags(&BTreeMap::new()), "{}");
    }

    #[test]
    fn escapes_control_characters_and_quotes() {
        let mut tags = BTreeMap::new();
        tags.insert("note".to_string(), "has \"quotes\" and\nnewline".to_string());
        let encoded = encode_tags(&tags);
        assert_eq!(encoded, r#"{"note":"has \"quotes\" and\nnewline"}"#);
    }

    #[test]
    fn output_has_no_insignificant_whitespace() {
        let mut tags = BTreeMap::new();
        tags.insert("a".to_string(), "b".to_string());
        tags.insert("c".to_string(), "d".to_string());
        let encoded = encode_tags(&tags);
        assert!(!encoded.contains(' '));
    }
}
