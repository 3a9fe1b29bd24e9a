//! Heuristic payload decoding
//!
//! Subscription payloads arrive as plaintext, clean Base64, Base64 with the
//! padding stripped, Base64 with junk bytes prepended, or one Base64 blob per
//! line. Rather than guess the encoding up front, an ordered list of decode
//! strategies runs until one produces a candidate that passes the shared
//! acceptance predicate: the decoded text must contain at least one
//! registered `<scheme>://` token. Binary noise that happens to decode never
//! contains a token, so it is rejected; a payload that was plaintext all
//! along falls through every strategy and is returned unmodified.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use subtrawl_protocol::Scheme;

/// Decode a raw source payload into its best-guess plaintext
///
/// Never fails: when no strategy yields an accepted candidate the original
/// text is returned, on the assumption that it may already be plaintext.
pub fn decode_payload(raw: &str) -> String {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    let candidates = whole_blob(&cleaned)
        .into_iter()
        .chain(with_padding(&cleaned))
        .chain(with_leading_trim(&cleaned))
        .chain(per_line(raw));

    for candidate in candidates {
        if contains_scheme_token(&candidate) {
            return candidate;
        }
    }

    raw.to_string()
}

/// The shared acceptance predicate: at least one registered scheme token
pub(crate) fn contains_scheme_token(text: &str) -> bool {
    Scheme::ALL
        .iter()
        .any(|scheme| text.contains(&format!("{scheme}://")))
}

/// Strategy (a): decode the whole blob as-is
fn whole_blob(cleaned: &str) -> Option<String> {
    try_decode(cleaned)
}

/// Strategy (b): append one or two `=` for stripped padding
fn with_padding(cleaned: &str) -> Vec<String> {
    ["=", "=="]
        .iter()
        .filter_map(|pad| try_decode(&format!("{cleaned}{pad}")))
        .collect()
}

/// Strategy (c): drop 1-3 leading characters for misaligned block boundaries
fn with_leading_trim(cleaned: &str) -> Vec<String> {
    (1..=3)
        .filter(|offset| cleaned.len() > *offset && cleaned.is_char_boundary(*offset))
        .filter_map(|offset| try_decode(&cleaned[offset..]))
        .collect()
}

/// Strategy (d): decode line by line, keeping undecodable lines verbatim
///
/// Only applies to multi-line input; a single-line blob was already covered
/// by the earlier strategies.
fn per_line(raw: &str) -> Option<String> {
    let lines: Vec<&str> = raw.trim().lines().collect();
    if lines.len() < 2 {
        return None;
    }

    let decoded: Vec<String> = lines
        .iter()
        .map(|line| {
            let trimmed = line.trim();
            try_decode(trimmed).unwrap_or_else(|| trimmed.to_string())
        })
        .collect();

    Some(decoded.join("\n"))
}

/// One Base64 decode attempt, lossy on invalid UTF-8 inside the payload
fn try_decode(s: &str) -> Option<String> {
    if s.is_empty() {
        return None;
    }
    STANDARD
        .decode(s)
        .ok()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}
