//! Node extraction from decoded plaintext
//!
//! Scans whitespace-delimited tokens for registered `<scheme>://` prefixes.
//! Scheme matching is exact on the token before `://`, so overlapping matches
//! between short and long tags (`ss` vs `ssr`) cannot occur. Within a single
//! source, exact-string repeats are dropped while the original order of first
//! appearance is preserved.

use std::collections::HashSet;

use subtrawl_protocol::NodeDescriptor;

/// Extract the distinct, well-formed descriptors from plaintext
pub fn extract_nodes(text: &str) -> Vec<NodeDescriptor> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut nodes = Vec::new();

    for word in text.split_whitespace() {
        if !word.contains("://") {
            continue;
        }

        let candidate = NodeDescriptor::new(word);
        // Registered scheme + non-trivial payload, or it is not a node.
        if !candidate.is_well_formed() {
            continue;
        }

        if seen.insert(word) {
            nodes.push(candidate);
        }
    }

    nodes
}
