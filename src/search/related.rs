//! "Related items" suggestions.
//!
//! Best effort: entries sharing a name fragment with the given label. Nothing
//! guarantees the suggestions are semantically related.

use super::page_index::IndexEntry;
use std::collections::HashSet;

/// Maximum number of related entries returned
pub const MAX_RELATED: usize = 5;

/// Shortest name fragment worth comparing
const MIN_FRAGMENT_CHARS: usize = 3;

/// Entries whose label shares a fragment with `label`, in document order.
///
/// The entry itself and repeated labels are left out.
pub fn related_entries<'a>(entries: &'a [IndexEntry], label: &str) -> Vec<&'a IndexEntry> {
    let source = label.trim().to_lowercase();
    let fragments = name_fragments(&source);
    if fragments.is_empty() {
        return Vec::new();
    }

    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(source);

    entries
        .iter()
        .filter(|entry| {
            let folded = entry.text.to_lowercase();
            fragments.iter().any(|f| folded.contains(f.as_str())) && seen.insert(folded)
        })
        .take(MAX_RELATED)
        .collect()
}

/// Split a label into lowercase word fragments (`create_circle` gives `create`, `circle`).
fn name_fragments(label: &str) -> Vec<String> {
    let mut fragments: Vec<String> = Vec::new();
    for word in label.split(|c: char| !c.is_alphanumeric()) {
        if word.chars().count() >= MIN_FRAGMENT_CHARS && !fragments.iter().any(|f| f == word) {
            fragments.push(word.to_string());
        }
    }
    fragments
}
