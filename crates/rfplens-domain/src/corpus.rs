//! Corpus aggregation
//!
//! Combines extracted documents into one provenance-labeled text body under
//! a task-specific length budget. Aggregation is deterministic: blocks
//! appear in input order and truncation is tail-only, so the same inputs
//! always produce the same prompt text.

use crate::document::ExtractedDocument;

/// Marker appended when the corpus is clipped to its budget
pub const TRUNCATION_MARKER: &str = "...";

/// A labeled, length-bounded text body built from one or more documents.
///
/// Invariant: `text` never exceeds `max_len + TRUNCATION_MARKER.len()`
/// characters, and `source_order` always equals the input document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedCorpus {
    /// The concatenated (and possibly clipped) text
    pub text: String,
    /// Whether the concatenation exceeded the budget and was clipped
    pub truncated: bool,
    /// Originating document names, in input order
    pub source_order: Vec<String>,
}

/// Aggregate extracted documents into a bounded corpus.
///
/// Each document becomes a labeled block:
///
/// ```text
/// === DOCUMENT: <name> ===
/// <text>
/// ```
///
/// If the concatenation exceeds `max_len` characters it is clipped to
/// exactly `max_len` characters and [`TRUNCATION_MARKER`] is appended.
/// Clipping never reorders or drops whole blocks from the middle:
/// predictable data loss at the tail beats unpredictable data loss.
pub fn aggregate(docs: &[ExtractedDocument], max_len: usize) -> AggregatedCorpus {
    let mut text = String::new();
    let mut source_order = Vec::with_capacity(docs.len());

    for doc in docs {
        text.push_str("\n\n=== DOCUMENT: ");
        text.push_str(&doc.original_name);
        text.push_str(" ===\n");
        text.push_str(&doc.text);
        source_order.push(doc.original_name.clone());
    }

    let (text, truncated) = clip_tail(text, max_len);

    AggregatedCorpus {
        text,
        truncated,
        source_order,
    }
}

/// Clip `text` to at most `max_len` characters, appending the marker when
/// anything was removed. Character-based, so multi-byte content never splits
/// a code point. Idempotent: clipping an already-clipped string with the
/// same budget returns it unchanged.
fn clip_tail(text: String, max_len: usize) -> (String, bool) {
    match text.char_indices().nth(max_len) {
        None => (text, false),
        Some((byte_idx, _)) => {
            if text[byte_idx..] == *TRUNCATION_MARKER {
                // Already clipped to this budget
                (text, true)
            } else {
                let mut clipped: String = text[..byte_idx].to_string();
                clipped.push_str(TRUNCATION_MARKER);
                (clipped, true)
            }
        }
    }
}
