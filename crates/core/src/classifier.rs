//! Trust classification: maps a free-text query to a verdict and explanation.
//!
//! Matching is a case-insensitive substring test against each entry's
//! identifier and app name. The first matching entry in dataset order wins,
//! so dataset order is the tie-break priority. Unknown input is never
//! reported as safe: it falls back to a `suspicious` verdict.

use tracing::debug;

use crate::model::{ClassificationResult, ReferenceEntry, Verdict};

pub const FALLBACK_APP_NAME: &str = "Unknown App";
pub const FALLBACK_TITLE: &str = "⚠️ Cannot Verify";
pub const FALLBACK_DESCRIPTION: &str =
    "We couldn't find enough information to verify this app or website.";
pub const FALLBACK_REASONS: [&str; 4] = [
    "Limited information available",
    "Not in our database",
    "Proceed with extreme caution",
    "Verify independently before investing",
];

/// Classify `query` against `entries`.
///
/// The caller must pass a non-empty, trimmed query.
#[must_use]
pub fn classify(query: &str, entries: &[ReferenceEntry]) -> ClassificationResult {
    match find_match(query, entries) {
        Some(entry) => {
            debug!(query, matched = entry.identifier_url(), verdict = %entry.verdict(), "query matched reference entry");
            ClassificationResult::from_entry(query, entry)
        }
        None => {
            debug!(query, "no reference entry matched, using fallback");
            fallback(query)
        }
    }
}

/// First entry whose identifier or app name occurs in `query`, ignoring case.
#[must_use]
pub fn find_match<'a>(query: &str, entries: &'a [ReferenceEntry]) -> Option<&'a ReferenceEntry> {
    let normalized = query.to_lowercase();
    entries
        .iter()
        .find(|entry| entry.matches_normalized(&normalized))
}

/// The result returned when no entry matches.
#[must_use]
pub fn fallback(query: &str) -> ClassificationResult {
    ClassificationResult {
        query: query.to_string(),
        app_name: FALLBACK_APP_NAME.to_string(),
        verdict: Verdict::Suspicious,
        title: FALLBACK_TITLE.to_string(),
        description: FALLBACK_DESCRIPTION.to_string(),
        reasons: FALLBACK_REASONS.iter().map(ToString::to_string).collect(),
        matched: None,
    }
}
