use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::model::Verdict;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EntryError {
    #[error("entry identifier cannot be empty")]
    EmptyIdentifier,

    #[error("entry identifier is not a valid host: {0}")]
    InvalidIdentifier(String),

    #[error("app name cannot be empty")]
    EmptyAppName,

    #[error("entry title cannot be empty")]
    EmptyTitle,

    #[error("entry description cannot be empty")]
    EmptyDescription,

    #[error("entry must list at least one reason")]
    NoReasons,

    #[error("reason {index} is empty")]
    EmptyReason { index: usize },
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated reference entry, as read from a dataset file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntryDraft {
    pub identifier_url: String,
    pub app_name: String,
    pub verdict: Verdict,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub reasons: Vec<String>,
}

impl ReferenceEntryDraft {
    /// Validate and normalize the draft into an immutable entry.
    ///
    /// Text fields are trimmed. The identifier must read as a host, optionally
    /// followed by a path (`play.google.com/store/apps/...`).
    ///
    /// # Errors
    ///
    /// Returns `EntryError` for empty fields, an unparsable identifier, or an
    /// empty reason list.
    pub fn validate(self) -> Result<ReferenceEntry, EntryError> {
        let identifier_url = self.identifier_url.trim().to_string();
        if identifier_url.is_empty() {
            return Err(EntryError::EmptyIdentifier);
        }
        let parsed = Url::parse(&format!("https://{identifier_url}"))
            .map_err(|_| EntryError::InvalidIdentifier(identifier_url.clone()))?;
        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(EntryError::InvalidIdentifier(identifier_url));
        }

        let app_name = non_empty(self.app_name).ok_or(EntryError::EmptyAppName)?;
        let title = non_empty(self.title).ok_or(EntryError::EmptyTitle)?;
        let description = non_empty(self.description).ok_or(EntryError::EmptyDescription)?;

        if self.reasons.is_empty() {
            return Err(EntryError::NoReasons);
        }
        let reasons = self
            .reasons
            .into_iter()
            .enumerate()
            .map(|(index, reason)| non_empty(reason).ok_or(EntryError::EmptyReason { index }))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ReferenceEntry {
            identifier_key: identifier_url.to_lowercase(),
            app_key: app_name.to_lowercase(),
            identifier_url,
            app_name,
            verdict: self.verdict,
            title,
            description,
            reasons,
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

//
// ─── ENTRY ─────────────────────────────────────────────────────────────────────
//

/// A known, pre-vetted app or website used as ground truth for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEntry {
    identifier_url: String,
    app_name: String,
    verdict: Verdict,
    title: String,
    description: String,
    reasons: Vec<String>,
    identifier_key: String,
    app_key: String,
}

impl ReferenceEntry {
    #[must_use]
    pub fn identifier_url(&self) -> &str {
        &self.identifier_url
    }

    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    #[must_use]
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// Lower-cased identifier, used as the uniqueness key and for matching.
    #[must_use]
    pub fn identifier_key(&self) -> &str {
        &self.identifier_key
    }

    /// True if a lower-cased query contains this entry's identifier or app name.
    #[must_use]
    pub fn matches_normalized(&self, normalized_query: &str) -> bool {
        normalized_query.contains(&self.identifier_key) || normalized_query.contains(&self.app_key)
    }
}

//
// ─── CLASSIFICATION RESULT ─────────────────────────────────────────────────────
//

/// Verdict and explanation produced for a single query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub query: String,
    pub app_name: String,
    pub verdict: Verdict,
    pub title: String,
    pub description: String,
    pub reasons: Vec<String>,
    /// Identifier of the entry that matched, `None` for the fallback.
    pub matched: Option<String>,
}

impl ClassificationResult {
    #[must_use]
    pub fn from_entry(query: &str, entry: &ReferenceEntry) -> Self {
        Self {
            query: query.to_string(),
            app_name: entry.app_name.clone(),
            verdict: entry.verdict,
            title: entry.title.clone(),
            description: entry.description.clone(),
            reasons: entry.reasons.clone(),
            matched: Some(entry.identifier_url.clone()),
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.matched.is_none()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
