//! Immutable reference data: known apps, the question bank, lessons and alerts.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::model::{
    AlertId, EntryError, Lesson, LessonError, LessonId, Question, QuestionDraft, QuestionError,
    QuestionId, ReferenceEntry, ReferenceEntryDraft, ScamAlert,
};

const BUILTIN_JSON: &str = include_str!("../data/reference.json");

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DatasetError {
    #[error("malformed dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("entry {index}: {source}")]
    Entry {
        index: usize,
        #[source]
        source: EntryError,
    },

    #[error("duplicate entry identifier: {0}")]
    DuplicateEntry(String),

    #[error(transparent)]
    Question(#[from] QuestionError),

    #[error("duplicate question id: {0}")]
    DuplicateQuestion(QuestionId),

    #[error(transparent)]
    Lesson(#[from] LessonError),

    #[error("duplicate lesson id: {0}")]
    DuplicateLesson(LessonId),

    #[error("alert {0}: title and message cannot be empty")]
    EmptyAlert(AlertId),

    #[error("duplicate alert id: {0}")]
    DuplicateAlert(AlertId),
}

//
// ─── FILE FORMAT ───────────────────────────────────────────────────────────────
//

/// On-disk shape of a dataset document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetFile {
    #[serde(default)]
    pub entries: Vec<ReferenceEntryDraft>,
    #[serde(default)]
    pub questions: Vec<QuestionDraft>,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
    #[serde(default)]
    pub alerts: Vec<ScamAlert>,
}

//
// ─── DATASET ───────────────────────────────────────────────────────────────────
//

/// Validated reference data, loaded once and never mutated.
///
/// Entry order is the classification priority: the first matching entry wins.
/// Question order is the quiz sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceDataset {
    entries: Vec<ReferenceEntry>,
    questions: Vec<Question>,
    lessons: Vec<Lesson>,
    alerts: Vec<ScamAlert>,
}

impl ReferenceDataset {
    /// The dataset shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError` if the embedded seed fails validation.
    pub fn builtin() -> Result<Self, DatasetError> {
        Self::from_json_str(BUILTIN_JSON)
    }

    /// Parse and validate a JSON dataset document.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError` for malformed JSON, invalid records or duplicate keys.
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let file: DatasetFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    /// Validate an already-parsed dataset document.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError` for invalid records or duplicate keys.
    pub fn from_file(file: DatasetFile) -> Result<Self, DatasetError> {
        let mut seen_entries = HashSet::new();
        let mut entries = Vec::with_capacity(file.entries.len());
        for (index, draft) in file.entries.into_iter().enumerate() {
            let entry = draft
                .validate()
                .map_err(|source| DatasetError::Entry { index, source })?;
            if !seen_entries.insert(entry.identifier_key().to_string()) {
                return Err(DatasetError::DuplicateEntry(entry.identifier_url().to_string()));
            }
            entries.push(entry);
        }

        let mut seen_questions = HashSet::new();
        let mut questions = Vec::with_capacity(file.questions.len());
        for draft in file.questions {
            let question = draft.validate()?;
            if !seen_questions.insert(question.id()) {
                return Err(DatasetError::DuplicateQuestion(question.id()));
            }
            questions.push(question);
        }

        let mut seen_lessons = HashSet::new();
        let mut lessons = Vec::with_capacity(file.lessons.len());
        for lesson in file.lessons {
            let lesson = lesson.validate()?;
            if !seen_lessons.insert(lesson.id) {
                return Err(DatasetError::DuplicateLesson(lesson.id));
            }
            lessons.push(lesson);
        }

        let mut seen_alerts = HashSet::new();
        for alert in &file.alerts {
            if alert.title.trim().is_empty() || alert.message.trim().is_empty() {
                return Err(DatasetError::EmptyAlert(alert.id));
            }
            if !seen_alerts.insert(alert.id) {
                return Err(DatasetError::DuplicateAlert(alert.id));
            }
        }

        info!(
            entries = entries.len(),
            questions = questions.len(),
            lessons = lessons.len(),
            alerts = file.alerts.len(),
            "reference dataset loaded"
        );

        Ok(Self {
            entries,
            questions,
            lessons,
            alerts: file.alerts,
        })
    }

    #[must_use]
    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn alerts(&self) -> &[ScamAlert] {
        &self.alerts
    }

    #[must_use]
    pub fn entry(&self, identifier: &str) -> Option<&ReferenceEntry> {
        let key = identifier.trim().to_lowercase();
        self.entries.iter().find(|e| e.identifier_key() == key)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Verdict;

    #[test]
    fn builtin_seed_loads() {
        let data = ReferenceDataset::builtin().unwrap();
        assert_eq!(data.entries().len(), 5);
        assert_eq!(data.questions().len(), 3);
        assert_eq!(data.lessons().len(), 4);
        assert_eq!(data.alerts().len(), 2);

        let points: Vec<u32> = data.questions().iter().map(Question::points).collect();
        assert_eq!(points, vec![10, 15, 10]);
        assert_eq!(data.entry("GROWW.IN").unwrap().verdict(), Verdict::Safe);
    }

    #[test]
    fn builtin_seed_lists_riskier_entries_first() {
        let data = ReferenceDataset::builtin().unwrap();
        let severities: Vec<u8> = data.entries().iter().map(|e| e.verdict().severity()).collect();
        let mut sorted = severities.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(severities, sorted);
    }

    #[test]
    fn duplicate_identifiers_are_rejected_case_insensitively() {
        let json = r#"{
            "entries": [
                {"identifier_url": "groww.in", "app_name": "Groww", "verdict": "safe",
                 "title": "t", "description": "d", "reasons": ["r"]},
                {"identifier_url": "GROWW.in", "app_name": "Other", "verdict": "scam",
                 "title": "t", "description": "d", "reasons": ["r"]}
            ]
        }"#;
        let err = ReferenceDataset::from_json_str(json).unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateEntry(ref id) if id == "GROWW.in"));
    }

    #[test]
    fn invalid_entry_reports_index() {
        let json = r#"{
            "entries": [
                {"identifier_url": "groww.in", "app_name": "", "verdict": "safe",
                 "title": "t", "description": "d", "reasons": ["r"]}
            ]
        }"#;
        let err = ReferenceDataset::from_json_str(json).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::Entry { index: 0, source: EntryError::EmptyAppName }
        ));
    }

    #[test]
    fn duplicate_question_ids_are_rejected() {
        let q = r#"{"id": 1, "prompt": "p", "options": ["a", "b"], "correct_option": 0, "points": 5}"#;
        let json = format!(r#"{{"questions": [{q}, {q}]}}"#);
        let err = ReferenceDataset::from_json_str(&json).unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateQuestion(id) if id == QuestionId::new(1)));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = ReferenceDataset::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, DatasetError::Json(_)));
    }

    #[test]
    fn unknown_verdict_is_rejected() {
        let json = r#"{
            "entries": [
                {"identifier_url": "x.com", "app_name": "X", "verdict": "risky",
                 "title": "t", "description": "d", "reasons": ["r"]}
            ]
        }"#;
        assert!(matches!(
            ReferenceDataset::from_json_str(json).unwrap_err(),
            DatasetError::Json(_)
        ));
    }

    #[test]
    fn empty_document_is_an_empty_dataset() {
        let data = ReferenceDataset::from_json_str("{}").unwrap();
        assert!(data.entries().is_empty());
        assert!(data.questions().is_empty());
    }
}
