use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::LessonId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson {id}: title cannot be empty")]
    EmptyTitle { id: LessonId },

    #[error("lesson {id}: content cannot be empty")]
    EmptyContent { id: LessonId },

    #[error("lesson {id}: duration must be at least one minute")]
    ZeroDuration { id: LessonId },
}

/// A short, static safety lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    pub content: String,
    pub duration_minutes: u32,
}

impl Lesson {
    /// # Errors
    ///
    /// Returns `LessonError` if title or content is blank or the duration is zero.
    pub fn validate(self) -> Result<Self, LessonError> {
        let id = self.id;
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(LessonError::EmptyTitle { id });
        }
        let content = self.content.trim().to_string();
        if content.is_empty() {
            return Err(LessonError::EmptyContent { id });
        }
        if self.duration_minutes == 0 {
            return Err(LessonError::ZeroDuration { id });
        }
        Ok(Self {
            id,
            title,
            content,
            duration_minutes: self.duration_minutes,
        })
    }

    /// Duration label, e.g. `2 min`.
    #[must_use]
    pub fn duration_label(&self) -> String {
        format!("{} min", self.duration_minutes)
    }
}

/// Lessons the learner has finished in this session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonProgress {
    completed: BTreeSet<LessonId>,
}

impl LessonProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a lesson finished. Unknown ids leave the progress untouched.
    ///
    /// Returns true when the lesson exists in `catalog`.
    pub fn complete(&mut self, catalog: &[Lesson], id: LessonId) -> bool {
        if !catalog.iter().any(|lesson| lesson.id == id) {
            return false;
        }
        self.completed.insert(id);
        true
    }

    #[must_use]
    pub fn is_completed(&self, id: LessonId) -> bool {
        self.completed.contains(&id)
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Share of `catalog` completed, rounded to a whole percent.
    #[must_use]
    pub fn percent(&self, catalog: &[Lesson]) -> u8 {
        let done = catalog.iter().filter(|l| self.is_completed(l.id)).count();
        crate::quiz::rounded_percent(done, catalog.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Lesson> {
        (1..=3)
            .map(|i| Lesson {
                id: LessonId::new(i),
                title: format!("Lesson {i}"),
                content: "Check SEBI registration.".into(),
                duration_minutes: 2,
            })
            .collect()
    }

    #[test]
    fn blank_title_is_rejected() {
        let lesson = Lesson {
            id: LessonId::new(1),
            title: " ".into(),
            content: "x".into(),
            duration_minutes: 1,
        };
        assert_eq!(
            lesson.validate().unwrap_err(),
            LessonError::EmptyTitle { id: LessonId::new(1) }
        );
    }

    #[test]
    fn completing_unknown_lesson_is_noop() {
        let lessons = catalog();
        let mut progress = LessonProgress::new();
        assert!(!progress.complete(&lessons, LessonId::new(99)));
        assert_eq!(progress.completed_count(), 0);
    }

    #[test]
    fn percent_rounds_and_ignores_duplicates() {
        let lessons = catalog();
        let mut progress = LessonProgress::new();
        assert_eq!(progress.percent(&lessons), 0);
        assert!(progress.complete(&lessons, LessonId::new(2)));
        assert!(progress.complete(&lessons, LessonId::new(2)));
        assert_eq!(progress.completed_count(), 1);
        assert_eq!(progress.percent(&lessons), 33);
        progress.complete(&lessons, LessonId::new(1));
        progress.complete(&lessons, LessonId::new(3));
        assert_eq!(progress.percent(&lessons), 100);
    }

    #[test]
    fn duration_label_formats_minutes() {
        assert_eq!(catalog()[0].duration_label(), "2 min");
    }
}
