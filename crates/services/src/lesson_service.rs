use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use guard_core::ReferenceDataset;
use guard_core::model::{Lesson, LessonId, LessonProgress};

/// One row of the lesson list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonListItem {
    pub id: LessonId,
    pub position: usize,
    pub title: String,
    pub content: String,
    pub duration: String,
    pub completed: bool,
}

/// Static lesson catalog plus the learner's completion marks.
#[derive(Debug, Clone)]
pub struct LessonService {
    dataset: Arc<ReferenceDataset>,
    progress: LessonProgress,
}

impl LessonService {
    #[must_use]
    pub fn new(dataset: Arc<ReferenceDataset>) -> Self {
        Self {
            dataset,
            progress: LessonProgress::new(),
        }
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        self.dataset.lessons()
    }

    #[must_use]
    pub fn list(&self) -> Vec<LessonListItem> {
        self.lessons()
            .iter()
            .enumerate()
            .map(|(index, lesson)| LessonListItem {
                id: lesson.id,
                position: index + 1,
                title: lesson.title.clone(),
                content: lesson.content.clone(),
                duration: lesson.duration_label(),
                completed: self.progress.is_completed(lesson.id),
            })
            .collect()
    }

    /// Mark a lesson finished. Unknown ids are ignored.
    pub fn complete(&mut self, id: LessonId) -> bool {
        let applied = self.progress.complete(self.dataset.lessons(), id);
        debug!(lesson = %id, applied, "lesson completion");
        applied
    }

    #[must_use]
    pub fn percent(&self) -> u8 {
        self.progress.percent(self.dataset.lessons())
    }

    #[must_use]
    pub fn progress(&self) -> &LessonProgress {
        &self.progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completing_lessons_updates_list_and_percent() {
        let mut service = LessonService::new(Arc::new(ReferenceDataset::builtin().unwrap()));
        assert_eq!(service.list().len(), 4);
        assert_eq!(service.percent(), 0);

        assert!(service.complete(LessonId::new(1)));
        assert!(!service.complete(LessonId::new(9)));

        let list = service.list();
        assert!(list[0].completed);
        assert!(!list[1].completed);
        assert_eq!(list[2].duration, "1 min");
        assert_eq!(service.percent(), 25);
    }
}
