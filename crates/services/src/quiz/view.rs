use serde::Serialize;

use guard_core::model::QuestionId;

/// How a question appears in the question list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizStatus {
    /// Never answered correctly; offered as "Start".
    New,
    /// Answered correctly before; offered as "Retake" with no further points.
    Completed,
}

/// One row of the question-selection view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizListItem {
    pub id: QuestionId,
    /// 1-based position in the bank.
    pub position: usize,
    pub points: u32,
    pub status: QuizStatus,
}

impl QuizListItem {
    #[must_use]
    pub fn label(&self) -> String {
        format!("Quiz {}", self.position)
    }

    #[must_use]
    pub fn action(&self) -> &'static str {
        match self.status {
            QuizStatus::New => "Start",
            QuizStatus::Completed => "Retake",
        }
    }
}
