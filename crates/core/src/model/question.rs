use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {id}: prompt cannot be empty")]
    EmptyPrompt { id: QuestionId },

    #[error("question {id}: needs at least 2 options, got {len}")]
    TooFewOptions { id: QuestionId, len: usize },

    #[error("question {id}: option {index} is empty")]
    EmptyOption { id: QuestionId, index: usize },

    #[error("question {id}: correct option {index} is out of range for {len} options")]
    CorrectOptionOutOfRange {
        id: QuestionId,
        index: usize,
        len: usize,
    },

    #[error("question {id}: points must be > 0")]
    ZeroPoints { id: QuestionId },
}

/// Unvalidated multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub id: QuestionId,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option: usize,
    #[serde(default)]
    pub explanation: String,
    pub points: u32,
}

impl QuestionDraft {
    /// Validate the draft into an immutable question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is empty, fewer than two options are
    /// given, an option is blank, the correct index is out of range, or points is zero.
    pub fn validate(self) -> Result<Question, QuestionError> {
        let id = self.id;
        let prompt = self.prompt.trim().to_string();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt { id });
        }

        let len = self.options.len();
        if len < 2 {
            return Err(QuestionError::TooFewOptions { id, len });
        }
        let mut options = Vec::with_capacity(len);
        for (index, option) in self.options.into_iter().enumerate() {
            let option = option.trim().to_string();
            if option.is_empty() {
                return Err(QuestionError::EmptyOption { id, index });
            }
            options.push(option);
        }

        if self.correct_option >= len {
            return Err(QuestionError::CorrectOptionOutOfRange {
                id,
                index: self.correct_option,
                len,
            });
        }
        if self.points == 0 {
            return Err(QuestionError::ZeroPoints { id });
        }

        Ok(Question {
            id,
            prompt,
            options,
            correct_option: self.correct_option,
            explanation: self.explanation.trim().to_string(),
            points: self.points,
        })
    }
}

/// A scored multiple-choice question. Bank order defines quiz sequencing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: Vec<String>,
    correct_option: usize,
    explanation: String,
    points: u32,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_option(&self) -> usize {
        self.correct_option
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }

    #[must_use]
    pub fn has_option(&self, index: usize) -> bool {
        index < self.options.len()
    }

    #[must_use]
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_option
    }
}
