use std::fmt;
use std::sync::Arc;

use guard_core::model::{Question, QuestionId};
use guard_core::{AnswerFeedback, ProgressState, QuizEngine, ReferenceDataset};

use super::progress::QuizProgress;
use super::view::{QuizListItem, QuizStatus};

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One learner's pass through the question bank.
///
/// Wraps the caller-owned `ProgressState` together with the dataset it refers
/// to. Every action forwards to `QuizEngine`, so misuse (unknown ids, no
/// selection, answering twice) is ignored rather than reported.
#[derive(Clone)]
pub struct QuizSession {
    dataset: Arc<ReferenceDataset>,
    state: ProgressState,
}

impl QuizSession {
    #[must_use]
    pub fn new(dataset: Arc<ReferenceDataset>) -> Self {
        Self::from_state(dataset, ProgressState::new())
    }

    /// Resume from a state the shell kept, e.g. across screen changes.
    ///
    /// The state is checked against this dataset's bank first, so a snapshot
    /// taken against another bank cannot claim unknown questions or points.
    #[must_use]
    pub fn from_state(dataset: Arc<ReferenceDataset>, state: ProgressState) -> Self {
        let state = QuizEngine::new(dataset.questions()).restore(state);
        Self { dataset, state }
    }

    #[must_use]
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> ProgressState {
        self.state
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        QuizEngine::new(self.dataset.questions()).current_question(&self.state)
    }

    pub fn select_question(&mut self, id: QuestionId) -> bool {
        QuizEngine::new(self.dataset.questions()).select_question(&mut self.state, id)
    }

    pub fn select_option(&mut self, index: usize) -> bool {
        QuizEngine::new(self.dataset.questions()).select_option(&mut self.state, index)
    }

    pub fn submit_answer(&mut self) -> Option<AnswerFeedback> {
        QuizEngine::new(self.dataset.questions()).submit_answer(&mut self.state)
    }

    pub fn advance_to_next(&mut self) -> Option<QuestionId> {
        QuizEngine::new(self.dataset.questions()).advance_to_next(&mut self.state)
    }

    pub fn return_to_list(&mut self) {
        QuizEngine::new(self.dataset.questions()).return_to_list(&mut self.state);
    }

    /// Returns a summary of the current quiz progress.
    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let engine = QuizEngine::new(self.dataset.questions());
        QuizProgress {
            completed: engine.completed_count(&self.state),
            total: engine.bank().len(),
            score: self.state.total_score(),
            max_score: engine.max_score(),
            percent: engine.progress_percent(&self.state),
        }
    }

    /// Rows for the question-selection view, in bank order.
    #[must_use]
    pub fn list(&self) -> Vec<QuizListItem> {
        let engine = QuizEngine::new(self.dataset.questions());
        engine
            .bank()
            .iter()
            .enumerate()
            .map(|(index, question)| QuizListItem {
                id: question.id(),
                position: index + 1,
                points: question.points(),
                status: if engine.is_completed(&self.state, question.id()) {
                    QuizStatus::Completed
                } else {
                    QuizStatus::New
                },
            })
            .collect()
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.dataset.questions().len())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
