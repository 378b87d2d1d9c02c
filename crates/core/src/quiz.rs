//! Quiz progression over a fixed question bank.
//!
//! Each attempt moves `Unanswered -> Selected -> Revealed`. Calls that do not
//! fit the current state, or that reference unknown ids or option indexes,
//! leave the `ProgressState` untouched.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Question, QuestionId};

//
// ─── PROGRESS STATE ────────────────────────────────────────────────────────────
//

/// Per-session quiz record, owned by the caller.
///
/// Only `QuizEngine` mutates it. `Default` is the state of a fresh session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    completed: BTreeSet<QuestionId>,
    total_score: u32,
    current: Option<QuestionId>,
    pending_selection: Option<usize>,
    answer_revealed: bool,
}

impl ProgressState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Questions answered correctly at least once.
    #[must_use]
    pub fn completed(&self) -> &BTreeSet<QuestionId> {
        &self.completed
    }

    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    #[must_use]
    pub fn current(&self) -> Option<QuestionId> {
        self.current
    }

    #[must_use]
    pub fn pending_selection(&self) -> Option<usize> {
        self.pending_selection
    }

    #[must_use]
    pub fn answer_revealed(&self) -> bool {
        self.answer_revealed
    }

    fn reset_attempt(&mut self, current: Option<QuestionId>) {
        self.current = current;
        self.pending_selection = None;
        self.answer_revealed = false;
    }
}

//
// ─── FEEDBACK ──────────────────────────────────────────────────────────────────
//

/// What the learner sees once an answer is revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerFeedback {
    pub question: QuestionId,
    pub selected: usize,
    pub correct_option: usize,
    pub is_correct: bool,
    /// Zero when the answer was wrong or the question was already completed.
    pub points_awarded: u32,
    pub explanation: String,
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Applies learner actions to a `ProgressState` for one question bank.
#[derive(Debug, Clone, Copy)]
pub struct QuizEngine<'a> {
    bank: &'a [Question],
}

impl<'a> QuizEngine<'a> {
    #[must_use]
    pub fn new(bank: &'a [Question]) -> Self {
        Self { bank }
    }

    #[must_use]
    pub fn bank(&self) -> &'a [Question] {
        self.bank
    }

    #[must_use]
    pub fn question(&self, id: QuestionId) -> Option<&'a Question> {
        self.bank.iter().find(|q| q.id() == id)
    }

    #[must_use]
    pub fn current_question(&self, state: &ProgressState) -> Option<&'a Question> {
        state.current.and_then(|id| self.question(id))
    }

    #[must_use]
    pub fn is_completed(&self, state: &ProgressState, id: QuestionId) -> bool {
        state.completed.contains(&id)
    }

    /// Open a question for a fresh attempt, including one already completed.
    ///
    /// Returns false and changes nothing if `id` is not in the bank.
    pub fn select_question(&self, state: &mut ProgressState, id: QuestionId) -> bool {
        if self.question(id).is_none() {
            return false;
        }
        state.reset_attempt(Some(id));
        true
    }

    /// Record or change the pending choice for the current question.
    ///
    /// Ignored when no question is open, the answer is already revealed, or
    /// `index` is not an option of the current question.
    pub fn select_option(&self, state: &mut ProgressState, index: usize) -> bool {
        if state.answer_revealed {
            return false;
        }
        let Some(question) = self.current_question(state) else {
            return false;
        };
        if !question.has_option(index) {
            return false;
        }
        state.pending_selection = Some(index);
        true
    }

    /// Reveal the answer for the pending selection.
    ///
    /// Points are awarded only the first time a question is answered
    /// correctly. Returns `None` and changes nothing when there is no pending
    /// selection or the answer is already revealed.
    pub fn submit_answer(&self, state: &mut ProgressState) -> Option<AnswerFeedback> {
        if state.answer_revealed {
            return None;
        }
        let question = self.current_question(state)?;
        let selected = state.pending_selection?;

        state.answer_revealed = true;
        let is_correct = question.is_correct(selected);
        let mut points_awarded = 0;
        if is_correct {
            if !state.completed.contains(&question.id()) {
                points_awarded = question.points();
                state.total_score = state.total_score.saturating_add(points_awarded);
            }
            state.completed.insert(question.id());
        }

        debug!(
            question = %question.id(),
            selected,
            is_correct,
            points_awarded,
            total_score = state.total_score,
            "answer submitted"
        );

        Some(AnswerFeedback {
            question: question.id(),
            selected,
            correct_option: question.correct_option(),
            is_correct,
            points_awarded,
            explanation: question.explanation().to_string(),
        })
    }

    /// Move to the question after the current one in bank order.
    ///
    /// Past the last question (or with nothing open) the session returns to
    /// the question list: `current` becomes `None`. There is no wrap-around.
    pub fn advance_to_next(&self, state: &mut ProgressState) -> Option<QuestionId> {
        let next = state.current.and_then(|current| {
            let position = self.bank.iter().position(|q| q.id() == current)?;
            self.bank.get(position + 1).map(Question::id)
        });
        state.reset_attempt(next);
        next
    }

    /// Close the open question without moving on.
    pub fn return_to_list(&self, state: &mut ProgressState) {
        state.reset_attempt(None);
    }

    /// Adopt a state that was kept outside the engine, e.g. a saved snapshot.
    ///
    /// Completed ids missing from the bank are dropped and the score is
    /// recomputed from the points of what remains. An open question that is
    /// not in the bank closes the attempt; a selection that is not one of its
    /// options is cleared, and so is a reveal with nothing selected.
    #[must_use]
    pub fn restore(&self, state: ProgressState) -> ProgressState {
        let completed: BTreeSet<QuestionId> = state
            .completed
            .iter()
            .copied()
            .filter(|id| self.question(*id).is_some())
            .collect();
        let total_score = self
            .bank
            .iter()
            .filter(|q| completed.contains(&q.id()))
            .fold(0_u32, |acc, q| acc.saturating_add(q.points()));

        let mut restored = ProgressState {
            completed,
            total_score,
            ..ProgressState::default()
        };
        if let Some(question) = state.current.and_then(|id| self.question(id)) {
            restored.current = Some(question.id());
            restored.pending_selection = state.pending_selection.filter(|i| question.has_option(*i));
            restored.answer_revealed = state.answer_revealed && restored.pending_selection.is_some();
        }

        if restored != state {
            debug!(
                dropped = state.completed.len() - restored.completed.len(),
                stored_score = state.total_score,
                total_score = restored.total_score,
                "progress state repaired on restore"
            );
        }
        restored
    }

    /// Number of bank questions the state has completed.
    #[must_use]
    pub fn completed_count(&self, state: &ProgressState) -> usize {
        self.bank
            .iter()
            .filter(|q| state.completed.contains(&q.id()))
            .count()
    }

    /// Completed share of the bank, rounded to a whole percent.
    #[must_use]
    pub fn progress_percent(&self, state: &ProgressState) -> u8 {
        rounded_percent(self.completed_count(state), self.bank.len())
    }

    /// Sum of points available in the bank.
    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.bank
            .iter()
            .fold(0_u32, |acc, q| acc.saturating_add(q.points()))
    }
}

/// `round(100 * done / total)`, 0 for an empty total, capped at 100.
#[must_use]
pub fn rounded_percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let done = done.min(total);
    // Integer round-half-up of 100 * done / total.
    let pct = (200 * done + total) / (2 * total);
    u8::try_from(pct.min(100)).unwrap_or(100)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionDraft;

    fn question(id: u64, correct: usize, points: u32) -> Question {
        QuestionDraft {
            id: QuestionId::new(id),
            prompt: format!("Q{id}"),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_option: correct,
            explanation: format!("because {id}"),
            points,
        }
        .validate()
        .unwrap()
    }

    fn bank() -> Vec<Question> {
        vec![question(1, 1, 10), question(2, 2, 15), question(3, 1, 10)]
    }

    fn answer(engine: &QuizEngine<'_>, state: &mut ProgressState, id: u64, option: usize) -> AnswerFeedback {
        assert!(engine.select_question(state, QuestionId::new(id)));
        assert!(engine.select_option(state, option));
        engine.submit_answer(state).unwrap()
    }

    #[test]
    fn correct_answer_awards_points_and_completes() {
        let bank = bank();
        let engine = QuizEngine::new(&bank);
        let mut state = ProgressState::new();

        let feedback = answer(&engine, &mut state, 1, 1);
        assert!(feedback.is_correct);
        assert_eq!(feedback.points_awarded, 10);
        assert_eq!(feedback.explanation, "because 1");
        assert_eq!(state.total_score(), 10);
        assert!(engine.is_completed(&state, QuestionId::new(1)));
        assert!(state.answer_revealed());
    }

    #[test]
    fn retake_does_not_double_count() {
        let bank = bank();
        let engine = QuizEngine::new(&bank);
        let mut state = ProgressState::new();

        answer(&engine, &mut state, 1, 1);
        let again = answer(&engine, &mut state, 1, 1);
        assert!(again.is_correct);
        assert_eq!(again.points_awarded, 0);
        assert_eq!(state.total_score(), 10);
        assert_eq!(state.completed().len(), 1);
    }

    #[test]
    fn incorrect_answer_reveals_without_completing() {
        let bank = bank();
        let engine = QuizEngine::new(&bank);
        let mut state = ProgressState::new();

        let feedback = answer(&engine, &mut state, 2, 0);
        assert!(!feedback.is_correct);
        assert_eq!(feedback.correct_option, 2);
        assert_eq!(state.total_score(), 0);
        assert!(state.completed().is_empty());
        assert!(state.answer_revealed());
    }

    #[test]
    fn wrong_retake_keeps_earlier_completion() {
        let bank = bank();
        let engine = QuizEngine::new(&bank);
        let mut state = ProgressState::new();

        answer(&engine, &mut state, 1, 1);
        answer(&engine, &mut state, 1, 3);
        assert!(engine.is_completed(&state, QuestionId::new(1)));
        assert_eq!(state.total_score(), 10);
    }

    #[test]
    fn submit_without_selection_is_noop() {
        let bank = bank();
        let engine = QuizEngine::new(&bank);
        let mut state = ProgressState::new();

        assert!(engine.submit_answer(&mut state).is_none());
        engine.select_question(&mut state, QuestionId::new(1));
        let before = state.clone();
        assert!(engine.submit_answer(&mut state).is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn double_submit_is_noop() {
        let bank = bank();
        let engine = QuizEngine::new(&bank);
        let mut state = ProgressState::new();

        answer(&engine, &mut state, 2, 2);
        let before = state.clone();
        assert!(engine.submit_answer(&mut state).is_none());
        assert_eq!(state, before);
        assert_eq!(state.total_score(), 15);
    }

    #[test]
    fn selection_can_change_until_revealed() {
        let bank = bank();
        let engine = QuizEngine::new(&bank);
        let mut state = ProgressState::new();

        engine.select_question(&mut state, QuestionId::new(1));
        assert!(engine.select_option(&mut state, 0));
        assert!(engine.select_option(&mut state, 3));
        assert_eq!(state.pending_selection(), Some(3));
        engine.submit_answer(&mut state);
        assert!(!engine.select_option(&mut state, 1));
        assert_eq!(state.pending_selection(), Some(3));
    }

    #[test]
    fn out_of_range_calls_leave_state_unchanged() {
        let bank = bank();
        let engine = QuizEngine::new(&bank);
        let mut state = ProgressState::new();

        assert!(!engine.select_option(&mut state, 0));
        assert!(!engine.select_question(&mut state, QuestionId::new(42)));
        engine.select_question(&mut state, QuestionId::new(1));
        let before = state.clone();
        assert!(!engine.select_option(&mut state, 4));
        assert!(!engine.select_question(&mut state, QuestionId::new(0)));
        assert_eq!(state, before);
    }

    #[test]
    fn advance_walks_bank_order_then_returns_to_list() {
        let bank = bank();
        let engine = QuizEngine::new(&bank);
        let mut state = ProgressState::new();

        answer(&engine, &mut state, 1, 1);
        assert_eq!(engine.advance_to_next(&mut state), Some(QuestionId::new(2)));
        assert_eq!(state.pending_selection(), None);
        assert!(!state.answer_revealed());
        assert_eq!(engine.advance_to_next(&mut state), Some(QuestionId::new(3)));
        assert_eq!(engine.advance_to_next(&mut state), None);
        assert_eq!(state.current(), None);
        assert_eq!(engine.advance_to_next(&mut state), None);
    }

    #[test]
    fn selecting_question_resets_attempt() {
        let bank = bank();
        let engine = QuizEngine::new(&bank);
        let mut state = ProgressState::new();

        answer(&engine, &mut state, 3, 0);
        engine.select_question(&mut state, QuestionId::new(3));
        assert_eq!(state.pending_selection(), None);
        assert!(!state.answer_revealed());

        engine.select_option(&mut state, 2);
        engine.return_to_list(&mut state);
        assert_eq!(state.current(), None);
        assert_eq!(state.pending_selection(), None);
    }

    #[test]
    fn progress_percent_tracks_completion() {
        let bank = bank();
        let engine = QuizEngine::new(&bank);
        let mut state = ProgressState::new();

        assert_eq!(engine.progress_percent(&state), 0);
        answer(&engine, &mut state, 1, 1);
        assert_eq!(engine.progress_percent(&state), 33);
        answer(&engine, &mut state, 2, 2);
        assert_eq!(engine.progress_percent(&state), 67);
        answer(&engine, &mut state, 3, 1);
        assert_eq!(engine.progress_percent(&state), 100);
        assert_eq!(state.total_score(), engine.max_score());
    }

    #[test]
    fn restore_repairs_foreign_snapshot() {
        let bank = bank();
        let engine = QuizEngine::new(&bank);
        let snapshot: ProgressState = serde_json::from_str(
            r#"{"completed":[1,2,3,99],"total_score":500,"current":77,
                "pending_selection":2,"answer_revealed":true}"#,
        )
        .unwrap();
        assert_eq!(engine.completed_count(&snapshot), 3);

        let state = engine.restore(snapshot);
        assert_eq!(state.completed().len(), 3);
        assert!(!state.completed().contains(&QuestionId::new(99)));
        assert_eq!(state.total_score(), engine.max_score());
        assert_eq!(state.current(), None);
        assert_eq!(state.pending_selection(), None);
        assert!(!state.answer_revealed());
    }

    #[test]
    fn restore_clears_out_of_range_selection() {
        let bank = bank();
        let engine = QuizEngine::new(&bank);
        let snapshot: ProgressState = serde_json::from_str(
            r#"{"completed":[2],"total_score":0,"current":1,
                "pending_selection":9,"answer_revealed":true}"#,
        )
        .unwrap();

        let state = engine.restore(snapshot);
        assert_eq!(state.total_score(), 15);
        assert_eq!(state.current(), Some(QuestionId::new(1)));
        assert_eq!(state.pending_selection(), None);
        assert!(!state.answer_revealed());
        assert!(engine.submit_answer(&mut state.clone()).is_none());
    }

    #[test]
    fn restore_keeps_consistent_state() {
        let bank = bank();
        let engine = QuizEngine::new(&bank);
        let mut state = ProgressState::new();
        answer(&engine, &mut state, 2, 2);
        engine.select_question(&mut state, QuestionId::new(3));
        engine.select_option(&mut state, 1);

        assert_eq!(engine.restore(state.clone()), state);
    }

    #[test]
    fn rounded_percent_edges() {
        assert_eq!(rounded_percent(0, 0), 0);
        assert_eq!(rounded_percent(1, 2), 50);
        assert_eq!(rounded_percent(1, 8), 13);
        assert_eq!(rounded_percent(1, 200), 1);
        assert_eq!(rounded_percent(1, 201), 0);
        assert_eq!(rounded_percent(5, 3), 100);
    }
}
