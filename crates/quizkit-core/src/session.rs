//! Quiz session state machine.
//!
//! A session walks a shared `QuizSet` one question at a time:
//!
//! - `InProgress` carries the current index, a pending choice and the hint flag.
//! - `Finished` is terminal; only the recorded selections remain meaningful.
//!
//! `select_choice` only sets the pending choice. `advance` is the only
//! operation that writes the answer sheet. Rejected transitions return a
//! [`SessionError`] and leave the session untouched.

use std::sync::Arc;

use serde::Serialize;

use crate::error::SessionError;
use crate::model::{QuizSet, Selection};
use crate::score::{score, QuizResult};

#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionState {
    InProgress {
        index: usize,
        pending: Option<usize>,
        hint_visible: bool,
    },
    Finished,
}

/// Coarse phase of a session, for callers that only need to branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    InProgress,
    Finished,
}

/// What `advance` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the question at this 0-based index.
    Next(usize),
    /// The last answer was recorded and the session is finished.
    Finished,
}

/// Read-only view of the current question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentView<'a> {
    /// 1-based question number.
    pub number: usize,
    pub total: usize,
    pub question: &'a str,
    pub choices: &'a [String],
    /// `number / total`, in `(0, 1]`.
    pub progress: f64,
    pub hint_visible: bool,
    pub explanation: &'a str,
    /// The choice currently selected but not yet recorded.
    pub pending: Option<usize>,
}

impl CurrentView<'_> {
    /// The explanation, if the hint is shown and there is something to show.
    pub fn visible_hint(&self) -> Option<&str> {
        (self.hint_visible && !self.explanation.is_empty()).then_some(self.explanation)
    }

    pub fn is_last(&self) -> bool {
        self.number == self.total
    }
}

/// Navigation and answer state for one attempt at a quiz.
#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz: Arc<QuizSet>,
    selections: Vec<Selection>,
    state: SessionState,
}

impl QuizSession {
    /// Start at the first question with every slot unanswered and the hint hidden.
    pub fn new(quiz: Arc<QuizSet>) -> Self {
        let selections = vec![Selection::Unanswered; quiz.len()];
        tracing::debug!(questions = quiz.len(), "quiz session started");
        Self {
            quiz,
            selections,
            state: SessionState::InProgress {
                index: 0,
                pending: None,
                hint_visible: false,
            },
        }
    }

    pub fn quiz(&self) -> &QuizSet {
        &self.quiz
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            SessionState::InProgress { .. } => Phase::InProgress,
            SessionState::Finished => Phase::Finished,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    /// Recorded answers, one slot per question.
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    /// 0-based index of the current question, `None` once finished.
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            SessionState::InProgress { index, .. } => Some(index),
            SessionState::Finished => None,
        }
    }

    pub fn pending(&self) -> Option<usize> {
        match self.state {
            SessionState::InProgress { pending, .. } => pending,
            SessionState::Finished => None,
        }
    }

    pub fn hint_visible(&self) -> bool {
        matches!(
            self.state,
            SessionState::InProgress {
                hint_visible: true,
                ..
            }
        )
    }

    /// The view a UI renders while the quiz is running.
    pub fn current_view(&self) -> Option<CurrentView<'_>> {
        let SessionState::InProgress {
            index,
            pending,
            hint_visible,
        } = self.state
        else {
            return None;
        };
        let q = &self.quiz[index];
        let total = self.quiz.len();
        Some(CurrentView {
            number: index + 1,
            total,
            question: &q.question,
            choices: &q.choices,
            progress: (index + 1) as f64 / total as f64,
            hint_visible,
            explanation: &q.explanation,
            pending,
        })
    }

    /// Select a choice for the current question without recording it.
    pub fn select_choice(&mut self, choice: usize) -> Result<(), SessionError> {
        let SessionState::InProgress { index, pending, .. } = &mut self.state else {
            return Err(SessionError::Finished);
        };
        let choices = self.quiz[*index].choices.len();
        if choice >= choices {
            return Err(SessionError::ChoiceOutOfRange {
                index: choice,
                choices,
            });
        }
        *pending = Some(choice);
        tracing::debug!(question = *index + 1, choice, "choice selected");
        Ok(())
    }

    /// Record the pending choice and move on, finishing after the last question.
    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        let SessionState::InProgress { index, pending, .. } = self.state else {
            return Err(SessionError::Finished);
        };
        let choice = pending.ok_or(SessionError::NoPendingSelection)?;

        self.selections[index] = Selection::Chosen(choice);

        if index + 1 == self.quiz.len() {
            self.state = SessionState::Finished;
            tracing::debug!("quiz session finished");
            return Ok(Advance::Finished);
        }

        let next = index + 1;
        self.state = SessionState::InProgress {
            index: next,
            pending: self.selections[next].index(),
            hint_visible: false,
        };
        tracing::debug!(question = next + 1, "advanced");
        Ok(Advance::Next(next))
    }

    /// Return to the previous question and restore its recorded choice.
    ///
    /// The current question's pending choice is dropped; it was never recorded.
    pub fn go_back(&mut self) -> Result<usize, SessionError> {
        let SessionState::InProgress { index, .. } = self.state else {
            return Err(SessionError::Finished);
        };
        if index == 0 {
            return Err(SessionError::AtFirstQuestion);
        }

        let prev = index - 1;
        self.state = SessionState::InProgress {
            index: prev,
            pending: self.selections[prev].index(),
            hint_visible: false,
        };
        tracing::debug!(question = prev + 1, "went back");
        Ok(prev)
    }

    /// Flip hint visibility for the current question. Returns the new state.
    pub fn toggle_hint(&mut self) -> Result<bool, SessionError> {
        let SessionState::InProgress { hint_visible, .. } = &mut self.state else {
            return Err(SessionError::Finished);
        };
        *hint_visible = !*hint_visible;
        Ok(*hint_visible)
    }

    /// Score and review data, available once finished.
    pub fn result(&self) -> Option<QuizResult> {
        self.is_finished()
            .then(|| score(&self.quiz, &self.selections))
    }

    /// Discard the session. Nothing is persisted.
    pub fn close(self) {
        let answered = self.selections.iter().filter(|s| s.is_answered()).count();
        tracing::debug!(
            answered,
            total = self.selections.len(),
            finished = self.is_finished(),
            "quiz session closed"
        );
    }
}
