//! Scoring and per-question review.

use serde::{Deserialize, Serialize};

use crate::model::{QuizSet, Selection};

/// Final score of a finished attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub correct_count: usize,
    pub total: usize,
    pub review: Vec<QuestionReview>,
}

impl QuizResult {
    /// Score as a percentage in `[0, 100]`.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct_count as f64 * 100.0 / self.total as f64
    }

    pub fn unanswered_count(&self) -> usize {
        self.review.iter().filter(|r| r.chosen.is_none()).count()
    }
}

/// Review line for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionReview {
    /// 1-based question number.
    pub number: usize,
    pub question: String,
    pub is_correct: bool,
    /// Text of the chosen option; `None` means unanswered.
    pub chosen: Option<String>,
    /// Text of the correct option, only when the answer was not correct and
    /// the correct option is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
}

/// Score `selections` against `quiz`.
///
/// Missing slots and indices that do not exist for their question count as
/// unanswered. A question with an unknown correct answer is never correct.
pub fn score(quiz: &QuizSet, selections: &[Selection]) -> QuizResult {
    let review: Vec<QuestionReview> = quiz
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let selection = selections.get(i).copied().unwrap_or_default();
            let chosen = q.chosen_text(selection).map(str::to_string);
            let is_correct = chosen.is_some() && selection.matches(q.correct);
            QuestionReview {
                number: i + 1,
                question: q.question.clone(),
                is_correct,
                chosen,
                correct_answer: if is_correct {
                    None
                } else {
                    q.correct_choice().map(str::to_string)
                },
            }
        })
        .collect();

    QuizResult {
        correct_count: review.iter().filter(|r| r.is_correct).count(),
        total: quiz.len(),
        review,
    }
}
