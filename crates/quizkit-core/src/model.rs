//! Core data model types for quizkit.
//!
//! A `QuizSet` is the immutable output of the parser and the input to a
//! `QuizSession`. Two distinct tagged types mark "no value": the parser's
//! [`CorrectAnswer::Unknown`] and the session's [`Selection::Unanswered`].
//! They are never interchangeable.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// The correct answer of a question as extracted by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "lowercase")]
pub enum CorrectAnswer {
    /// 0-based index into the question's choices.
    Known(usize),
    /// No answer letter could be extracted, or it pointed past the choices.
    Unknown,
}

impl CorrectAnswer {
    /// The index, if known.
    pub fn index(&self) -> Option<usize> {
        match self {
            CorrectAnswer::Known(i) => Some(*i),
            CorrectAnswer::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, CorrectAnswer::Known(_))
    }
}

/// One slot of a session's answer sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "lowercase")]
pub enum Selection {
    /// Nothing recorded for this question yet.
    #[default]
    Unanswered,
    /// 0-based index of the recorded choice.
    Chosen(usize),
}

impl Selection {
    /// The chosen index, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            Selection::Chosen(i) => Some(*i),
            Selection::Unanswered => None,
        }
    }

    pub fn is_answered(&self) -> bool {
        matches!(self, Selection::Chosen(_))
    }

    /// Returns `true` only when both sides carry the same index.
    ///
    /// An unknown correct answer never matches anything.
    pub fn matches(&self, correct: CorrectAnswer) -> bool {
        match (self, correct) {
            (Selection::Chosen(chosen), CorrectAnswer::Known(answer)) => *chosen == answer,
            _ => false,
        }
    }
}

/// A single parsed multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// The question text (first line of the block).
    pub question: String,
    /// Choice texts in encounter order; the order is the answer index scheme.
    pub choices: Vec<String>,
    /// The correct choice, or `Unknown`.
    pub correct: CorrectAnswer,
    /// Explanation from the answer line, possibly empty.
    #[serde(default)]
    pub explanation: String,
}

impl QuestionRecord {
    /// Text of the correct choice, when known.
    pub fn correct_choice(&self) -> Option<&str> {
        self.correct
            .index()
            .and_then(|i| self.choices.get(i))
            .map(String::as_str)
    }

    /// Text of the choice at `index`, if it exists.
    pub fn choice(&self, index: usize) -> Option<&str> {
        self.choices.get(index).map(String::as_str)
    }

    /// Text of the selected choice, if the selection is valid for this question.
    pub fn chosen_text(&self, selection: Selection) -> Option<&str> {
        selection.index().and_then(|i| self.choice(i))
    }
}

/// Immutable, non-empty, ordered collection of questions for one attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSet {
    questions: Vec<QuestionRecord>,
}

impl QuizSet {
    /// Build a quiz set, rejecting an empty list and records without choices.
    pub fn new(questions: Vec<QuestionRecord>) -> Result<Self, ParseError> {
        if questions.is_empty() {
            return Err(ParseError::NoContent);
        }
        if let Some(pos) = questions.iter().position(|q| q.choices.is_empty()) {
            return Err(ParseError::EmptyChoices { number: pos + 1 });
        }
        Ok(Self { questions })
    }

    /// Number of questions (always at least 1).
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always `false`; provided for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QuestionRecord> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuestionRecord> {
        self.questions.iter()
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    /// Number of questions whose correct answer is unknown.
    pub fn unknown_answer_count(&self) -> usize {
        self.questions.iter().filter(|q| !q.correct.is_known()).count()
    }
}

impl Index<usize> for QuizSet {
    type Output = QuestionRecord;

    fn index(&self, index: usize) -> &Self::Output {
        &self.questions[index]
    }
}

impl<'a> IntoIterator for &'a QuizSet {
    type Item = &'a QuestionRecord;
    type IntoIter = std::slice::Iter<'a, QuestionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

// Deserialization goes through `QuizSet::new` so a loaded set keeps its invariants.
impl<'de> Deserialize<'de> for QuizSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            questions: Vec<QuestionRecord>,
        }

        let raw = Raw::deserialize(deserializer)?;
        QuizSet::new(raw.questions).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for QuizSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} question(s)", self.questions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(choices: &[&str], correct: CorrectAnswer) -> QuestionRecord {
        QuestionRecord {
            question: "What?".into(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
            correct,
            explanation: String::new(),
        }
    }

    #[test]
    fn quiz_set_rejects_empty() {
        assert_eq!(QuizSet::new(vec![]), Err(ParseError::NoContent));
    }

    #[test]
    fn quiz_set_rejects_record_without_choices() {
        let result = QuizSet::new(vec![
            record(&["a"], CorrectAnswer::Known(0)),
            record(&[], CorrectAnswer::Unknown),
        ]);
        assert_eq!(result, Err(ParseError::EmptyChoices { number: 2 }));
    }

    #[test]
    fn unknown_answer_never_matches() {
        assert!(!Selection::Chosen(0).matches(CorrectAnswer::Unknown));
        assert!(!Selection::Unanswered.matches(CorrectAnswer::Unknown));
        assert!(!Selection::Unanswered.matches(CorrectAnswer::Known(0)));
        assert!(Selection::Chosen(2).matches(CorrectAnswer::Known(2)));
    }

    #[test]
    fn correct_choice_text() {
        let q = record(&["foo", "bar"], CorrectAnswer::Known(1));
        assert_eq!(q.correct_choice(), Some("bar"));
        assert_eq!(q.chosen_text(Selection::Chosen(0)), Some("foo"));
        assert_eq!(q.chosen_text(Selection::Chosen(7)), None);
        assert_eq!(record(&["foo"], CorrectAnswer::Unknown).correct_choice(), None);
    }

    #[test]
    fn counts_unknown_answers() {
        let set = QuizSet::new(vec![
            record(&["a", "b"], CorrectAnswer::Known(0)),
            record(&["a", "b"], CorrectAnswer::Unknown),
        ])
        .unwrap();
        assert_eq!(set.unknown_answer_count(), 1);
    }

    #[test]
    fn deserialize_enforces_invariants() {
        let json = r#"{"questions": []}"#;
        assert!(serde_json::from_str::<QuizSet>(json).is_err());

        let set = QuizSet::new(vec![record(&["x", "y"], CorrectAnswer::Known(1))]).unwrap();
        let json = serde_json::to_string(&set).unwrap();
        let loaded: QuizSet = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, set);
    }
}
