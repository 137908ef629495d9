//! Error types for parsing and session transitions.
//!
//! None of these are process-fatal. A `ParseError` means no quiz could be
//! built from the text; a `SessionError` means a transition was rejected and
//! the session is unchanged.

use thiserror::Error;

/// Errors produced while turning raw text into a `QuizSet`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text contains no numbered items at all.
    #[error("no quiz content found")]
    NoContent,

    /// Numbered items were found but none of them had any choice lines.
    #[error("no valid questions found in {blocks} numbered item(s)")]
    NoValidQuestions { blocks: usize },

    /// A record with zero choices was handed to `QuizSet::new`.
    #[error("question {number} has no choices")]
    EmptyChoices { number: usize },

    /// The marker grammar could not be used.
    #[error(transparent)]
    Grammar(#[from] GrammarError),
}

/// Errors in a marker grammar definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// The choice alphabet is empty.
    #[error("choice alphabet is empty")]
    EmptyAlphabet,

    /// The choice alphabet contains a non-alphabetic character.
    #[error("choice letter '{0}' is not alphabetic")]
    NonAlphabeticLetter(char),

    /// The same letter appears twice (case-insensitively).
    #[error("choice letter '{0}' appears more than once")]
    DuplicateLetter(char),

    /// No usable "correct answer" marker phrase.
    #[error("at least one non-blank answer marker is required")]
    NoAnswerMarker,

    /// The numbered-item pattern is not a valid regular expression.
    #[error("invalid item pattern: {0}")]
    InvalidItemPattern(String),
}

/// A session transition that was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The session already reached its terminal state.
    #[error("quiz is already finished")]
    Finished,

    /// The choice index does not exist for the current question.
    #[error("choice {index} is out of range (question has {choices} choices)")]
    ChoiceOutOfRange { index: usize, choices: usize },

    /// `advance` was called before a choice was selected.
    #[error("no choice selected for the current question")]
    NoPendingSelection,

    /// `go_back` was called on the first question.
    #[error("already at the first question")]
    AtFirstQuestion,
}

impl SessionError {
    /// Returns `true` if the session can never accept this transition again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionError::Finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grammar_error_converts_into_parse_error() {
        let err: ParseError = GrammarError::EmptyAlphabet.into();
        assert_eq!(err, ParseError::Grammar(GrammarError::EmptyAlphabet));
        assert_eq!(err.to_string(), "choice alphabet is empty");
    }

    #[test]
    fn session_error_messages() {
        let err = SessionError::ChoiceOutOfRange {
            index: 5,
            choices: 4,
        };
        assert!(err.to_string().contains("out of range"));
        assert!(!err.is_terminal());
        assert!(SessionError::Finished.is_terminal());
    }
}
