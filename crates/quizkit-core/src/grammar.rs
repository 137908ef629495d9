//! Marker grammar for generated quiz text.
//!
//! The upstream generator writes numbered items, choice lines such as
//! `B) Some option` and an answer line such as `Réponse correcte : B`.
//! The literals live here so the format can be adapted without touching the
//! parsing logic.

use serde::{Deserialize, Serialize};

use crate::error::GrammarError;

/// Marker set used by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grammar {
    /// Regex matching the start of a numbered item.
    #[serde(default = "default_item_pattern")]
    pub item_pattern: String,
    /// Choice letters in index order (first letter = index 0).
    #[serde(default = "default_choice_letters")]
    pub choice_letters: String,
    /// Character that follows a choice letter.
    #[serde(default = "default_choice_delimiter")]
    pub choice_delimiter: char,
    /// Phrases that open the answer line, matched case-insensitively.
    #[serde(default = "default_answer_markers")]
    pub answer_markers: Vec<String>,
}

fn default_item_pattern() -> String {
    r"(?m)^[ \t]*\d+\.\s".to_string()
}

fn default_choice_letters() -> String {
    "ABCD".to_string()
}

fn default_choice_delimiter() -> char {
    ')'
}

fn default_answer_markers() -> Vec<String> {
    vec!["Réponse correcte".to_string(), "Correct answer".to_string()]
}

impl Default for Grammar {
    fn default() -> Self {
        Self {
            item_pattern: default_item_pattern(),
            choice_letters: default_choice_letters(),
            choice_delimiter: default_choice_delimiter(),
            answer_markers: default_answer_markers(),
        }
    }
}

impl Grammar {
    /// Check the alphabet and markers. The item pattern is checked when it
    /// is compiled by the parser.
    pub fn validate(&self) -> Result<(), GrammarError> {
        if self.choice_letters.is_empty() {
            return Err(GrammarError::EmptyAlphabet);
        }
        let mut seen = Vec::new();
        for c in self.choice_letters.chars() {
            if !c.is_alphabetic() {
                return Err(GrammarError::NonAlphabeticLetter(c));
            }
            let folded = fold(c);
            if seen.contains(&folded) {
                return Err(GrammarError::DuplicateLetter(c));
            }
            seen.push(folded);
        }
        if self.answer_markers.iter().all(|m| m.trim().is_empty()) {
            return Err(GrammarError::NoAnswerMarker);
        }
        Ok(())
    }

    /// Map a letter to its 0-based choice index, case-insensitively.
    pub fn letter_index(&self, letter: char) -> Option<usize> {
        let folded = fold(letter);
        self.choice_letters.chars().position(|c| fold(c) == folded)
    }

    /// Inverse of [`Grammar::letter_index`], using the alphabet's own casing.
    pub fn index_letter(&self, index: usize) -> Option<char> {
        self.choice_letters.chars().nth(index)
    }

    /// If `line` starts with `<letter><delimiter>`, return the letter and the rest.
    ///
    /// Any alphabetic letter is accepted here; callers decide whether it
    /// belongs to the alphabet.
    pub(crate) fn split_choice_marker<'a>(&self, line: &'a str) -> Option<(char, &'a str)> {
        let mut chars = line.char_indices();
        let (_, letter) = chars.next()?;
        let (delim_at, delim) = chars.next()?;
        if !letter.is_alphabetic() || delim != self.choice_delimiter {
            return None;
        }
        Some((letter, &line[delim_at + delim.len_utf8()..]))
    }

    /// If `line` starts with one of the answer markers, return the text after it.
    pub(crate) fn strip_answer_marker<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.answer_markers
            .iter()
            .map(|m| m.trim())
            .filter(|m| !m.is_empty())
            .find_map(|marker| strip_prefix_ignore_case(line, marker))
    }
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Case-insensitive `strip_prefix` that compares character by character, so
/// byte offsets stay valid for non-ASCII markers.
fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let mut rest = s.char_indices();
    for expected in prefix.chars() {
        let (_, actual) = rest.next()?;
        if fold(actual) != fold(expected) {
            return None;
        }
    }
    match rest.next() {
        Some((at, _)) => Some(&s[at..]),
        None => Some(""),
    }
}
