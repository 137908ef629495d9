//! Generated quiz text parser.
//!
//! Turns a semi-structured block of text into a `QuizSet`:
//!
//! ```text
//! 1. What is X?
//!    A) foo
//!    B) bar
//!    Correct answer: B - because
//! ```
//!
//! A problem inside one item degrades that item only; parsing of the rest
//! continues and the problem is reported as a [`ParseWarning`].

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;

use crate::error::{GrammarError, ParseError};
use crate::grammar::Grammar;
use crate::model::{CorrectAnswer, QuestionRecord, QuizSet};

/// Parse `raw` with the default grammar.
pub fn parse(raw: &str) -> Result<QuizSet, ParseError> {
    QuizParser::new(Grammar::default())?.parse(raw)
}

/// Read a quiz text file and parse it, keeping the diagnostics.
pub fn parse_quiz_file(parser: &QuizParser, path: &Path) -> Result<ParseOutcome> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parser
        .parse_with_diagnostics(&content)
        .with_context(|| format!("failed to parse quiz: {}", path.display()))
}

/// A parsed quiz together with the per-item problems found on the way.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub quiz: QuizSet,
    pub warnings: Vec<ParseWarning>,
}

/// A non-fatal problem in one numbered item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based position of the item in the text.
    pub item: usize,
    pub kind: ParseWarningKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarningKind {
    /// No answer line, or no answer letter on it.
    UnknownAnswer,
    /// The answer letter points past the parsed choices.
    AnswerOutOfRange { letter: char, choices: usize },
    /// A choice-shaped line with a letter outside the alphabet.
    IgnoredChoiceLine { line: String },
    /// The item had no choice lines and was dropped.
    DroppedNoChoices,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item {}: ", self.item)?;
        match &self.kind {
            ParseWarningKind::UnknownAnswer => write!(f, "no correct answer found"),
            ParseWarningKind::AnswerOutOfRange { letter, choices } => write!(
                f,
                "answer '{letter}' does not match any of the {choices} choice(s)"
            ),
            ParseWarningKind::IgnoredChoiceLine { line } => {
                write!(f, "ignored choice line with unknown letter: {line}")
            }
            ParseWarningKind::DroppedNoChoices => write!(f, "no choices found, item dropped"),
        }
    }
}

/// Parser bound to a validated grammar.
#[derive(Debug, Clone)]
pub struct QuizParser {
    grammar: Grammar,
    item_re: Regex,
}

impl QuizParser {
    pub fn new(grammar: Grammar) -> Result<Self, GrammarError> {
        grammar.validate()?;
        let item_re = Regex::new(&grammar.item_pattern)
            .map_err(|e| GrammarError::InvalidItemPattern(e.to_string()))?;
        Ok(Self { grammar, item_re })
    }

    /// Parse raw text into a quiz set, discarding warnings after logging them.
    pub fn parse(&self, raw: &str) -> Result<QuizSet, ParseError> {
        self.parse_with_diagnostics(raw).map(|outcome| outcome.quiz)
    }

    /// Parse raw text and return the quiz set with per-item warnings.
    pub fn parse_with_diagnostics(&self, raw: &str) -> Result<ParseOutcome, ParseError> {
        // The first segment is whatever precedes the first numbered item.
        let blocks: Vec<&str> = self.item_re.split(raw).skip(1).collect();
        if blocks.is_empty() {
            return Err(ParseError::NoContent);
        }

        let mut questions = Vec::with_capacity(blocks.len());
        let mut warnings = Vec::new();

        for (i, block) in blocks.iter().enumerate() {
            let item = i + 1;
            match self.parse_block(block, item, &mut warnings) {
                Some(record) => {
                    tracing::debug!(
                        item,
                        choices = record.choices.len(),
                        known_answer = record.correct.is_known(),
                        "parsed quiz item"
                    );
                    questions.push(record);
                }
                None => warnings.push(ParseWarning {
                    item,
                    kind: ParseWarningKind::DroppedNoChoices,
                }),
            }
        }

        for w in &warnings {
            tracing::warn!("{w}");
        }

        if questions.is_empty() {
            return Err(ParseError::NoValidQuestions {
                blocks: blocks.len(),
            });
        }

        Ok(ParseOutcome {
            quiz: QuizSet::new(questions)?,
            warnings,
        })
    }

    fn parse_block(
        &self,
        block: &str,
        item: usize,
        warnings: &mut Vec<ParseWarning>,
    ) -> Option<QuestionRecord> {
        let lines: Vec<&str> = block
            .trim()
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let (question, rest) = lines.split_first()?;

        let mut choices = Vec::new();
        for line in rest {
            if let Some((letter, text)) = self.grammar.split_choice_marker(line) {
                if self.grammar.letter_index(letter).is_some() {
                    choices.push(text.trim().to_string());
                } else {
                    warnings.push(ParseWarning {
                        item,
                        kind: ParseWarningKind::IgnoredChoiceLine {
                            line: line.to_string(),
                        },
                    });
                }
            }
        }

        if choices.is_empty() {
            return None;
        }

        let (correct, explanation) = match rest
            .iter()
            .find_map(|l| self.grammar.strip_answer_marker(l))
        {
            Some(after_marker) => match self.find_answer_letter(after_marker) {
                Some((letter, index, tail)) => {
                    let correct = if index < choices.len() {
                        CorrectAnswer::Known(index)
                    } else {
                        warnings.push(ParseWarning {
                            item,
                            kind: ParseWarningKind::AnswerOutOfRange {
                                letter,
                                choices: choices.len(),
                            },
                        });
                        CorrectAnswer::Unknown
                    };
                    (correct, trim_separators(tail))
                }
                None => {
                    warnings.push(ParseWarning {
                        item,
                        kind: ParseWarningKind::UnknownAnswer,
                    });
                    (CorrectAnswer::Unknown, trim_separators(after_marker))
                }
            },
            None => {
                warnings.push(ParseWarning {
                    item,
                    kind: ParseWarningKind::UnknownAnswer,
                });
                (CorrectAnswer::Unknown, String::new())
            }
        };

        Some(QuestionRecord {
            question: question.to_string(),
            choices,
            correct,
            explanation,
        })
    }

    /// Find the first alphabet letter that stands alone (not part of a word)
    /// and return it with its index and the text after it.
    fn find_answer_letter<'a>(&self, text: &'a str) -> Option<(char, usize, &'a str)> {
        let mut chars = text.char_indices().peekable();
        let mut prev_is_word = false;

        while let Some((at, c)) = chars.next() {
            let next_is_word = chars.peek().is_some_and(|(_, n)| n.is_alphanumeric());
            if c.is_alphabetic() && !prev_is_word && !next_is_word {
                if let Some(index) = self.grammar.letter_index(c) {
                    return Some((c, index, &text[at + c.len_utf8()..]));
                }
            }
            prev_is_word = c.is_alphanumeric();
        }
        None
    }
}

fn trim_separators(s: &str) -> String {
    s.trim_start_matches(|c: char| {
        c.is_whitespace() || matches!(c, ':' | '-' | '–' | '—' | ')' | '.' | ',')
    })
    .trim_end()
    .to_string()
}

/// A quality warning about an already parsed quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// 1-based question number (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Check a parsed quiz for issues that make it awkward to take.
pub fn validate_quiz(quiz: &QuizSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for (i, q) in quiz.iter().enumerate() {
        let number = Some(i + 1);

        if q.choices.len() < 2 {
            warnings.push(ValidationWarning {
                question: number,
                message: format!("only {} choice(s)", q.choices.len()),
            });
        }

        let mut seen = std::collections::HashSet::new();
        for choice in &q.choices {
            if !seen.insert(choice.to_lowercase()) {
                warnings.push(ValidationWarning {
                    question: number,
                    message: format!("duplicate choice: {choice}"),
                });
            }
        }

        if !q.correct.is_known() {
            warnings.push(ValidationWarning {
                question: number,
                message: "correct answer unknown, question cannot be scored".into(),
            });
        }

        if q.explanation.is_empty() {
            warnings.push(ValidationWarning {
                question: number,
                message: "no explanation, hint will be empty".into(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRENCH_QUIZ: &str = "Voici le quiz demandé :

1. [Document: cours.pdf] - Qu'est-ce qu'un hyperviseur ?
   A) Un système de fichiers
   B) Un logiciel qui gère des machines virtuelles
   C) Un protocole réseau
   D) Un type de processeur
   Réponse correcte : B

2. [Document: cours.pdf] - Quel hyperviseur est de type 1 ?
   A) VirtualBox
   B) VMware Workstation
   C) Xen
   D) QEMU en mode utilisateur
   Réponse correcte : C - Xen s'exécute directement sur le matériel
";

    #[test]
    fn parse_documented_example() {
        let quiz = parse("1. What is X?\nA) foo\nB) bar\nCorrect answer: B - because").unwrap();
        assert_eq!(quiz.len(), 1);
        assert_eq!(quiz[0].question, "What is X?");
        assert_eq!(quiz[0].choices, vec!["foo", "bar"]);
        assert_eq!(quiz[0].correct, CorrectAnswer::Known(1));
        assert_eq!(quiz[0].explanation, "because");
    }

    #[test]
    fn parse_generated_french_quiz() {
        let quiz = parse(FRENCH_QUIZ).unwrap();
        assert_eq!(quiz.len(), 2);
        assert_eq!(quiz[0].choices.len(), 4);
        assert_eq!(quiz[0].correct, CorrectAnswer::Known(1));
        assert_eq!(quiz[0].explanation, "");
        assert_eq!(quiz[1].correct, CorrectAnswer::Known(2));
        assert_eq!(
            quiz[1].explanation,
            "Xen s'exécute directement sur le matériel"
        );
    }

    #[test]
    fn item_count_matches_numbered_items() {
        let mut text = String::from("Intro line\n");
        for i in 1..=7 {
            text.push_str(&format!(
                "{i}. Question {i}?\nA) yes\nB) no\nCorrect answer: A\n\n"
            ));
        }
        let quiz = parse(&text).unwrap();
        assert_eq!(quiz.len(), 7);
        for (i, q) in quiz.iter().enumerate() {
            assert_eq!(q.question, format!("Question {}?", i + 1));
        }
    }

    #[test]
    fn parsing_is_deterministic() {
        assert_eq!(parse(FRENCH_QUIZ).unwrap(), parse(FRENCH_QUIZ).unwrap());
    }

    #[test]
    fn no_numbered_items_is_an_error() {
        assert_eq!(parse("Sorry, I cannot help."), Err(ParseError::NoContent));
        assert_eq!(parse(""), Err(ParseError::NoContent));
    }

    #[test]
    fn missing_answer_line_degrades_one_record() {
        let text = "1. First?\nA) x\nB) y\n2. Second?\nA) x\nB) y\nCorrect answer: A";
        let outcome = QuizParser::new(Grammar::default())
            .unwrap()
            .parse_with_diagnostics(text)
            .unwrap();
        let quiz = &outcome.quiz;
        assert_eq!(quiz.len(), 2);
        assert_eq!(quiz[0].choices, vec!["x", "y"]);
        assert_eq!(quiz[0].correct, CorrectAnswer::Unknown);
        assert_eq!(quiz[0].explanation, "");
        assert_eq!(quiz[1].correct, CorrectAnswer::Known(0));
        assert_eq!(
            outcome.warnings,
            vec![ParseWarning {
                item: 1,
                kind: ParseWarningKind::UnknownAnswer
            }]
        );
    }

    #[test]
    fn answer_line_without_letter() {
        let quiz = parse("1. Q?\nA) x\nB) y\nCorrect answer: none of them").unwrap();
        assert_eq!(quiz[0].correct, CorrectAnswer::Unknown);
        assert_eq!(quiz[0].explanation, "none of them");
    }

    #[test]
    fn marker_word_letters_are_not_the_answer() {
        // "Correct" starts with C; the letter must stand alone after the marker.
        let quiz = parse("1. Q?\nA) x\nB) y\nC) z\nCORRECT ANSWER : a) x is right").unwrap();
        assert_eq!(quiz[0].correct, CorrectAnswer::Known(0));
        assert_eq!(quiz[0].explanation, "x is right");
    }

    #[test]
    fn answer_past_choices_is_unknown() {
        let outcome = QuizParser::new(Grammar::default())
            .unwrap()
            .parse_with_diagnostics("1. Q?\nA) x\nB) y\nCorrect answer: D")
            .unwrap();
        assert_eq!(outcome.quiz[0].correct, CorrectAnswer::Unknown);
        assert!(matches!(
            outcome.warnings[0].kind,
            ParseWarningKind::AnswerOutOfRange {
                letter: 'D',
                choices: 2
            }
        ));
    }

    #[test]
    fn letters_outside_alphabet_are_ignored_and_flagged() {
        let outcome = QuizParser::new(Grammar::default())
            .unwrap()
            .parse_with_diagnostics("1. Q?\nA) a\nB) b\nC) c\nD) d\nE) e\nCorrect answer: B")
            .unwrap();
        assert_eq!(outcome.quiz[0].choices, vec!["a", "b", "c", "d"]);
        assert_eq!(
            outcome.warnings[0].kind,
            ParseWarningKind::IgnoredChoiceLine {
                line: "E) e".into()
            }
        );
    }

    #[test]
    fn choices_keep_encounter_order() {
        let quiz = parse("1. Q?\nB) second letter first\nA) first letter second\nCorrect answer: A")
            .unwrap();
        assert_eq!(
            quiz[0].choices,
            vec!["second letter first", "first letter second"]
        );
        // The answer letter maps through the fixed table, not through encounter order.
        assert_eq!(quiz[0].correct, CorrectAnswer::Known(0));
    }

    #[test]
    fn tolerates_irregular_whitespace() {
        let text = "\n\n   1.   Spaced question?   \n\n\t a)   one  \n\n  b)two\n   correct answer :   b   \n";
        let quiz = parse(text).unwrap();
        assert_eq!(quiz[0].question, "Spaced question?");
        assert_eq!(quiz[0].choices, vec!["one", "two"]);
        assert_eq!(quiz[0].correct, CorrectAnswer::Known(1));
    }

    #[test]
    fn items_without_choices_are_dropped() {
        let outcome = QuizParser::new(Grammar::default())
            .unwrap()
            .parse_with_diagnostics("1. Just a heading\n2. Q?\nA) x\nCorrect answer: A")
            .unwrap();
        assert_eq!(outcome.quiz.len(), 1);
        assert_eq!(outcome.quiz[0].question, "Q?");
        assert!(outcome
            .warnings
            .iter()
            .any(|w| w.item == 1 && w.kind == ParseWarningKind::DroppedNoChoices));

        assert_eq!(
            parse("1. nothing\n2. here either"),
            Err(ParseError::NoValidQuestions { blocks: 2 })
        );
    }

    #[test]
    fn custom_grammar() {
        let grammar = Grammar {
            choice_letters: "VWXYZ".into(),
            choice_delimiter: ':',
            answer_markers: vec!["Lösung".into()],
            ..Grammar::default()
        };
        let parser = QuizParser::new(grammar).unwrap();
        let quiz = parser
            .parse("1. Frage?\nV: eins\nW: zwei\nX: drei\nLÖSUNG: X, weil drei")
            .unwrap();
        assert_eq!(quiz[0].choices, vec!["eins", "zwei", "drei"]);
        assert_eq!(quiz[0].correct, CorrectAnswer::Known(2));
        assert_eq!(quiz[0].explanation, "weil drei");
    }

    #[test]
    fn invalid_item_pattern_is_rejected() {
        let grammar = Grammar {
            item_pattern: "(unclosed".into(),
            ..Grammar::default()
        };
        assert!(matches!(
            QuizParser::new(grammar),
            Err(GrammarError::InvalidItemPattern(_))
        ));
    }

    #[test]
    fn validate_flags_quality_issues() {
        let quiz = parse("1. Q?\nA) same\nB) Same\n2. R?\nA) only\nCorrect answer: A - ok").unwrap();
        let warnings = validate_quiz(&quiz);
        assert!(warnings
            .iter()
            .any(|w| w.question == Some(1) && w.message.contains("duplicate")));
        assert!(warnings
            .iter()
            .any(|w| w.question == Some(1) && w.message.contains("unknown")));
        assert!(warnings
            .iter()
            .any(|w| w.question == Some(2) && w.message.contains("only 1")));
        assert!(!warnings
            .iter()
            .any(|w| w.question == Some(2) && w.message.contains("explanation")));
    }

    #[test]
    fn parse_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.txt");
        std::fs::write(&path, FRENCH_QUIZ).unwrap();

        let parser = QuizParser::new(Grammar::default()).unwrap();
        let outcome = parse_quiz_file(&parser, &path).unwrap();
        assert_eq!(outcome.quiz.len(), 2);

        let err = parse_quiz_file(&parser, &dir.path().join("missing.txt")).unwrap_err();
        assert!(format!("{err:#}").contains("missing.txt"));
    }
}
