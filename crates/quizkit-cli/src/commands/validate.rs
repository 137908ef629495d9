//! The `quizkit validate` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizkit_core::parser::validate_quiz;
use quizkit_core::{Grammar, QuizSet};

pub fn execute(input: PathBuf, json: bool, config_path: Option<PathBuf>) -> Result<()> {
    let (config, outcome) = super::load_quiz(&input, config_path.as_deref())?;
    let quiz = &outcome.quiz;

    if json {
        println!("{}", serde_json::to_string_pretty(quiz)?);
        return Ok(());
    }

    println!("Quiz: {} ({} questions)", input.display(), quiz.len());
    println!("{}", question_table(quiz, &config.grammar));

    let unscorable = quiz.unknown_answer_count();
    if unscorable > 0 {
        println!("{unscorable} question(s) have no known answer and cannot be scored");
    }

    for w in &outcome.warnings {
        println!("  WARNING: {w}");
    }

    let warnings = validate_quiz(quiz);
    for w in &warnings {
        let prefix = w
            .question
            .map(|n| format!("  [question {n}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    let total = outcome.warnings.len() + warnings.len();
    if total == 0 {
        println!("All questions valid.");
    } else {
        println!("\n{total} warning(s) found.");
    }

    Ok(())
}

fn question_table(quiz: &QuizSet, grammar: &Grammar) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Choices", "Answer"]);

    for (i, q) in quiz.iter().enumerate() {
        let answer = q
            .correct
            .index()
            .and_then(|idx| grammar.index_letter(idx))
            .map_or_else(|| "?".to_string(), |c| c.to_string());
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&q.question),
            Cell::new(q.choices.len()),
            Cell::new(answer),
        ]);
    }

    table
}
