//! The `quizkit take` command.
//!
//! Drives a `QuizSession` from line-based input: a choice letter selects,
//! `next` records and moves on, `hint` toggles the explanation, `back`
//! returns to the previous question, `quit` discards the attempt.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizkit_core::report::AttemptReport;
use quizkit_core::{Advance, Grammar, QuizResult, QuizSession};
use quizkit_report::write_html_report;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Select(usize),
    Next,
    Hint,
    Back,
    Quit,
    Help,
    Empty,
    Unknown(String),
}

impl Command {
    fn parse(line: &str, grammar: &Grammar) -> Self {
        let input = line.trim();
        match input.to_lowercase().as_str() {
            "" => return Command::Empty,
            "next" => return Command::Next,
            "hint" => return Command::Hint,
            "back" => return Command::Back,
            "quit" | "exit" => return Command::Quit,
            "help" => return Command::Help,
            _ => {}
        }

        let mut chars = input.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            // Choice letters win over the one-character shortcuts.
            if let Some(index) = grammar.letter_index(c) {
                return Command::Select(index);
            }
            match c {
                'n' | 'N' => return Command::Next,
                '?' => return Command::Hint,
                '<' => return Command::Back,
                'q' | 'Q' => return Command::Quit,
                _ => {}
            }
        }

        match input.parse::<usize>() {
            Ok(n) if n >= 1 => Command::Select(n - 1),
            _ => Command::Unknown(input.to_string()),
        }
    }
}

pub fn execute(
    input: PathBuf,
    output: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (config, outcome) = super::load_quiz(&input, config_path.as_deref())?;
    let session = QuizSession::new(Arc::new(outcome.quiz));

    let started = Instant::now();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let Some(result) = run_session(session, &config.grammar, stdin.lock(), &mut out)? else {
        writeln!(out, "Quiz closed before completion.")?;
        return Ok(());
    };
    tracing::info!(
        correct = result.correct_count,
        total = result.total,
        "quiz attempt finished"
    );
    print_result(&result, &mut out)?;

    let dir = output.unwrap_or_else(|| config.output_dir.clone());
    let source = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    let report = AttemptReport::new(source, result, started.elapsed().as_millis() as u64);
    let formats = match format {
        Some(f) => f.split(',').map(|s| s.trim().to_string()).collect(),
        None => config.formats.clone(),
    };
    write_reports(&report, &dir, &formats)?;

    Ok(())
}

/// Run a session to completion. Returns `None` if it was discarded.
fn run_session<R: BufRead, W: Write>(
    mut session: QuizSession,
    grammar: &Grammar,
    mut input: R,
    out: &mut W,
) -> Result<Option<QuizResult>> {
    let mut line = String::new();

    loop {
        render(&session, grammar, out)?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            session.close();
            return Ok(None);
        }

        let outcome = match Command::parse(&line, grammar) {
            Command::Select(index) => session.select_choice(index),
            Command::Next => match session.advance() {
                Ok(Advance::Finished) => {
                    let result = session.result();
                    session.close();
                    return Ok(result);
                }
                Ok(Advance::Next(_)) => Ok(()),
                Err(e) => Err(e),
            },
            Command::Hint => session.toggle_hint().map(|_| ()),
            Command::Back => session.go_back().map(|_| ()),
            Command::Quit => {
                session.close();
                return Ok(None);
            }
            Command::Help | Command::Empty => {
                writeln!(out, "{}", help_text(grammar))?;
                Ok(())
            }
            Command::Unknown(cmd) => {
                writeln!(out, "! unknown command: {cmd}")?;
                writeln!(out, "{}", help_text(grammar))?;
                Ok(())
            }
        };

        if let Err(e) = outcome {
            writeln!(out, "! {e}")?;
        }
    }
}

fn render<W: Write>(session: &QuizSession, grammar: &Grammar, out: &mut W) -> Result<()> {
    let Some(view) = session.current_view() else {
        return Ok(());
    };

    writeln!(
        out,
        "\nQuestion {}/{} ({:.0}%)",
        view.number,
        view.total,
        view.progress * 100.0
    )?;
    writeln!(out, "{}", view.question)?;
    for (i, choice) in view.choices.iter().enumerate() {
        let marker = if view.pending == Some(i) { '>' } else { ' ' };
        writeln!(out, "{marker} {}) {choice}", choice_label(grammar, i))?;
    }
    if view.hint_visible {
        match view.visible_hint() {
            Some(hint) => writeln!(out, "Hint: {hint}")?,
            None => writeln!(out, "Hint: (no explanation available)")?,
        }
    }
    let next = if view.is_last() { "finish" } else { "next" };
    write!(out, "[choice, {next} (n), hint (?), back (<), quit (q)] > ")?;
    out.flush()?;
    Ok(())
}

fn choice_label(grammar: &Grammar, index: usize) -> String {
    grammar
        .index_letter(index)
        .map_or_else(|| (index + 1).to_string(), |c| c.to_string())
}

fn help_text(grammar: &Grammar) -> String {
    format!(
        "Commands: a choice letter ({}) or number selects, 'next' records it, \
         'hint' toggles the explanation, 'back' returns, 'quit' discards.",
        grammar.choice_letters
    )
}

fn print_result<W: Write>(result: &QuizResult, out: &mut W) -> Result<()> {
    writeln!(
        out,
        "\nScore: {} / {} ({:.1}%)",
        result.correct_count,
        result.total,
        result.percentage()
    )?;

    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Your answer", "Correct answer", "Result"]);
    for r in &result.review {
        table.add_row(vec![
            Cell::new(r.number),
            Cell::new(&r.question),
            Cell::new(r.chosen.as_deref().unwrap_or("(not answered)")),
            Cell::new(r.correct_answer.as_deref().unwrap_or("")),
            Cell::new(if r.is_correct { "OK" } else { "WRONG" }),
        ]);
    }
    writeln!(out, "{table}")?;
    Ok(())
}

fn write_reports(report: &AttemptReport, dir: &Path, formats: &[String]) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");

    let formats: Vec<&str> = if formats.iter().any(|f| f == "all") {
        vec!["json", "html", "markdown"]
    } else {
        formats.iter().map(String::as_str).collect()
    };

    for fmt in formats {
        match fmt {
            "json" => {
                let path = dir.join(format!("attempt-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "html" => {
                let path = dir.join(format!("attempt-{timestamp}.html"));
                write_html_report(report, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            "markdown" | "md" => {
                let path = dir.join(format!("attempt-{timestamp}.md"));
                std::fs::write(&path, report.to_markdown())?;
                eprintln!("Markdown report: {}", path.display());
            }
            other => {
                eprintln!("Unknown format: {other}");
            }
        }
    }

    Ok(())
}
