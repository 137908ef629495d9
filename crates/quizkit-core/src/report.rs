//! Attempt reports with JSON persistence and markdown rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::score::QuizResult;

/// A finished quiz attempt, as written to disk for later review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the attempt finished.
    pub created_at: DateTime<Utc>,
    /// Where the quiz text came from (usually a file name).
    pub source: String,
    /// Score and per-question review.
    pub result: QuizResult,
    /// Wall-clock time spent on the attempt in milliseconds.
    pub duration_ms: u64,
}

impl AttemptReport {
    pub fn new(source: impl Into<String>, result: QuizResult, duration_ms: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            source: source.into(),
            result,
            duration_ms,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AttemptReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        let result = &self.result;

        md.push_str(&format!("## Quiz results: {}\n\n", self.source));
        md.push_str(&format!(
            "**Score:** {} / {} ({:.1}%)\n\n",
            result.correct_count,
            result.total,
            result.percentage()
        ));

        md.push_str("| # | Question | Your answer | Correct answer | |\n");
        md.push_str("|---|----------|-------------|----------------|---|\n");
        for r in &result.review {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                r.number,
                escape_cell(&r.question),
                r.chosen.as_deref().map_or("_unanswered_".to_string(), escape_cell),
                r.correct_answer.as_deref().map_or(String::new(), escape_cell),
                if r.is_correct { "ok" } else { "wrong" }
            ));
        }

        md
    }
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::QuestionReview;

    fn make_report() -> AttemptReport {
        AttemptReport {
            id: Uuid::nil(),
            created_at: Utc::now(),
            source: "virtualisation.txt".into(),
            result: QuizResult {
                correct_count: 1,
                total: 2,
                review: vec![
                    QuestionReview {
                        number: 1,
                        question: "What is a hypervisor?".into(),
                        is_correct: true,
                        chosen: Some("VM manager".into()),
                        correct_answer: None,
                    },
                    QuestionReview {
                        number: 2,
                        question: "Pick a | pipe".into(),
                        is_correct: false,
                        chosen: None,
                        correct_answer: Some("Xen".into()),
                    },
                ],
            },
            duration_ms: 1200,
        }
    }

    #[test]
    fn json_save_and_load() {
        let report = make_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("attempt.json");

        report.save_json(&path).unwrap();
        let loaded = AttemptReport::load_json(&path).unwrap();

        assert_eq!(loaded.source, "virtualisation.txt");
        assert_eq!(loaded.result, report.result);
    }

    #[test]
    fn load_missing_file_fails_with_path() {
        let err = AttemptReport::load_json(Path::new("does-not-exist.json")).unwrap_err();
        assert!(format!("{err:#}").contains("does-not-exist.json"));
    }

    #[test]
    fn markdown_output() {
        let md = make_report().to_markdown();
        assert!(md.contains("**Score:** 1 / 2 (50.0%)"));
        assert!(md.contains("_unanswered_"));
        assert!(md.contains("Pick a \\| pipe"));
        assert!(md.contains("| Xen |"));
    }
}
