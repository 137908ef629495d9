//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use quizkit_core::report::AttemptReport;
use quizkit_core::score::QuestionReview;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML page from an attempt report.
pub fn generate_html(report: &AttemptReport) -> String {
    let result = &report.result;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>quizkit results: {}</title>\n",
        html_escape(&report.source)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<header>\n");
    html.push_str("<h1>Quiz results</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Source: <strong>{}</strong> | {} questions | {}</p>\n",
        html_escape(&report.source),
        result.total,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    html.push_str("<section class=\"score\">\n");
    html.push_str(&format!(
        "<p class=\"total\">Score: <strong>{}</strong> / {}</p>\n",
        result.correct_count, result.total
    ));
    html.push_str(&score_bar(result.percentage()));
    html.push_str("</section>\n");

    html.push_str("<section class=\"review\">\n");
    html.push_str("<h2>Review</h2>\n");
    for r in &result.review {
        html.push_str(&review_card(r));
    }
    html.push_str("</section>\n");

    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &AttemptReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn review_card(r: &QuestionReview) -> String {
    let class = if r.is_correct { "pass" } else { "fail" };
    let mark = if r.is_correct { "correct" } else { "wrong" };

    let mut card = format!("<div class=\"card {class}\">\n");
    card.push_str(&format!(
        "<p class=\"question\">{}. {}</p>\n",
        r.number,
        html_escape(&r.question)
    ));
    let chosen = match &r.chosen {
        Some(text) => html_escape(text),
        None => "<em>Not answered</em>".to_string(),
    };
    card.push_str(&format!(
        "<p>Your answer: <span class=\"{class}-text\">{chosen}</span> ({mark})</p>\n"
    ));
    if let Some(correct) = &r.correct_answer {
        card.push_str(&format!(
            "<p class=\"pass-text\">Correct answer: {}</p>\n",
            html_escape(correct)
        ));
    }
    card.push_str("</div>\n");
    card
}

fn score_bar(percentage: f64) -> String {
    let max_width = 400.0;
    let width = (percentage / 100.0 * max_width).clamp(0.0, max_width);
    let color = if percentage >= 80.0 {
        "#22c55e"
    } else if percentage >= 50.0 {
        "#eab308"
    } else {
        "#ef4444"
    };

    format!(
        "<svg width=\"480\" height=\"30\" xmlns=\"http://www.w3.org/2000/svg\">\n  \
         <rect x=\"0\" y=\"0\" width=\"{max_width}\" height=\"30\" fill=\"#e5e7eb\" rx=\"4\"/>\n  \
         <rect x=\"0\" y=\"0\" width=\"{width:.0}\" height=\"30\" fill=\"{color}\" rx=\"4\"/>\n  \
         <text x=\"{}\" y=\"15\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{percentage:.1}%</text>\n\
         </svg>\n",
        max_width + 8.0
    )
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; --pass-fg: #15803d; --fail-fg: #b91c1c; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; --pass-fg: #86efac; --fail-fg: #fca5a5; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); max-width: 48rem; }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.total { font-size: 1.25rem; }
.card { border: 1px solid var(--border); border-radius: 12px; padding: 1rem; margin: 1rem 0; }
.card.pass { background: var(--pass); }
.card.fail { background: var(--fail); }
.question { font-weight: 600; }
.pass-text { color: var(--pass-fg); }
.fail-text { color: var(--fail-fg); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use quizkit_core::score::QuizResult;

    fn make_test_report() -> AttemptReport {
        AttemptReport {
            id: uuid::Uuid::nil(),
            created_at: chrono::Utc::now(),
            source: "cours.txt".into(),
            result: QuizResult {
                correct_count: 1,
                total: 2,
                review: vec![
                    QuestionReview {
                        number: 1,
                        question: "Is <b> escaped?".into(),
                        is_correct: true,
                        chosen: Some("Yes & no".into()),
                        correct_answer: None,
                    },
                    QuestionReview {
                        number: 2,
                        question: "Quel hyperviseur est de type 1 ?".into(),
                        is_correct: false,
                        chosen: None,
                        correct_answer: Some("Xen".into()),
                    },
                ],
            },
            duration_ms: 5000,
        }
    }

    #[test]
    fn html_report_contains_required_elements() {
        let html = generate_html(&make_test_report());

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("cours.txt"));
        assert!(html.contains("Score: <strong>1</strong> / 2"));
        assert!(html.contains("50.0%"));
        assert!(html.contains("Correct answer: Xen"));
        assert!(html.contains("Not answered"));
    }

    #[test]
    fn html_escapes_user_text() {
        let html = generate_html(&make_test_report());
        assert!(html.contains("Is &lt;b&gt; escaped?"));
        assert!(html.contains("Yes &amp; no"));
        assert!(!html.contains("Is <b> escaped?"));
    }

    #[test]
    fn correct_answers_do_not_repeat_the_answer() {
        let card = review_card(&make_test_report().result.review[0]);
        assert!(card.contains("class=\"card pass\""));
        assert!(!card.contains("Correct answer"));
    }

    #[test]
    fn html_report_write_to_file() {
        let report = make_test_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("attempt.html");

        write_html_report(&report, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
