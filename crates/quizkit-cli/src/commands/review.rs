//! The `quizkit review` command.

use std::path::PathBuf;

use anyhow::Result;

use quizkit_core::report::AttemptReport;

pub fn execute(report_path: PathBuf, format: String) -> Result<()> {
    let report = AttemptReport::load_json(&report_path)?;
    let result = &report.result;

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            // text format
            println!(
                "Attempt on {} ({}): {} / {} correct ({:.1}%)",
                report.source,
                report.created_at.format("%Y-%m-%d %H:%M"),
                result.correct_count,
                result.total,
                result.percentage()
            );

            for r in &result.review {
                let mark = if r.is_correct { "OK" } else { "WRONG" };
                println!("\n  {}. {} [{mark}]", r.number, r.question);
                println!(
                    "     Your answer: {}",
                    r.chosen.as_deref().unwrap_or("(not answered)")
                );
                if let Some(correct) = &r.correct_answer {
                    println!("     Correct answer: {correct}");
                }
            }

            let unanswered = result.unanswered_count();
            if unanswered > 0 {
                println!("\n{unanswered} question(s) left unanswered");
            }
        }
    }

    Ok(())
}
