//! quizkit-report: report generation for finished quiz attempts.
//!
//! JSON and markdown live on `AttemptReport` in `quizkit-core`; this crate
//! adds a self-contained HTML page.

pub mod html;

pub use html::{generate_html, write_html_report};
