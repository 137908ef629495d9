pub mod init;
pub mod review;
pub mod take;
pub mod validate;

use std::path::Path;

use anyhow::Result;
use quizkit_core::parser::{parse_quiz_file, ParseOutcome};
use quizkit_core::{load_config_from, QuizParser, QuizkitConfig};

/// Load config and parse the quiz file with the configured grammar.
pub(crate) fn load_quiz(
    input: &Path,
    config_path: Option<&Path>,
) -> Result<(QuizkitConfig, ParseOutcome)> {
    let config = load_config_from(config_path)?;
    let parser = QuizParser::new(config.grammar.clone())?;
    let outcome = parse_quiz_file(&parser, input)?;
    Ok((config, outcome))
}
