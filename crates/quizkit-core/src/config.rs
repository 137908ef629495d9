//! quizkit configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::grammar::Grammar;

/// Top-level quizkit configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizkitConfig {
    /// Marker grammar for the quiz text.
    #[serde(default)]
    pub grammar: Grammar,
    /// Default output directory for attempt reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Default report formats written after an attempt.
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./quizkit-results")
}

fn default_formats() -> Vec<String> {
    vec!["json".to_string()]
}

impl Default for QuizkitConfig {
    fn default() -> Self {
        Self {
            grammar: Grammar::default(),
            output_dir: default_output_dir(),
            formats: default_formats(),
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizkit.toml` in the current directory
/// 2. `~/.config/quizkit/config.toml`
///
/// Environment variable overrides: `QUIZKIT_ANSWER_MARKER`, `QUIZKIT_CHOICE_LETTERS`.
pub fn load_config() -> Result<QuizkitConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizkitConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("quizkit.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|dir| dir.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizkitConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizkitConfig::default(),
    };

    apply_env_overrides(
        &mut config,
        std::env::var("QUIZKIT_ANSWER_MARKER").ok(),
        std::env::var("QUIZKIT_CHOICE_LETTERS").ok(),
    );

    Ok(config)
}

fn apply_env_overrides(
    config: &mut QuizkitConfig,
    answer_marker: Option<String>,
    choice_letters: Option<String>,
) {
    if let Some(marker) = answer_marker.filter(|m| !m.trim().is_empty()) {
        config.grammar.answer_markers.insert(0, marker);
    }
    if let Some(letters) = choice_letters.filter(|l| !l.trim().is_empty()) {
        config.grammar.choice_letters = letters.trim().to_string();
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizkit"))
}
