//! The `quizclock fetch` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizclock_core::model::{QuestionPayload, QUESTION_COUNT};
use quizclock_core::traits::QuestionSource;
use quizclock_providers::config::{create_source, load_config_from};

pub async fn execute(output: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let source = create_source(&config.source)?;
    tracing::debug!(source = source.name(), "fetching question set");

    let questions = source
        .fetch(QUESTION_COUNT)
        .await
        .with_context(|| format!("failed to fetch questions from {}", source.name()))?;
    let payload = QuestionPayload::ok(questions);
    let json = serde_json::to_string_pretty(&payload)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "Saved {} questions to {}",
                payload.results.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}
