//! Question source backed by a local JSON file.
//!
//! Accepts either the full payload written by `quizclock fetch`
//! (`{"response_code": 0, "results": [...]}`) or a bare array of questions.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use quizclock_core::model::{Question, QuestionPayload};
use quizclock_core::traits::QuestionSource;

use crate::error::SourceError;

/// Serves questions from a file, read fresh on every fetch.
pub struct FileSource {
    path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuestionFile {
    Payload(QuestionPayload),
    Bare(Vec<Question>),
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<Question>, SourceError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| SourceError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        match serde_json::from_str::<QuestionFile>(&content)
            .map_err(|e| SourceError::Parse(format!("{}: {e}", self.path.display())))?
        {
            QuestionFile::Payload(payload) => {
                if let Some(err) = SourceError::from_response_code(payload.response_code) {
                    return Err(err);
                }
                Ok(payload.results)
            }
            QuestionFile::Bare(questions) => Ok(questions),
        }
    }
}

#[async_trait]
impl QuestionSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self, count: usize) -> anyhow::Result<Vec<Question>> {
        let mut questions = self.load()?;
        questions.truncate(count);
        tracing::debug!(path = %self.path.display(), loaded = questions.len(), "questions loaded");
        Ok(questions)
    }
}
