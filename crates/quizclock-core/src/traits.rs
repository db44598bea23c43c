//! Trait definitions for question sources.
//!
//! Implemented by the `quizclock-providers` crate.

use async_trait::async_trait;

use crate::model::Question;

/// A supplier of quiz questions.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Human-readable source name (e.g. "opentdb").
    fn name(&self) -> &str;

    /// Fetch up to `count` questions in presentation order.
    async fn fetch(&self, count: usize) -> anyhow::Result<Vec<Question>>;
}
