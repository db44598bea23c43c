//! Mock question source for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use quizclock_core::model::{Difficulty, Question, QuestionKind};
use quizclock_core::traits::QuestionSource;

use crate::error::SourceError;

/// A source that serves a fixed question list, or fails on demand.
pub struct MockSource {
    questions: Vec<Question>,
    fail: bool,
    call_count: AtomicU32,
    last_count: Mutex<Option<usize>>,
}

impl MockSource {
    /// Serve exactly these questions.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            fail: false,
            call_count: AtomicU32::new(0),
            last_count: Mutex::new(None),
        }
    }

    /// Serve `n` generated questions whose correct answer is `"Answer {i}"`.
    pub fn with_generated(n: usize) -> Self {
        Self::new((0..n).map(sample_question).collect())
    }

    /// Fail every fetch with a network error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    /// Number of fetches made.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// The count argument of the most recent fetch.
    pub fn last_count(&self) -> Option<usize> {
        *self.last_count.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// A deterministic multiple-choice question.
pub fn sample_question(i: usize) -> Question {
    Question {
        category: "General Knowledge".into(),
        kind: QuestionKind::Multiple,
        difficulty: Difficulty::Easy,
        question: format!("Which is answer number {i}?"),
        correct_answer: format!("Answer {i}"),
        incorrect_answers: vec![
            format!("Wrong {i}a"),
            format!("Wrong {i}b"),
            format!("Wrong {i}c"),
        ],
    }
}

#[async_trait]
impl QuestionSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, count: usize) -> anyhow::Result<Vec<Question>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_count.lock().unwrap_or_else(|e| e.into_inner()) = Some(count);

        if self.fail {
            return Err(SourceError::NetworkError("mock source is offline".into()).into());
        }
        Ok(self.questions.iter().take(count).cloned().collect())
    }
}
