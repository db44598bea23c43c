//! Core data model types for quizclock.
//!
//! Questions are shaped after the Open Trivia DB payload so that a fetched
//! response deserializes directly into these types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of questions requested for every session.
pub const QUESTION_COUNT: usize = 15;

/// Countdown length of a session in seconds (30 minutes).
pub const QUIZ_DURATION_SECS: u32 = 30 * 60;

/// A single multiple-choice question. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Category label (e.g. "Science: Computers").
    pub category: String,
    /// Question kind.
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    /// Difficulty label.
    pub difficulty: Difficulty,
    /// Question text. May contain HTML entities.
    pub question: String,
    /// The correct answer, compared verbatim when scoring.
    pub correct_answer: String,
    /// The wrong answers (at least one).
    pub incorrect_answers: Vec<String>,
}

impl Question {
    /// All answers in source order: incorrect ones first, then the correct one.
    pub fn all_answers(&self) -> Vec<String> {
        let mut answers = self.incorrect_answers.clone();
        answers.push(self.correct_answer.clone());
        answers
    }
}

/// Question kind as reported by the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Multiple,
    Boolean,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::Multiple => write!(f, "multiple"),
            QuestionKind::Boolean => write!(f, "boolean"),
        }
    }
}

/// Difficulty levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// The payload returned by the question source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionPayload {
    /// Source status; 0 means success.
    pub response_code: u8,
    /// Questions in presentation order.
    #[serde(default)]
    pub results: Vec<Question>,
}

impl QuestionPayload {
    /// Wrap questions in a successful payload.
    pub fn ok(results: Vec<Question>) -> Self {
        Self {
            response_code: 0,
            results,
        }
    }
}
