//! The quiz session aggregate and its transition rules.
//!
//! A [`Session`] is mutated only through [`Session::apply`]. Every event is
//! validated before anything is written, so a rejected event leaves the
//! session exactly as it was. The phase is derived from the fields on every
//! read rather than stored, which keeps `complete` and `time_remaining` from
//! drifting apart.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::model::{Question, QUIZ_DURATION_SECS};
use crate::participant::validate_participant;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No participant yet.
    NotStarted,
    /// Questions loaded, clock running.
    InProgress,
    /// Submitted or out of time. Only a retry is accepted.
    Terminal,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::NotStarted => write!(f, "not started"),
            Phase::InProgress => write!(f, "in progress"),
            Phase::Terminal => write!(f, "finished"),
        }
    }
}

/// Direction for single-step navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Everything that can happen to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Begin the quiz for a participant with the fetched questions.
    Start {
        participant_id: String,
        questions: Vec<Question>,
    },
    /// Record an answer for the current question.
    SelectAnswer(String),
    /// Jump to a specific question.
    GoTo(usize),
    /// Move one question forward or back, clamped at the ends.
    Step(Direction),
    /// One second elapsed.
    Tick,
    /// Finish the quiz now.
    Submit,
    /// Throw the session away and start over.
    Retry,
}

impl SessionEvent {
    fn name(&self) -> &'static str {
        match self {
            SessionEvent::Start { .. } => "start",
            SessionEvent::SelectAnswer(_) => "select an answer",
            SessionEvent::GoTo(_) => "go to a question",
            SessionEvent::Step(_) => "step",
            SessionEvent::Tick => "tick",
            SessionEvent::Submit => "submit",
            SessionEvent::Retry => "retry",
        }
    }
}

/// The mutable state of one quiz attempt.
///
/// Serializable for snapshots only. A session is never rebuilt from data;
/// every state comes from [`Session::new`] plus applied events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    questions: Vec<Question>,
    current_index: usize,
    answers: BTreeMap<usize, String>,
    visited: BTreeSet<usize>,
    time_remaining: u32,
    participant_id: String,
    complete: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A fresh session in its initial form.
    pub fn new() -> Self {
        Self {
            questions: Vec::new(),
            current_index: 0,
            answers: BTreeMap::new(),
            visited: BTreeSet::from([0]),
            time_remaining: QUIZ_DURATION_SECS,
            participant_id: String::new(),
            complete: false,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The question currently displayed, if any are loaded.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn answers(&self) -> &BTreeMap<usize, String> {
        &self.answers
    }

    /// The recorded answer for question `index`.
    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    pub fn visited(&self) -> &BTreeSet<usize> {
        &self.visited
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn participant_id(&self) -> &str {
        &self.participant_id
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Derived lifecycle phase.
    pub fn phase(&self) -> Phase {
        if self.participant_id.is_empty() {
            Phase::NotStarted
        } else if self.complete || self.time_remaining == 0 {
            Phase::Terminal
        } else {
            Phase::InProgress
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.phase() == Phase::Terminal
    }

    /// Whether the countdown should be running.
    ///
    /// Gated on participant and completion only; a session that ran out of
    /// time is terminal through `phase`, and ticking it further is refused.
    pub fn countdown_active(&self) -> bool {
        !self.participant_id.is_empty() && !self.complete
    }

    /// Apply one event. On error the session is left untouched.
    pub fn apply(&mut self, event: SessionEvent) -> Result<(), SessionError> {
        let phase = self.phase();
        let name = event.name();

        match event {
            SessionEvent::Retry => {
                tracing::debug!(from = %phase, "session reset");
                *self = Session::new();
            }
            SessionEvent::Start {
                participant_id,
                questions,
            } => {
                self.require(Phase::NotStarted, name)?;
                validate_participant(&participant_id)?;
                if questions.is_empty() {
                    return Err(SessionError::NoQuestions);
                }
                tracing::debug!(questions = questions.len(), "session started");
                self.participant_id = participant_id;
                self.questions = questions;
            }
            SessionEvent::SelectAnswer(choice) => {
                self.require(Phase::InProgress, name)?;
                self.answers.insert(self.current_index, choice);
            }
            SessionEvent::GoTo(index) => {
                self.require(Phase::InProgress, name)?;
                self.go_to(index)?;
            }
            SessionEvent::Step(direction) => {
                self.require(Phase::InProgress, name)?;
                let last = self.questions.len().saturating_sub(1);
                let target = match direction {
                    Direction::Forward => (self.current_index + 1).min(last),
                    Direction::Backward => self.current_index.saturating_sub(1),
                };
                self.go_to(target)?;
            }
            SessionEvent::Tick => {
                self.require(Phase::InProgress, name)?;
                self.time_remaining = self.time_remaining.saturating_sub(1);
                if self.time_remaining == 0 {
                    tracing::debug!("time is up");
                }
            }
            SessionEvent::Submit => {
                self.require(Phase::InProgress, name)?;
                self.complete = true;
                tracing::debug!(answered = self.answers.len(), "session submitted");
            }
        }

        Ok(())
    }

    fn require(&self, expected: Phase, event: &'static str) -> Result<(), SessionError> {
        let phase = self.phase();
        if phase == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition { event, phase })
        }
    }

    fn go_to(&mut self, index: usize) -> Result<(), SessionError> {
        let len = self.questions.len();
        if index >= len {
            return Err(SessionError::IndexOutOfRange { index, len });
        }
        self.current_index = index;
        self.visited.insert(index);
        Ok(())
    }
}
