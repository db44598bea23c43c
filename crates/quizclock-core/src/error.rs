//! Session error types.
//!
//! A rejected event never mutates the session, so every variant here
//! describes an event that was refused, not a half-applied one.

use thiserror::Error;

use crate::session::Phase;

/// Reasons a participant identifier is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParticipantError {
    /// Nothing was entered.
    #[error("Email is required")]
    Missing,

    /// The input does not look like `name@domain.tld`.
    #[error("Please enter a valid email")]
    Malformed,
}

/// Errors raised when an event cannot be applied to a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The event is not valid in the current phase.
    #[error("cannot {event} while the session is {phase}")]
    InvalidTransition { event: &'static str, phase: Phase },

    /// The participant identifier failed validation.
    #[error(transparent)]
    Participant(#[from] ParticipantError),

    /// Start was attempted with no questions to present.
    #[error("no questions could be loaded")]
    NoQuestions,

    /// Navigation targeted a question that does not exist.
    #[error("question {index} is out of range (0..{len})")]
    IndexOutOfRange { index: usize, len: usize },
}
