//! quizclock-core: Session state machine, countdown, and scoring.
//!
//! This crate defines the quiz data model, the event-driven session
//! aggregate, and everything derived from it: views, scores, and reports.

pub mod controller;
pub mod countdown;
pub mod error;
pub mod model;
pub mod participant;
pub mod report;
pub mod scoring;
pub mod session;
pub mod text;
pub mod traits;
pub mod view;

pub use controller::{ControllerConfig, QuizController};
pub use error::{ParticipantError, SessionError};
pub use model::{Question, QuestionPayload, QUESTION_COUNT, QUIZ_DURATION_SECS};
pub use session::{Direction, Phase, Session, SessionEvent};
pub use traits::QuestionSource;
