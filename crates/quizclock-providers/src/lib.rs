//! quizclock-providers: Question sources.
//!
//! Implements the `QuestionSource` trait for Open Trivia DB, local JSON
//! files, and an in-memory mock, plus the configuration that selects one.

pub mod config;
pub mod error;
pub mod file;
pub mod mock;
pub mod opentdb;

pub use config::{create_source, load_config, QuizclockConfig, SourceConfig};
pub use error::SourceError;
