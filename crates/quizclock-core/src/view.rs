//! Read-only projections of a session for display.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::model::{Difficulty, Question};
use crate::session::Session;
use crate::text::decode_entities;

/// One selectable answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceView {
    /// Value recorded when this choice is picked.
    pub value: String,
    /// Decoded text for display.
    pub label: String,
    pub selected: bool,
}

/// The active question as it should be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    /// 1-based position.
    pub number: usize,
    pub total: usize,
    /// Decoded question text.
    pub text: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub choices: Vec<ChoiceView>,
}

impl QuestionView {
    /// Build the view for the current question using a precomputed answer order.
    pub fn build(session: &Session, order: &[String]) -> Option<Self> {
        let question = session.current_question()?;
        let current = session.answer(session.current_index());

        let choices = order
            .iter()
            .map(|value| ChoiceView {
                value: value.clone(),
                label: decode_entities(value),
                selected: current == Some(value.as_str()),
            })
            .collect();

        Some(Self {
            number: session.current_index() + 1,
            total: session.questions().len(),
            text: decode_entities(&question.question),
            category: decode_entities(&question.category),
            difficulty: question.difficulty,
            choices,
        })
    }
}

/// Progress state of one cell in the navigation grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStatus {
    Answered,
    Visited,
    Unvisited,
}

/// One cell in the navigation grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavCell {
    pub index: usize,
    pub status: CellStatus,
    pub current: bool,
}

/// Cells for every loaded question. Answered wins over visited.
pub fn navigation_grid(session: &Session) -> Vec<NavCell> {
    (0..session.questions().len())
        .map(|index| {
            let status = if session.answer(index).is_some_and(|a| !a.is_empty()) {
                CellStatus::Answered
            } else if session.visited().contains(&index) {
                CellStatus::Visited
            } else {
                CellStatus::Unvisited
            };
            NavCell {
                index,
                status,
                current: index == session.current_index(),
            }
        })
        .collect()
}

/// Format seconds as `MM:SS`. Minutes keep growing past 99.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// All answers of `question` in a uniformly random order.
pub fn shuffled_choices<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> Vec<String> {
    let mut answers = question.all_answers();
    answers.shuffle(rng);
    answers
}
