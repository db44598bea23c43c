//! Scoring of a finished session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::Question;

/// Number of correct answers out of the questions presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub correct: usize,
    pub total: usize,
}

impl ScoreSummary {
    /// Rounded percentage. An empty quiz scores 0.
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.correct as f64 / self.total as f64 * 100.0).round() as u32
    }
}

/// How a single question turned out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    /// 1-based position in the quiz.
    pub number: usize,
    pub question: String,
    pub category: String,
    /// What the participant chose, if anything.
    pub answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// Exact, case-sensitive comparison against the correct answer.
fn is_correct(question: &Question, answer: Option<&String>) -> bool {
    answer.is_some_and(|a| *a == question.correct_answer)
}

/// Count correct answers. Answers recorded for indices beyond the question
/// list are ignored.
pub fn score(questions: &[Question], answers: &BTreeMap<usize, String>) -> ScoreSummary {
    let correct = questions
        .iter()
        .enumerate()
        .filter(|(i, q)| is_correct(q, answers.get(i)))
        .count();

    ScoreSummary {
        correct,
        total: questions.len(),
    }
}

/// Per-question breakdown in quiz order.
pub fn outcomes(questions: &[Question], answers: &BTreeMap<usize, String>) -> Vec<QuestionOutcome> {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let answer = answers.get(&i);
            QuestionOutcome {
                number: i + 1,
                question: q.question.clone(),
                category: q.category.clone(),
                answer: answer.cloned(),
                correct_answer: q.correct_answer.clone(),
                is_correct: is_correct(q, answer),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::question;

    fn answers(pairs: &[(usize, &str)]) -> BTreeMap<usize, String> {
        pairs.iter().map(|(i, a)| (*i, a.to_string())).collect()
    }

    #[test]
    fn two_of_three() {
        let questions = vec![question("A"), question("B"), question("C")];
        let summary = score(&questions, &answers(&[(0, "A"), (1, "X"), (2, "C")]));
        assert_eq!(summary, ScoreSummary { correct: 2, total: 3 });
        assert_eq!(summary.percentage(), 67);
    }

    #[test]
    fn unanswered_counts_as_wrong() {
        let questions = vec![question("A"), question("B")];
        let summary = score(&questions, &answers(&[(1, "B")]));
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.percentage(), 50);
    }

    #[test]
    fn comparison_is_exact() {
        let questions = vec![question("Paris")];
        assert_eq!(score(&questions, &answers(&[(0, "paris")])).correct, 0);
        assert_eq!(score(&questions, &answers(&[(0, "Paris ")])).correct, 0);
        assert_eq!(score(&questions, &answers(&[(0, "Paris")])).correct, 1);
    }

    #[test]
    fn stray_answers_are_ignored() {
        let questions = vec![question("A")];
        let summary = score(&questions, &answers(&[(0, "A"), (5, "A")]));
        assert_eq!(summary, ScoreSummary { correct: 1, total: 1 });
    }

    #[test]
    fn empty_quiz_scores_zero_percent() {
        let summary = score(&[], &BTreeMap::new());
        assert_eq!(summary, ScoreSummary { correct: 0, total: 0 });
        assert_eq!(summary.percentage(), 0);
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(ScoreSummary { correct: 1, total: 8 }.percentage(), 13);
        assert_eq!(ScoreSummary { correct: 1, total: 3 }.percentage(), 33);
        assert_eq!(ScoreSummary { correct: 15, total: 15 }.percentage(), 100);
    }

    #[test]
    fn outcomes_follow_quiz_order() {
        let questions = vec![question("A"), question("B")];
        let result = outcomes(&questions, &answers(&[(0, "X")]));
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].number, 1);
        assert_eq!(result[0].answer.as_deref(), Some("X"));
        assert!(!result[0].is_correct);
        assert_eq!(result[1].answer, None);
        assert_eq!(result[1].correct_answer, "B");
    }
}
