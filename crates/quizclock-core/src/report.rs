//! Quiz report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::QUIZ_DURATION_SECS;
use crate::scoring::{outcomes, score, QuestionOutcome, ScoreSummary};
use crate::session::Session;
use crate::text::decode_entities;

/// The result of one finished session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Participant email.
    pub participant: String,
    pub score: ScoreSummary,
    /// Rounded percentage, 0 for an empty quiz.
    pub percentage: u32,
    /// Whether the clock ran out before submission.
    pub timed_out: bool,
    pub time_remaining_secs: u32,
    pub elapsed_secs: u32,
    /// Per-question breakdown in quiz order.
    pub outcomes: Vec<QuestionOutcome>,
}

impl QuizReport {
    /// Build a report from the current state of a session.
    pub fn from_session(session: &Session) -> Self {
        let summary = score(session.questions(), session.answers());
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            participant: session.participant_id().to_string(),
            score: summary,
            percentage: summary.percentage(),
            timed_out: session.time_remaining() == 0 && !session.is_complete(),
            time_remaining_secs: session.time_remaining(),
            elapsed_secs: QUIZ_DURATION_SECS.saturating_sub(session.time_remaining()),
            outcomes: outcomes(session.questions(), session.answers()),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: QuizReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str("## Quiz Results\n\n");
        md.push_str(&format!("**Email:** {}\n\n", self.participant));
        md.push_str(&format!(
            "**Score:** {}/{} ({}%)",
            self.score.correct, self.score.total, self.percentage
        ));
        if self.timed_out {
            md.push_str(" (time ran out)");
        }
        md.push_str("\n\n");

        if !self.outcomes.is_empty() {
            md.push_str("| # | Question | Your answer | Correct answer | |\n");
            md.push_str("|---|----------|-------------|----------------|---|\n");
            for o in &self.outcomes {
                md.push_str(&format!(
                    "| {} | {} | {} | {} | {} |\n",
                    o.number,
                    md_cell(&o.question),
                    o.answer
                        .as_deref()
                        .map(md_cell)
                        .unwrap_or_else(|| "Not answered".to_string()),
                    md_cell(&o.correct_answer),
                    if o.is_correct { "✓" } else { "✗" },
                ));
            }
        }

        md
    }
}

fn md_cell(s: &str) -> String {
    decode_entities(s).replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::question;
    use crate::session::SessionEvent;

    fn finished() -> Session {
        let mut s = Session::new();
        s.apply(SessionEvent::Start {
            participant_id: "a@b.com".into(),
            questions: vec![question("A"), question("B|C")],
        })
        .unwrap();
        s.apply(SessionEvent::SelectAnswer("A".into())).unwrap();
        s.apply(SessionEvent::Tick).unwrap();
        s.apply(SessionEvent::Submit).unwrap();
        s
    }

    #[test]
    fn from_session_scores_and_times() {
        let report = QuizReport::from_session(&finished());
        assert_eq!(report.participant, "a@b.com");
        assert_eq!(report.score, ScoreSummary { correct: 1, total: 2 });
        assert_eq!(report.percentage, 50);
        assert!(!report.timed_out);
        assert_eq!(report.elapsed_secs, 1);
        assert_eq!(report.time_remaining_secs, QUIZ_DURATION_SECS - 1);
        assert_eq!(report.outcomes.len(), 2);
    }

    #[test]
    fn empty_session_report_is_zero() {
        let report = QuizReport::from_session(&Session::new());
        assert_eq!(report.score.total, 0);
        assert_eq!(report.percentage, 0);
    }

    #[test]
    fn json_roundtrip() {
        let report = QuizReport::from_session(&finished());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");

        report.save_json(&path).unwrap();
        let loaded = QuizReport::load_json(&path).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.outcomes, report.outcomes);
    }

    #[test]
    fn load_missing_file_fails_with_context() {
        let err = QuizReport::load_json(Path::new("no/such/report.json")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read report"));
    }

    #[test]
    fn markdown_output() {
        let md = QuizReport::from_session(&finished()).to_markdown();
        assert!(md.contains("Quiz Results"));
        assert!(md.contains("1/2 (50%)"));
        assert!(md.contains("Not answered"));
        assert!(md.contains("B\\|C"));
    }
}
