//! Quiz controller: owns one session and drives it.
//!
//! The controller is the single writer of its [`Session`]. It performs the
//! one fetch per start, keeps a stable answer order per question, and holds
//! the [`Countdown`] only while the session is in progress.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::countdown::{Countdown, TICK_PERIOD};
use crate::error::SessionError;
use crate::model::QUESTION_COUNT;
use crate::participant::validate_participant;
use crate::report::QuizReport;
use crate::session::{Phase, Session, SessionEvent};
use crate::traits::QuestionSource;
use crate::view::{navigation_grid, shuffled_choices, NavCell, QuestionView};

/// Configuration for the controller.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Countdown cadence.
    pub tick_period: Duration,
    /// Seed for the answer order. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tick_period: TICK_PERIOD,
            seed: None,
        }
    }
}

/// Drives a single quiz session at a time.
pub struct QuizController {
    source: Arc<dyn QuestionSource>,
    session: Session,
    countdown: Option<Countdown>,
    choice_order: Vec<Vec<String>>,
    rng: StdRng,
    tick_period: Duration,
}

impl QuizController {
    pub fn new(source: Arc<dyn QuestionSource>, config: ControllerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            source,
            session: Session::new(),
            countdown: None,
            choice_order: Vec::new(),
            rng,
            tick_period: config.tick_period,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    /// Validate the participant, fetch questions once, and start the clock.
    ///
    /// A fetch failure is logged and treated as an empty question set, which
    /// the session refuses; the controller stays not-started either way.
    pub async fn start(&mut self, participant_id: &str) -> Result<(), SessionError> {
        if self.session.phase() != Phase::NotStarted {
            return Err(SessionError::InvalidTransition {
                event: "start",
                phase: self.session.phase(),
            });
        }
        validate_participant(participant_id)?;

        let questions = match self.source.fetch(QUESTION_COUNT).await {
            Ok(questions) => questions,
            Err(e) => {
                tracing::warn!(source = self.source.name(), "failed to fetch questions: {e:#}");
                Vec::new()
            }
        };

        self.session.apply(SessionEvent::Start {
            participant_id: participant_id.to_string(),
            questions,
        })?;

        self.choice_order = self
            .session
            .questions()
            .iter()
            .map(|q| shuffled_choices(q, &mut self.rng))
            .collect();
        self.countdown = Some(Countdown::start(self.tick_period));

        tracing::info!(
            participant = participant_id,
            questions = self.session.questions().len(),
            "quiz started"
        );
        Ok(())
    }

    /// Apply an event and stop the countdown once the session leaves play.
    ///
    /// `Start` is refused here; sessions begin only through [`Self::start`].
    pub fn dispatch(&mut self, event: SessionEvent) -> Result<Phase, SessionError> {
        if matches!(event, SessionEvent::Start { .. }) {
            return Err(SessionError::InvalidTransition {
                event: "start",
                phase: self.session.phase(),
            });
        }
        let was_retry = matches!(event, SessionEvent::Retry);
        self.session.apply(event)?;

        if was_retry {
            self.choice_order.clear();
        }
        if self.countdown.is_some() && self.session.phase() != Phase::InProgress {
            self.countdown = None;
            tracing::info!(
                timed_out = self.session.time_remaining() == 0,
                "quiz finished"
            );
        }
        Ok(self.session.phase())
    }

    /// Resolves when the countdown fires. Never resolves while no countdown
    /// is running, which makes it safe to use as a `select!` branch.
    pub async fn next_tick(&mut self) {
        if let Some(countdown) = self.countdown.as_mut() {
            if countdown.tick().await.is_some() {
                return;
            }
        }
        std::future::pending::<()>().await
    }

    /// Whether a countdown task is currently owned.
    pub fn countdown_running(&self) -> bool {
        self.countdown.as_ref().is_some_and(Countdown::is_running)
    }

    /// The active question with its session-stable answer order.
    pub fn current_view(&self) -> Option<QuestionView> {
        let order = self.choice_order.get(self.session.current_index())?;
        QuestionView::build(&self.session, order)
    }

    pub fn navigation(&self) -> Vec<NavCell> {
        navigation_grid(&self.session)
    }

    /// The final report, available once the session is terminal.
    pub fn report(&self) -> Option<QuizReport> {
        self.session
            .is_terminal()
            .then(|| QuizReport::from_session(&self.session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Question;
    use crate::model::QUIZ_DURATION_SECS;
    use crate::session::tests::question;
    use crate::session::Direction;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticSource {
        questions: Vec<Question>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl StaticSource {
        fn with(questions: Vec<Question>) -> Arc<Self> {
            Arc::new(Self {
                questions,
                fail: false,
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                questions: vec![],
                fail: true,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl QuestionSource for StaticSource {
        fn name(&self) -> &str {
            "static"
        }

        async fn fetch(&self, count: usize) -> anyhow::Result<Vec<Question>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("connection refused");
            }
            Ok(self.questions.iter().take(count).cloned().collect())
        }
    }

    fn seeded() -> ControllerConfig {
        ControllerConfig {
            tick_period: TICK_PERIOD,
            seed: Some(3),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn full_scenario_scores_one_of_two() {
        let q0 = question("A");
        let q1 = question("B");
        let source = StaticSource::with(vec![q0, q1.clone()]);
        let mut ctl = QuizController::new(source.clone(), seeded());

        ctl.start("a@b.com").await.unwrap();
        assert_eq!(ctl.phase(), Phase::InProgress);
        assert!(ctl.countdown_running());

        ctl.dispatch(SessionEvent::SelectAnswer("X".into())).unwrap();
        ctl.dispatch(SessionEvent::Step(Direction::Forward)).unwrap();
        assert_eq!(ctl.session().current_index(), 1);
        assert_eq!(ctl.session().visited().len(), 2);
        ctl.dispatch(SessionEvent::SelectAnswer(q1.correct_answer.clone()))
            .unwrap();
        let phase = ctl.dispatch(SessionEvent::Submit).unwrap();

        assert_eq!(phase, Phase::Terminal);
        assert!(!ctl.countdown_running());
        let report = ctl.report().unwrap();
        assert_eq!(report.score.correct, 1);
        assert_eq!(report.score.total, 2);
        assert_eq!(report.percentage, 50);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalid_participant_skips_fetch() {
        let source = StaticSource::with(vec![question("A")]);
        let mut ctl = QuizController::new(source.clone(), seeded());
        let err = ctl.start("").await.unwrap_err();
        assert_eq!(err.to_string(), "Email is required");
        assert_eq!(ctl.phase(), Phase::NotStarted);
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert!(!ctl.countdown_running());
    }

    #[tokio::test]
    async fn fetch_failure_blocks_start() {
        let mut ctl = QuizController::new(StaticSource::failing(), seeded());
        let err = ctl.start("a@b.com").await.unwrap_err();
        assert_eq!(err, SessionError::NoQuestions);
        assert_eq!(ctl.phase(), Phase::NotStarted);
        assert!(!ctl.countdown_running());
        assert!(ctl.current_view().is_none());
    }

    #[tokio::test]
    async fn empty_fetch_blocks_start() {
        let mut ctl = QuizController::new(StaticSource::with(vec![]), seeded());
        assert_eq!(
            ctl.start("a@b.com").await.unwrap_err(),
            SessionError::NoQuestions
        );
    }

    #[tokio::test(start_paused = true)]
    async fn requests_the_fixed_question_count() {
        let questions: Vec<_> = (0..20).map(|i| question(&format!("Q{i}"))).collect();
        let mut ctl = QuizController::new(StaticSource::with(questions), seeded());
        ctl.start("a@b.com").await.unwrap();
        assert_eq!(ctl.session().questions().len(), QUESTION_COUNT);
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_drive_the_clock_to_timeout() {
        let mut ctl = QuizController::new(StaticSource::with(vec![question("A")]), seeded());
        ctl.start("a@b.com").await.unwrap();

        for _ in 0..QUIZ_DURATION_SECS {
            ctl.next_tick().await;
            ctl.dispatch(SessionEvent::Tick).unwrap();
        }

        assert_eq!(ctl.session().time_remaining(), 0);
        assert!(!ctl.session().is_complete());
        assert_eq!(ctl.phase(), Phase::Terminal);
        assert!(!ctl.countdown_running());
        assert!(ctl.report().unwrap().timed_out);
    }

    #[tokio::test(start_paused = true)]
    async fn next_tick_is_pending_without_countdown() {
        let mut ctl = QuizController::new(StaticSource::with(vec![question("A")]), seeded());
        let waited = tokio::time::timeout(Duration::from_secs(5), ctl.next_tick()).await;
        assert!(waited.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn answer_order_is_stable_across_navigation() {
        let mut ctl = QuizController::new(
            StaticSource::with(vec![question("A"), question("B")]),
            seeded(),
        );
        ctl.start("a@b.com").await.unwrap();

        let first: Vec<String> = ctl
            .current_view()
            .unwrap()
            .choices
            .into_iter()
            .map(|c| c.value)
            .collect();
        ctl.dispatch(SessionEvent::GoTo(1)).unwrap();
        ctl.dispatch(SessionEvent::GoTo(0)).unwrap();
        let again: Vec<String> = ctl
            .current_view()
            .unwrap()
            .choices
            .into_iter()
            .map(|c| c.value)
            .collect();

        assert_eq!(first, again);
        assert_eq!(first.len(), 4);
        assert!(first.contains(&"A".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn retry_discards_everything_and_allows_a_new_start() {
        let source = StaticSource::with(vec![question("A")]);
        let mut ctl = QuizController::new(source.clone(), seeded());
        ctl.start("a@b.com").await.unwrap();
        ctl.dispatch(SessionEvent::SelectAnswer("A".into())).unwrap();
        ctl.dispatch(SessionEvent::Submit).unwrap();

        ctl.dispatch(SessionEvent::Retry).unwrap();
        assert_eq!(ctl.session(), &Session::new());
        assert!(ctl.current_view().is_none());
        assert!(ctl.report().is_none());

        ctl.start("c@d.org").await.unwrap();
        assert_eq!(ctl.session().participant_id(), "c@d.org");
        assert!(ctl.countdown_running());
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_mid_session_stops_the_countdown() {
        let mut ctl = QuizController::new(StaticSource::with(vec![question("A")]), seeded());
        ctl.start("a@b.com").await.unwrap();
        ctl.dispatch(SessionEvent::Retry).unwrap();
        assert!(!ctl.countdown_running());
        assert_eq!(ctl.phase(), Phase::NotStarted);
    }

    #[tokio::test(start_paused = true)]
    async fn dispatching_start_is_refused() {
        let source = StaticSource::with(vec![question("A"), question("B")]);
        let mut ctl = QuizController::new(source.clone(), seeded());

        let err = ctl
            .dispatch(SessionEvent::Start {
                participant_id: "a@b.com".into(),
                questions: vec![question("A"), question("B")],
            })
            .unwrap_err();

        assert_eq!(
            err,
            SessionError::InvalidTransition {
                event: "start",
                phase: Phase::NotStarted,
            }
        );
        assert_eq!(ctl.session(), &Session::new());
        assert!(!ctl.countdown_running());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);

        ctl.start("a@b.com").await.unwrap();
        assert!(ctl.current_view().is_some());
        assert!(ctl.countdown_running());
        let ticked = tokio::time::timeout(Duration::from_secs(5), ctl.next_tick()).await;
        assert!(ticked.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn second_start_is_refused_without_fetching() {
        let source = StaticSource::with(vec![question("A")]);
        let mut ctl = QuizController::new(source.clone(), seeded());
        ctl.start("a@b.com").await.unwrap();
        assert!(ctl.start("a@b.com").await.is_err());
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }
}
