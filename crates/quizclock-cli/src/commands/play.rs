//! The `quizclock play` command.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use quizclock_core::controller::{ControllerConfig, QuizController};
use quizclock_core::report::QuizReport;
use quizclock_core::session::{Direction, Phase, SessionEvent};
use quizclock_core::traits::QuestionSource;
use quizclock_core::view::format_clock;
use quizclock_core::SessionError;
use quizclock_providers::config::{create_source, load_config_from, SourceConfig};
use quizclock_report::html::write_html_report;

use crate::display;

/// Remaining-time marks at which a warning is printed.
const TIME_WARNINGS: [u32; 3] = [300, 60, 10];

/// A parsed line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// 0-based choice within the current question.
    Choose(usize),
    Next,
    Prev,
    /// 0-based question index.
    GoTo(usize),
    Overview,
    Time,
    Submit,
    Help,
    Quit,
}

/// Parse one line of input. Indices are range-checked here so the session
/// only ever receives valid targets.
fn parse_command(input: &str, question_count: usize, choice_count: usize) -> Result<Command, String> {
    let mut words = input.split_whitespace();
    let Some(head) = words.next() else {
        return Err("Type `h` for help.".to_string());
    };
    let arg = words.next();

    let command = match head.to_lowercase().as_str() {
        "n" | "next" => Command::Next,
        "p" | "prev" | "previous" => Command::Prev,
        "o" | "overview" => Command::Overview,
        "t" | "time" => Command::Time,
        "s" | "submit" => Command::Submit,
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" => Command::Quit,
        "g" | "goto" => {
            let n = arg
                .and_then(|a| a.parse::<usize>().ok())
                .ok_or_else(|| "Usage: g N".to_string())?;
            if n == 0 || n > question_count {
                return Err(format!("There is no question {n} (1-{question_count})."));
            }
            Command::GoTo(n - 1)
        }
        other => {
            let n = other
                .parse::<usize>()
                .map_err(|_| format!("Unknown command `{other}`. Type `h` for help."))?;
            if n == 0 || n > choice_count {
                return Err(format!("Pick an answer between 1 and {choice_count}."));
            }
            Command::Choose(n - 1)
        }
    };
    Ok(command)
}

/// Which report files to write after a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ReportFormats {
    json: bool,
    html: bool,
}

fn parse_formats(list: &str) -> Result<ReportFormats> {
    let mut formats = ReportFormats::default();
    for part in list.split(',').map(str::trim) {
        match part {
            "none" | "" => {}
            "json" => formats.json = true,
            "html" => formats.html = true,
            "all" => {
                formats.json = true;
                formats.html = true;
            }
            other => anyhow::bail!("unknown report format: '{other}' (none, json, html, all)"),
        }
    }
    Ok(formats)
}

fn prompt(text: &str) -> Result<()> {
    print!("{text}");
    std::io::stdout().flush()?;
    Ok(())
}

pub async fn execute(
    participant: Option<String>,
    questions_file: Option<PathBuf>,
    seed: Option<u64>,
    output: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let formats = parse_formats(format.as_deref().unwrap_or(&config.report_format))?;
    let output = output.unwrap_or_else(|| config.output_dir.clone());

    let source_config = match questions_file {
        Some(path) => SourceConfig::File { path },
        None => config.source.clone(),
    };
    let source: Arc<dyn QuestionSource> = Arc::from(create_source(&source_config)?);
    tracing::debug!(source = source.name(), output = %output.display(), "play configured");

    let mut controller = QuizController::new(
        source,
        ControllerConfig {
            seed,
            ..ControllerConfig::default()
        },
    );
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut participant = participant;

    display::print_welcome();

    loop {
        // Not started: collect a valid participant and load questions.
        let mut last_error: Option<SessionError> = None;
        while controller.phase() == Phase::NotStarted {
            let email = match participant.take() {
                Some(email) => email,
                None => {
                    prompt("Enter your email to start: ")?;
                    match lines.next_line().await? {
                        Some(line) => line,
                        None => {
                            return match last_error {
                                Some(e) => Err(e).context("quiz was not started"),
                                None => Ok(()),
                            };
                        }
                    }
                }
            };
            match controller.start(&email).await {
                Ok(()) => {}
                Err(SessionError::Participant(e)) => {
                    println!("{e}");
                    last_error = Some(e.into());
                }
                Err(e) => {
                    println!("Could not start the quiz: {e}. Try again.");
                    last_error = Some(e);
                }
            }
        }

        // In progress.
        show_current(&controller);
        while controller.phase() == Phase::InProgress {
            tokio::select! {
                line = lines.next_line() => {
                    match line? {
                        Some(line) => {
                            if !handle_line(&mut controller, &line)? {
                                println!("Quiz abandoned.");
                                return Ok(());
                            }
                        }
                        None => {
                            controller.dispatch(SessionEvent::Submit)?;
                        }
                    }
                }
                _ = controller.next_tick() => {
                    controller.dispatch(SessionEvent::Tick)?;
                    let remaining = controller.session().time_remaining();
                    if remaining == 0 {
                        println!();
                        println!("Time's up!");
                    } else if TIME_WARNINGS.contains(&remaining) {
                        println!();
                        println!("{} remaining", format_clock(remaining));
                    }
                }
            }
        }

        // Terminal.
        let report = controller
            .report()
            .context("finished session did not produce a report")?;
        display::print_report(&report);
        save_report(&report, &output, formats)?;

        loop {
            prompt("Press r to try again or q to quit: ")?;
            match lines.next_line().await? {
                Some(line) if line.trim().eq_ignore_ascii_case("r") => {
                    controller.dispatch(SessionEvent::Retry)?;
                    println!();
                    break;
                }
                Some(line) if line.trim().eq_ignore_ascii_case("q") => return Ok(()),
                Some(_) => continue,
                None => {
                    println!();
                    return Ok(());
                }
            }
        }
    }
}

fn show_current(controller: &QuizController) {
    if let Some(view) = controller.current_view() {
        display::print_question(&view, controller.session().time_remaining());
    }
}

/// Apply one line of input. Returns `false` when the player quits.
fn handle_line(controller: &mut QuizController, line: &str) -> Result<bool> {
    let question_count = controller.session().questions().len();
    let choices = controller.current_view().map(|v| v.choices).unwrap_or_default();

    let command = match parse_command(line, question_count, choices.len()) {
        Ok(command) => command,
        Err(message) => {
            println!("{message}");
            return Ok(true);
        }
    };

    match command {
        Command::Choose(i) => {
            controller.dispatch(SessionEvent::SelectAnswer(choices[i].value.clone()))?;
            show_current(controller);
        }
        Command::Next => {
            controller.dispatch(SessionEvent::Step(Direction::Forward))?;
            show_current(controller);
        }
        Command::Prev => {
            controller.dispatch(SessionEvent::Step(Direction::Backward))?;
            show_current(controller);
        }
        Command::GoTo(index) => {
            controller.dispatch(SessionEvent::GoTo(index))?;
            show_current(controller);
        }
        Command::Overview => display::print_navigation(&controller.navigation()),
        Command::Time => println!(
            "{} remaining",
            format_clock(controller.session().time_remaining())
        ),
        Command::Submit => {
            controller.dispatch(SessionEvent::Submit)?;
        }
        Command::Help => display::print_help(),
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn save_report(report: &QuizReport, output: &Path, formats: ReportFormats) -> Result<()> {
    if !formats.json && !formats.html {
        return Ok(());
    }
    std::fs::create_dir_all(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");

    if formats.json {
        let path = output.join(format!("quiz-{timestamp}.json"));
        report.save_json(&path)?;
        eprintln!("Results saved to: {}", path.display());
    }
    if formats.html {
        let path = output.join(format!("quiz-{timestamp}.html"));
        write_html_report(report, &path)?;
        eprintln!("HTML report: {}", path.display());
    }
    Ok(())
}
