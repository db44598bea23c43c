//! Terminal rendering of questions, progress, and reports.

use comfy_table::{Cell, Table};

use quizclock_core::report::QuizReport;
use quizclock_core::text::decode_entities;
use quizclock_core::view::{format_clock, CellStatus, NavCell, QuestionView};

const GRID_COLUMNS: usize = 5;

pub fn print_welcome() {
    println!("Welcome to the Quiz");
    println!("15 questions, 30 minutes. Type `h` at any time for help.");
    println!();
}

pub fn print_question(view: &QuestionView, time_remaining: u32) {
    println!();
    println!(
        "Question {} of {}    [{}]",
        view.number,
        view.total,
        format_clock(time_remaining)
    );
    println!(
        "Category: {} | Difficulty: {}",
        view.category, view.difficulty
    );
    println!();
    println!("{}", view.text);
    println!();
    for (i, choice) in view.choices.iter().enumerate() {
        let marker = if choice.selected { "*" } else { " " };
        println!(" {marker} {}) {}", i + 1, choice.label);
    }
}

pub fn print_navigation(cells: &[NavCell]) {
    println!();
    println!("Question Overview");
    for row in cells.chunks(GRID_COLUMNS) {
        let line: Vec<String> = row
            .iter()
            .map(|cell| {
                let mark = match cell.status {
                    CellStatus::Answered => '+',
                    CellStatus::Visited => '~',
                    CellStatus::Unvisited => ' ',
                };
                let label = format!("{:>2}{mark}", cell.index + 1);
                if cell.current {
                    format!("[{label}]")
                } else {
                    format!(" {label} ")
                }
            })
            .collect();
        println!("  {}", line.join(" "));
    }
    println!("  + answered   ~ visited   [ ] current");
}

pub fn print_help() {
    println!();
    println!("Commands:");
    println!("  1-9        choose an answer for the current question");
    println!("  n, next    next question");
    println!("  p, prev    previous question");
    println!("  g N        go to question N");
    println!("  o          question overview");
    println!("  t          time remaining");
    println!("  s, submit  submit the quiz");
    println!("  q, quit    abandon the quiz");
}

pub fn print_report(report: &QuizReport) {
    println!();
    println!("Quiz Results");
    println!("Email: {}", report.participant);
    if report.timed_out {
        println!("Time ran out.");
    }
    println!();
    println!("  {}/{}", report.score.correct, report.score.total);
    println!("  Score: {}%", report.percentage);
    println!();

    if report.outcomes.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Your answer", "Correct answer", ""]);
    for o in &report.outcomes {
        table.add_row(vec![
            Cell::new(o.number),
            Cell::new(decode_entities(&o.question)),
            Cell::new(
                o.answer
                    .as_deref()
                    .map(decode_entities)
                    .unwrap_or_else(|| "Not answered".to_string()),
            ),
            Cell::new(decode_entities(&o.correct_answer)),
            Cell::new(if o.is_correct { "OK" } else { "X" }),
        ]);
    }
    println!("{table}");
}
