//! The `quizclock show` command.

use std::path::PathBuf;

use anyhow::Result;

use quizclock_core::report::QuizReport;
use quizclock_report::html::generate_html;

use crate::display;

pub fn execute(path: PathBuf, format: String) -> Result<()> {
    let report = QuizReport::load_json(&path)?;

    match format.as_str() {
        "text" => display::print_report(&report),
        "markdown" | "md" => print!("{}", report.to_markdown()),
        "html" => println!("{}", generate_html(&report)),
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        other => anyhow::bail!("unknown format: '{other}' (text, markdown, html, json)"),
    }
    Ok(())
}
