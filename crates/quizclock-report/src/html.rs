//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined. Question and
//! answer text is entity-decoded and then escaped, so nothing from the
//! question source is ever emitted as live markup.

use anyhow::Result;
use std::path::Path;

use quizclock_core::report::QuizReport;
use quizclock_core::text::decode_entities;
use quizclock_core::view::format_clock;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Decode source entities, then escape for HTML.
fn source_text(s: &str) -> String {
    html_escape(&decode_entities(s))
}

/// Generate an HTML report from a quiz report.
pub fn generate_html(report: &QuizReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>Quiz results: {}</title>\n",
        html_escape(&report.participant)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Quiz Results</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Email: <strong>{}</strong> | {}</p>\n",
        html_escape(&report.participant),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Score
    html.push_str("<section class=\"score\">\n");
    html.push_str(&format!(
        "<p class=\"big\">{}/{}</p>\n<p>Score: {}%</p>\n",
        report.score.correct, report.score.total, report.percentage
    ));
    let timing = if report.timed_out {
        "Time ran out".to_string()
    } else {
        format!("Finished with {} left", format_clock(report.time_remaining_secs))
    };
    html.push_str(&format!(
        "<p class=\"meta\">{} | time used {}</p>\n",
        timing,
        format_clock(report.elapsed_secs)
    ));
    html.push_str("</section>\n");

    // Per-question breakdown
    html.push_str("<section class=\"results\">\n");
    for o in &report.outcomes {
        let class = if o.is_correct { "pass" } else { "fail" };
        let mark = if o.is_correct { "&#10004;" } else { "&#10008;" };
        let answer = o
            .answer
            .as_deref()
            .map(source_text)
            .unwrap_or_else(|| "Not answered".to_string());

        html.push_str(&format!("<article class=\"{class}\">\n"));
        html.push_str(&format!(
            "<h3>{}. {} <span class=\"mark\">{}</span></h3>\n",
            o.number,
            source_text(&o.question),
            mark
        ));
        html.push_str(&format!(
            "<p class=\"meta\">{}</p>\n",
            source_text(&o.category)
        ));
        html.push_str(&format!(
            "<p>Your answer: <span class=\"{class}-text\">{answer}</span></p>\n"
        ));
        html.push_str(&format!(
            "<p>Correct answer: <span class=\"pass-text\">{}</span></p>\n",
            source_text(&o.correct_answer)
        ));
        html.push_str("</article>\n");
    }
    html.push_str("</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &QuizReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #eef2ff; --card: #fff; --fg: #1f2937; --muted: #6b7280; --pass: #16a34a; --fail: #dc2626; --accent: #4f46e5; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --card: #1f2937; --fg: #f9fafb; --muted: #9ca3af; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0 auto; max-width: 56rem; padding: 2rem; background: var(--bg); color: var(--fg); }
.meta { color: var(--muted); }
.score { background: var(--card); border-radius: 8px; padding: 1.5rem; text-align: center; }
.big { font-size: 2.5rem; font-weight: bold; color: var(--accent); margin: 0; }
article { background: var(--card); border-radius: 8px; padding: 1rem 1.5rem; margin: 1rem 0; border-left: 4px solid; }
article.pass { border-color: var(--pass); }
article.fail { border-color: var(--fail); }
.mark { float: right; }
.pass-text { color: var(--pass); }
.fail-text { color: var(--fail); }
"#;
