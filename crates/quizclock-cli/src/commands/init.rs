//! The `quizclock init` command.

use std::path::Path;

use anyhow::Result;

const CONFIG_FILE: &str = "quizclock.toml";

pub fn execute() -> Result<()> {
    if Path::new(CONFIG_FILE).exists() {
        println!("{CONFIG_FILE} already exists, skipping.");
        return Ok(());
    }
    std::fs::write(CONFIG_FILE, SAMPLE_CONFIG)?;
    println!("Created {CONFIG_FILE}");

    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to pick a question source");
    println!("  2. Run: quizclock play");
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizclock configuration

output_dir = "./quizclock-results"
# none, json, html, all
report_format = "json"

[source]
type = "opentdb"
base_url = "https://opentdb.com"
timeout_secs = 30

# Play offline from a saved question set (see `quizclock fetch`):
# [source]
# type = "file"
# path = "questions.json"
"#;
