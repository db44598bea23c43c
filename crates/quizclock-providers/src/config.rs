//! Configuration and question source factory.
//!
//! The quiz length and question count are fixed; configuration only covers
//! where questions come from and where reports go.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizclock_core::traits::QuestionSource;

use crate::file::FileSource;
use crate::opentdb::{OpenTdbSource, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Environment variable overriding the Open Trivia DB base URL.
pub const SOURCE_URL_ENV: &str = "QUIZCLOCK_SOURCE_URL";

/// Where questions come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    OpenTdb {
        #[serde(default = "default_base_url")]
        base_url: String,
        #[serde(default = "default_timeout")]
        timeout_secs: u64,
    },
    File {
        path: PathBuf,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::OpenTdb {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Top-level quizclock configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizclockConfig {
    /// Question source.
    #[serde(default)]
    pub source: SourceConfig,
    /// Directory for exported reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Report formats written after a session: none, json, html, or all.
    #[serde(default = "default_report_format")]
    pub report_format: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./quizclock-results")
}

fn default_report_format() -> String {
    "json".to_string()
}

impl Default for QuizclockConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            output_dir: default_output_dir(),
            report_format: default_report_format(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_source_config(config: &SourceConfig) -> SourceConfig {
    match config {
        SourceConfig::OpenTdb {
            base_url,
            timeout_secs,
        } => SourceConfig::OpenTdb {
            base_url: resolve_env_vars(base_url),
            timeout_secs: *timeout_secs,
        },
        SourceConfig::File { path } => SourceConfig::File {
            path: PathBuf::from(resolve_env_vars(&path.to_string_lossy())),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizclock.toml` in the current directory
/// 2. `~/.config/quizclock/config.toml`
///
/// `QUIZCLOCK_SOURCE_URL` overrides the Open Trivia DB base URL.
pub fn load_config() -> Result<QuizclockConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizclockConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizclock.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<QuizclockConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "config loaded");
            config
        }
        None => QuizclockConfig::default(),
    };

    if let Ok(url) = std::env::var(SOURCE_URL_ENV) {
        if let SourceConfig::OpenTdb { base_url, .. } = &mut config.source {
            tracing::debug!(url = %url, "base URL overridden from {SOURCE_URL_ENV}");
            *base_url = url;
        }
    }

    config.source = resolve_source_config(&config.source);
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizclock"))
}

/// Create a question source from its configuration.
pub fn create_source(config: &SourceConfig) -> Result<Box<dyn QuestionSource>> {
    match config {
        SourceConfig::OpenTdb {
            base_url,
            timeout_secs,
        } => Ok(Box::new(OpenTdbSource::new(
            Some(base_url.clone()),
            *timeout_secs,
        )?)),
        SourceConfig::File { path } => Ok(Box::new(FileSource::new(path.clone()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZCLOCK_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_QUIZCLOCK_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_QUIZCLOCK_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_QUIZCLOCK_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = QuizclockConfig::default();
        assert_eq!(config.report_format, "json");
        assert_eq!(
            config.source,
            SourceConfig::OpenTdb {
                base_url: DEFAULT_BASE_URL.into(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            }
        );
    }

    #[test]
    fn parse_opentdb_config() {
        let toml_str = r#"
output_dir = "./out"

[source]
type = "opentdb"
base_url = "http://localhost:9000"
"#;
        let config: QuizclockConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("./out"));
        assert_eq!(
            config.source,
            SourceConfig::OpenTdb {
                base_url: "http://localhost:9000".into(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            }
        );
    }

    #[test]
    fn parse_file_config() {
        let toml_str = r#"
[source]
type = "file"
path = "questions.json"
"#;
        let config: QuizclockConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(config.source, SourceConfig::File { .. }));
        assert_eq!(config.report_format, "json");
    }

    #[test]
    fn explicit_missing_path_fails() {
        let err = load_config_from(Some(Path::new("/no/such/quizclock.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizclock.toml");
        std::fs::write(
            &path,
            "report_format = \"all\"\n[source]\ntype = \"file\"\npath = \"q.json\"\n",
        )
        .unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.report_format, "all");
    }

    #[test]
    fn source_url_env_only_overrides_opentdb() {
        let dir = tempfile::tempdir().unwrap();
        let opentdb = dir.path().join("opentdb.toml");
        std::fs::write(
            &opentdb,
            "[source]\ntype = \"opentdb\"\ntimeout_secs = 5\n",
        )
        .unwrap();
        let file = dir.path().join("file.toml");
        std::fs::write(&file, "[source]\ntype = \"file\"\npath = \"q.json\"\n").unwrap();

        std::env::set_var(SOURCE_URL_ENV, "http://localhost:9999");
        let from_opentdb = load_config_from(Some(&opentdb));
        let from_file = load_config_from(Some(&file));
        std::env::remove_var(SOURCE_URL_ENV);

        assert_eq!(
            from_opentdb.unwrap().source,
            SourceConfig::OpenTdb {
                base_url: "http://localhost:9999".into(),
                timeout_secs: 5,
            }
        );
        assert_eq!(
            from_file.unwrap().source,
            SourceConfig::File {
                path: PathBuf::from("q.json"),
            }
        );
    }

    #[test]
    fn create_sources() {
        let source = create_source(&SourceConfig::default()).unwrap();
        assert_eq!(source.name(), "opentdb");
        let source = create_source(&SourceConfig::File {
            path: "q.json".into(),
        })
        .unwrap();
        assert_eq!(source.name(), "file");
    }
}
