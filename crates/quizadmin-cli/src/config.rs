//! CLI configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level quizadmin configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizadminConfig {
    /// JSON snapshot file holding users and quizzes.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Pretty-print JSON output.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("./quizadmin-data.json")
}
fn default_pretty() -> bool {
    true
}
fn default_log_filter() -> String {
    "quizadmin=warn".to_string()
}

impl Default for QuizadminConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            pretty: default_pretty(),
            log_filter: default_log_filter(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied through as-is and never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + 2 + len];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + 2 + len + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `quizadmin.toml` in the current directory
/// 2. `~/.config/quizadmin/config.toml`
///
/// `QUIZADMIN_DATA_FILE` overrides the configured data file.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizadminConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizadmin.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizadminConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizadminConfig::default(),
    };

    if let Ok(data_file) = std::env::var("QUIZADMIN_DATA_FILE") {
        config.data_file = PathBuf::from(data_file);
    }
    config.data_file = PathBuf::from(resolve_env_vars(&config.data_file.to_string_lossy()));

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizadmin"))
}
