//! Configuration management for the todo list.
//!
//! Loads configuration from environment variables (optionally via a `.env`
//! file) with sensible defaults.

use crate::environment::{is_valid_date_format, DEFAULT_DATE_FORMAT};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Log filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "tasklist=info,tasklist_runtime=info";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Whose list this is, shown in the header (`TASKLIST_OWNER`)
    pub owner: Option<String>,
    /// Start with the two sample rows (`TASKLIST_SEED_DEMO`, default: false)
    pub seed_demo: bool,
    /// `strftime` pattern for the pre-filled entry date (`TASKLIST_DATE_FORMAT`)
    pub date_format: String,
    /// Where log output is written (`TASKLIST_LOG_FILE`, default: `tasklist.log`)
    pub log_file: PathBuf,
    /// Tracing filter directives (`RUST_LOG`)
    pub log_filter: String,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first if present;
    /// variables already set take precedence over it.
    #[must_use]
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            owner: lookup("TASKLIST_OWNER")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            seed_demo: lookup("TASKLIST_SEED_DEMO")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(false),
            date_format: lookup("TASKLIST_DATE_FORMAT")
                .filter(|s| is_valid_date_format(s))
                .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string()),
            log_file: lookup("TASKLIST_LOG_FILE")
                .filter(|s| !s.trim().is_empty())
                .map_or_else(|| PathBuf::from("tasklist.log"), PathBuf::from),
            log_filter: lookup("RUST_LOG")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }

    /// Page heading, e.g. `Vashee's todo list`
    #[must_use]
    pub fn title(&self) -> String {
        self.owner
            .as_ref()
            .map_or_else(|| "Todo list".to_string(), |owner| format!("{owner}'s todo list"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = Config::default();

        assert_eq!(config.owner, None);
        assert!(!config.seed_demo);
        assert_eq!(config.date_format, "%-m/%-d/%Y");
        assert_eq!(config.log_file, PathBuf::from("tasklist.log"));
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert_eq!(config.title(), "Todo list");
    }

    #[test]
    fn reads_every_variable() {
        let config = config_from(&[
            ("TASKLIST_OWNER", "Vashee"),
            ("TASKLIST_SEED_DEMO", "true"),
            ("TASKLIST_DATE_FORMAT", "%Y-%m-%d"),
            ("TASKLIST_LOG_FILE", "/tmp/todo.log"),
            ("RUST_LOG", "debug"),
        ]);

        assert_eq!(config.title(), "Vashee's todo list");
        assert!(config.seed_demo);
        assert_eq!(config.date_format, "%Y-%m-%d");
        assert_eq!(config.log_file, PathBuf::from("/tmp/todo.log"));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn bad_values_fall_back() {
        let config = config_from(&[
            ("TASKLIST_OWNER", "   "),
            ("TASKLIST_SEED_DEMO", "maybe"),
            ("TASKLIST_DATE_FORMAT", "%Q"),
            ("RUST_LOG", ""),
        ]);

        assert_eq!(config.owner, None);
        assert!(!config.seed_demo);
        assert_eq!(config.date_format, DEFAULT_DATE_FORMAT);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }
}
