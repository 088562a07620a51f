//! Application configuration management.
//!
//! Configuration is read from `~/.config/rollcall/config.json` when it
//! exists. `ROLLCALL_*` environment variables (a `.env` file is honoured)
//! override the file, and command-line flags override both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for config/log directory paths
const APP_NAME: &str = "rollcall";

/// Config file name
const CONFIG_FILE: &str = "config.json";

const DEFAULT_PROMPT: &str = "> ";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Data files loaded before the first prompt.
    pub students_file: Option<PathBuf>,
    pub staff_file: Option<PathBuf>,
    pub rooms_file: Option<PathBuf>,
    pub prompt: Option<String>,
    /// Directory for `rollcall.log`.
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Apply `ROLLCALL_STUDENTS`, `ROLLCALL_STAFF`, `ROLLCALL_ROOMS` and
    /// `ROLLCALL_LOG_DIR` from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        let path = |key: &str| var(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from);
        if let Some(p) = path("ROLLCALL_STUDENTS") {
            self.students_file = Some(p);
        }
        if let Some(p) = path("ROLLCALL_STAFF") {
            self.staff_file = Some(p);
        }
        if let Some(p) = path("ROLLCALL_ROOMS") {
            self.rooms_file = Some(p);
        }
        if let Some(p) = path("ROLLCALL_LOG_DIR") {
            self.log_dir = Some(p);
        }
    }

    pub fn prompt(&self) -> &str {
        self.prompt.as_deref().unwrap_or(DEFAULT_PROMPT)
    }

    pub fn log_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.log_dir {
            return Ok(dir.clone());
        }
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_load_from_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "rooms_file": "rooms.csv", "prompt": "rollcall> " }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.rooms_file, Some(PathBuf::from("rooms.csv")));
        assert_eq!(config.students_file, None);
        assert_eq!(config.prompt(), "rollcall> ");
    }

    #[test]
    fn test_load_from_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse config file"));
    }

    #[test]
    fn test_env_overrides_file() {
        let vars: HashMap<&str, &str> = [
            ("ROLLCALL_STUDENTS", "/data/students.csv"),
            ("ROLLCALL_ROOMS", "  "),
            ("ROLLCALL_LOG_DIR", "/tmp/rollcall"),
        ]
        .into_iter()
        .collect();

        let mut config = Config {
            students_file: Some(PathBuf::from("old.csv")),
            rooms_file: Some(PathBuf::from("rooms.csv")),
            ..Default::default()
        };
        config.apply_vars(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.students_file, Some(PathBuf::from("/data/students.csv")));
        assert_eq!(config.rooms_file, Some(PathBuf::from("rooms.csv")));
        assert_eq!(config.log_dir().unwrap(), PathBuf::from("/tmp/rollcall"));
    }

    #[test]
    fn test_default_prompt() {
        assert_eq!(Config::default().prompt(), DEFAULT_PROMPT);
    }
}
