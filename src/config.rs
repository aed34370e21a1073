use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use strum_macros::Display;

use crate::api::HN_API_BASE_URL;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base level for every module.
    pub level: LogLevel,
    /// Per-module overrides, e.g. `{"reqwest": warn}`.
    pub module_levels: BTreeMap<String, LogLevel>,
    /// Where rolling log files go. Defaults to the OS data directory.
    pub log_directory: Option<String>,
}

impl LoggingConfig {
    /// `EnvFilter` directive string built from the level and module overrides.
    pub fn filter_directive(&self) -> String {
        let mut filter_str = self.level.to_string();
        for (module, level) in &self.module_levels {
            filter_str.push_str(&format!(",{}={}", module, level));
        }
        filter_str
    }

    pub fn resolved_log_directory(&self) -> PathBuf {
        match &self.log_directory {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_local_dir()
                .map(|dir| dir.join("hn-menubar").join("logs"))
                .unwrap_or_else(|| PathBuf::from("logs")),
        }
    }
}

/// Process-level configuration, read once at startup from `config.ron`.
///
/// Separate from the user settings: nothing here is editable from the menu.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// Root of the Hacker News API, with trailing slash.
    pub api_base_url: String,
    /// Overrides the location of `settings.json`.
    pub settings_file: Option<String>,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: HN_API_BASE_URL.to_string(),
            settings_file: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Look for `config.ron` in the working directory, next to the executable,
    /// then in the OS config directory. First parseable file wins.
    pub fn load() -> Self {
        let mut candidates = vec![PathBuf::from("config.ron")];

        if let Ok(exe) = std::env::current_exe()
            && let Some(dir) = exe.parent()
        {
            candidates.push(dir.join("config.ron"));
        }

        if let Some(dir) = dirs::config_dir() {
            candidates.push(dir.join("hn-menubar").join("config.ron"));
        }

        for path in candidates {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match Self::from_ron(&content) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse config at {}: {}", path.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Self::default()
    }

    pub fn from_ron(content: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str::<AppConfig>(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "https://hacker-news.firebaseio.com/v0/");
        assert!(config.settings_file.is_none());
        assert_eq!(config.logging.filter_directive(), "info");
    }

    #[test]
    fn test_parse_partial_ron() {
        let config = AppConfig::from_ron(
            r#"(
    // Logging settings
    logging: (
        level: debug,
        module_levels: { "reqwest": warn, "hyper": error },
    ),
)"#,
        )
        .unwrap();

        assert_eq!(config.api_base_url, HN_API_BASE_URL);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(
            config.logging.filter_directive(),
            "debug,hyper=error,reqwest=warn"
        );
    }

    #[test]
    fn test_log_directory_override() {
        let logging = LoggingConfig {
            log_directory: Some("/tmp/hn-logs".to_string()),
            ..LoggingConfig::default()
        };
        assert_eq!(logging.resolved_log_directory(), PathBuf::from("/tmp/hn-logs"));
    }

    #[test]
    fn test_invalid_ron_is_error() {
        assert!(AppConfig::from_ron("(logging: 42)").is_err());
    }
}
