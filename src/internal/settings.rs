use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, warn};

use super::desktop::Desktop;
use super::error::{AppError, AppResult};
use super::notification::Alert;

/// User-editable settings persisted as JSON.
///
/// Keys keep their historical upper-case names so existing files stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(rename = "MAX_TITLE_LENGTH")]
    pub title_max_len: usize,
    #[serde(rename = "UPDATE_INTERVAL_SECONDS")]
    pub interval: u64,
    #[serde(rename = "MAX_ARTICLES_IN_MENU")]
    pub articles_per_menu: usize,
    #[serde(rename = "REQUEST_TIMEOUT")]
    pub request_timeout: u64,
    #[serde(rename = "ICON_DEFAULT")]
    pub icon_default: String,
    #[serde(rename = "ICON_ERROR")]
    pub icon_error: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title_max_len: 50,
            interval: 3600,
            articles_per_menu: 5,
            request_timeout: 10,
            icon_default: "📰".to_string(),
            icon_error: "⚠️".to_string(),
        }
    }
}

impl Settings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Upper bound on item lookups per refresh cycle.
    pub fn scan_limit(&self) -> usize {
        self.articles_per_menu.saturating_mul(5)
    }

    /// Replace any zero numeric field with its default.
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.title_max_len == 0 {
            warn!("MAX_TITLE_LENGTH must be positive, using default");
            self.title_max_len = defaults.title_max_len;
        }
        if self.interval == 0 {
            warn!("UPDATE_INTERVAL_SECONDS must be positive, using default");
            self.interval = defaults.interval;
        }
        if self.articles_per_menu == 0 {
            warn!("MAX_ARTICLES_IN_MENU must be positive, using default");
            self.articles_per_menu = defaults.articles_per_menu;
        }
        if self.request_timeout == 0 {
            warn!("REQUEST_TIMEOUT must be positive, using default");
            self.request_timeout = defaults.request_timeout;
        }
        self
    }
}

/// Loads and saves [`Settings`] at a fixed path.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<config dir>/hn-menubar/settings.json`, or `./settings.json`
    /// when the OS has no config directory.
    pub fn default_location() -> Self {
        let path = dirs::config_dir()
            .map(|dir| dir.join("hn-menubar").join("settings.json"))
            .unwrap_or_else(|| PathBuf::from("settings.json"));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read settings, falling back to defaults when the file is missing or malformed.
    pub fn load(&self) -> Settings {
        if !self.path.exists() {
            warn!(settings_file = %self.path.display(), "Settings file not found, using defaults");
            return Settings::default();
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                error!(settings_file = %self.path.display(), "Failed to read settings: {}. Using defaults", e);
                return Settings::default();
            }
        };

        match serde_json::from_str::<Settings>(&content) {
            Ok(settings) => {
                info!(settings_file = %self.path.display(), "Loaded settings");
                settings.sanitized()
            }
            Err(e) => {
                error!(settings_file = %self.path.display(), "Failed to parse settings: {}. Using defaults", e);
                Settings::default()
            }
        }
    }

    /// Write settings as pretty JSON, creating the parent directory if needed.
    pub fn try_save(&self, settings: &Settings) -> AppResult<()> {
        let persistence = |source: std::io::Error| AppError::Persistence {
            path: self.path.clone(),
            source,
        };

        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(persistence)?;
        }

        let content = serde_json::to_string_pretty(settings)
            .map_err(|e| persistence(std::io::Error::other(e)))?;
        fs::write(&self.path, content).map_err(persistence)?;
        info!(settings_file = %self.path.display(), "Saved settings");
        Ok(())
    }

    /// Save, reporting failures to the user instead of the caller.
    ///
    /// Returns whether the write succeeded.
    pub fn save(&self, settings: &Settings, desktop: &dyn Desktop) -> bool {
        match self.try_save(settings) {
            Ok(()) => true,
            Err(e) => {
                error!("Error saving settings: {}", e);
                desktop.alert(Alert::new(
                    "Error saving settings!",
                    format!("Could not write to {}.\n{}", self.path.display(), e),
                ));
                false
            }
        }
    }
}
