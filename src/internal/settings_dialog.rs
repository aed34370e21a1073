use std::sync::{Arc, RwLock};
use tracing::{error, info};

use super::desktop::Desktop;
use super::error::{AppError, AppResult};
use super::notification::{Alert, Notification};
use super::scheduler::SchedulerHandle;
use super::settings::{Settings, SettingsStore};

pub const DIALOG_TITLE: &str = "Configure Settings";
pub const DIALOG_MESSAGE: &str = "Update Interval (seconds):\nMax Title Length (chars):";

/// What a confirmed dialog changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsEdit {
    pub interval: u64,
    pub title_max_len: usize,
}

/// Parse the dialog text: exactly two lines, interval then title length,
/// both positive integers.
pub fn parse_settings_input(text: &str) -> AppResult<SettingsEdit> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized.trim().split('\n').collect();
    let [interval, title_len] = lines.as_slice() else {
        return Err(AppError::Validation("Expected two lines of input.".to_string()));
    };

    let interval = parse_positive(interval, "Update interval")?;
    let title_max_len = parse_positive(title_len, "Max title length")?;
    Ok(SettingsEdit {
        interval,
        title_max_len: title_max_len as usize,
    })
}

fn parse_positive(raw: &str, field: &str) -> AppResult<u64> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("{field} must be a whole number, got '{}'.", raw.trim())))?;
    if value <= 0 {
        return Err(AppError::Validation(
            "Values must be positive integers.".to_string(),
        ));
    }
    Ok(value as u64)
}

/// The modal settings editor. Runs on the UI thread; the prompt blocks until dismissed.
pub struct SettingsDialog {
    settings: Arc<RwLock<Settings>>,
    store: SettingsStore,
    scheduler: SchedulerHandle,
}

impl SettingsDialog {
    pub fn new(
        settings: Arc<RwLock<Settings>>,
        store: SettingsStore,
        scheduler: SchedulerHandle,
    ) -> Self {
        Self {
            settings,
            store,
            scheduler,
        }
    }

    fn current(&self) -> Settings {
        self.settings
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Show the prompt and apply the answer.
    ///
    /// Returns the applied edit, or `None` on cancel or invalid input.
    pub fn run(&self, desktop: &dyn Desktop) -> Option<SettingsEdit> {
        info!("Settings menu item clicked");
        let current = self.current();
        let default_text = format!("{}\n{}", current.interval, current.title_max_len);

        match desktop.prompt(DIALOG_TITLE, DIALOG_MESSAGE, &default_text) {
            Some(text) => self.apply(&text, desktop),
            None => {
                info!("Settings window cancelled");
                None
            }
        }
    }

    /// Validate and apply confirmed dialog text.
    pub fn apply(&self, text: &str, desktop: &dyn Desktop) -> Option<SettingsEdit> {
        let edit = match parse_settings_input(text) {
            Ok(edit) => edit,
            Err(e) => {
                error!("Invalid settings input: {}", e);
                desktop.alert(Alert::new(
                    "Invalid Input",
                    format!(
                        "Could not save settings: {e}\nPlease enter positive numbers on separate lines."
                    ),
                ));
                return None;
            }
        };

        let (updated, interval_changed) = {
            let mut settings = self
                .settings
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let interval_changed = settings.interval != edit.interval;
            settings.interval = edit.interval;
            settings.title_max_len = edit.title_max_len;
            (settings.clone(), interval_changed)
        };

        self.store.save(&updated, desktop);

        if interval_changed {
            info!(interval = edit.interval, "Changing update interval");
            self.scheduler.set_interval(updated.interval());
        }

        desktop.notify(Notification::info(
            "Settings Saved",
            format!(
                "Interval: {}s, Title Length: {} chars",
                edit.interval, edit.title_max_len
            ),
            "Changes applied.",
        ));
        info!("Settings saved and applied");
        Some(edit)
    }
}
