//! Host integration: wires settings, feed client, scheduler and the platform UI.
//!
//! macOS gets a real status item. Everywhere else the same cycle runs headless
//! and each new menu state is written to the log.

#[cfg(not(target_os = "macos"))]
mod headless;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "macos")]
mod tray;

#[cfg(not(target_os = "macos"))]
pub use headless::run;
#[cfg(target_os = "macos")]
pub use tray::run;

use anyhow::Result;
use std::sync::{Arc, RwLock};

use crate::api::FeedClient;
use crate::config::AppConfig;
use crate::internal::actions::ActionDispatcher;
use crate::internal::desktop::Desktop;
use crate::internal::refresh::{Presenter, RefreshCycle};
use crate::internal::scheduler::Scheduler;
use crate::internal::settings::{Settings, SettingsStore};
use crate::internal::settings_dialog::SettingsDialog;

/// Everything loaded at startup, before any UI exists.
pub struct AppContext {
    pub settings: Arc<RwLock<Settings>>,
    pub store: SettingsStore,
    pub client: FeedClient,
}

impl AppContext {
    pub fn load(config: &AppConfig) -> Self {
        let store = match &config.settings_file {
            Some(path) => SettingsStore::new(path),
            None => SettingsStore::default_location(),
        };
        let settings = store.load();
        tracing::info!(
            interval = settings.interval,
            title_max_len = settings.title_max_len,
            articles_per_menu = settings.articles_per_menu,
            "Settings in effect"
        );
        let client = FeedClient::new(config.api_base_url.clone(), settings.request_timeout());

        Self {
            settings: Arc::new(RwLock::new(settings)),
            store,
            client,
        }
    }

    pub fn icon_default(&self) -> String {
        self.settings
            .read()
            .map(|s| s.icon_default.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().icon_default.clone())
    }

    /// Start the refresh worker and build the click dispatcher that talks to it.
    pub fn start(
        self,
        desktop: Arc<dyn Desktop>,
        presenter: Arc<dyn Presenter>,
    ) -> Result<(Scheduler, ActionDispatcher)> {
        let period = self
            .settings
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .interval();
        let cycle = RefreshCycle::new(self.client, Arc::clone(&self.settings), desktop, presenter);
        let scheduler = Scheduler::spawn(cycle, period)?;

        let dialog = SettingsDialog::new(self.settings, self.store, scheduler.handle());
        let dispatcher = ActionDispatcher::new(scheduler.handle(), dialog);
        Ok((scheduler, dispatcher))
    }
}
