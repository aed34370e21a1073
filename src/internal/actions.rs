use tracing::{error, info, warn};

use super::desktop::Desktop;
use super::models::MenuAction;
use super::notification::Notification;
use super::scheduler::SchedulerHandle;
use super::settings_dialog::SettingsDialog;

/// What the event loop should do after handling a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Single click handler for every menu entry.
pub struct ActionDispatcher {
    scheduler: SchedulerHandle,
    dialog: SettingsDialog,
}

impl ActionDispatcher {
    pub fn new(scheduler: SchedulerHandle, dialog: SettingsDialog) -> Self {
        Self { scheduler, dialog }
    }

    pub fn dispatch(&self, action: &MenuAction, desktop: &dyn Desktop) -> Flow {
        match action {
            MenuAction::OpenUrl(url) => {
                info!(%url, "Opening URL via menu click");
                open_in_browser(url, desktop);
                Flow::Continue
            }
            MenuAction::Refresh => {
                self.scheduler.refresh();
                Flow::Continue
            }
            MenuAction::OpenSettings => {
                self.dialog.run(desktop);
                Flow::Continue
            }
            MenuAction::Quit => {
                info!("Quit button clicked");
                self.scheduler.shutdown();
                Flow::Exit
            }
        }
    }

    /// Primary click on the status item.
    pub fn open_top_article(&self, top_article_url: Option<&str>, desktop: &dyn Desktop) {
        match top_article_url {
            Some(url) => {
                info!(%url, "Opening top article URL");
                open_in_browser(url, desktop);
            }
            None => warn!("No top article URL is currently set"),
        }
    }
}

fn open_in_browser(url: &str, desktop: &dyn Desktop) {
    if let Err(e) = desktop.open_url(url) {
        error!(%url, "Failed to open URL: {}", e);
        desktop.notify(Notification::error(
            "Error",
            "Browser Error",
            format!("Could not open link: {e}"),
        ));
    }
}
