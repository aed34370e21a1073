use crate::internal::notification::{Alert, Notification};

/// OS-facing side effects: notifications, alerts, the modal prompt and the browser.
///
/// The menu-bar shell provides the real implementation; tests record calls.
pub trait Desktop: Send + Sync {
    /// Non-blocking notification in the OS notification center.
    fn notify(&self, notification: Notification);

    /// Blocking alert that must be dismissed.
    fn alert(&self, alert: Alert);

    /// Modal text prompt. Returns `None` when the user cancels.
    fn prompt(&self, title: &str, message: &str, default_text: &str) -> Option<String>;

    /// Open a URL in the default browser.
    fn open_url(&self, url: &str) -> anyhow::Result<()>;
}

/// Desktop that only logs. Used by the headless shell where no UI exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDesktop;

impl Desktop for LogDesktop {
    fn notify(&self, notification: Notification) {
        tracing::info!(
            title = %notification.title,
            subtitle = %notification.subtitle,
            "notification: {}",
            notification.message
        );
    }

    fn alert(&self, alert: Alert) {
        tracing::warn!(title = %alert.title, "alert: {}", alert.message);
    }

    fn prompt(&self, title: &str, _message: &str, _default_text: &str) -> Option<String> {
        tracing::info!(title, "prompt unavailable without a desktop session");
        None
    }

    fn open_url(&self, url: &str) -> anyhow::Result<()> {
        open::that(url)?;
        Ok(())
    }
}
