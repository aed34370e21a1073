use std::process::Command;

use rfd::{MessageButtons, MessageDialog, MessageLevel};

use crate::internal::desktop::Desktop;
use crate::internal::notification::{Alert, Notification, NotificationType};

/// Quote `text` as an AppleScript expression. Newlines become `linefeed`.
fn applescript_string(text: &str) -> String {
    text.split('\n')
        .map(|line| format!("\"{}\"", line.replace('\\', "\\\\").replace('"', "\\\"")))
        .collect::<Vec<_>>()
        .join(" & linefeed & ")
}

/// Notifications and prompts go through `osascript`; alerts use native dialogs.
pub struct MacDesktop;

impl Desktop for MacDesktop {
    fn notify(&self, notification: Notification) {
        let script = format!(
            "display notification {} with title {} subtitle {}",
            applescript_string(&notification.message),
            applescript_string(&notification.title),
            applescript_string(&notification.subtitle),
        );
        if let Err(e) = Command::new("osascript").arg("-e").arg(&script).spawn() {
            tracing::error!("Failed to post notification: {}", e);
        }
        if notification.notification_type == NotificationType::Error {
            tracing::warn!(subtitle = %notification.subtitle, "{}", notification.message);
        }
    }

    fn alert(&self, alert: Alert) {
        MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title(&alert.title)
            .set_description(&alert.message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }

    fn prompt(&self, title: &str, message: &str, default_text: &str) -> Option<String> {
        let script = format!(
            "text returned of (display dialog {} default answer {} with title {} buttons {{\"Cancel\", \"Save\"}} default button \"Save\" cancel button \"Cancel\")",
            applescript_string(message),
            applescript_string(default_text),
            applescript_string(title),
        );

        match Command::new("osascript").arg("-e").arg(&script).output() {
            // Cancel makes osascript exit non-zero (error -128).
            Ok(output) if output.status.success() => {
                let text = String::from_utf8_lossy(&output.stdout);
                Some(text.trim_end_matches(['\n', '\r']).to_string())
            }
            Ok(_) => None,
            Err(e) => {
                tracing::error!("Failed to show settings prompt: {}", e);
                None
            }
        }
    }

    fn open_url(&self, url: &str) -> anyhow::Result<()> {
        open::that(url)?;
        Ok(())
    }
}
