use crate::internal::error::AppError;

/// Severity of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    Info,
    Error,
}

/// A desktop notification: a title, a one-line subtitle and a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub subtitle: String,
    pub message: String,
    pub notification_type: NotificationType,
}

impl Notification {
    /// Create a new info notification
    pub fn info(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(title, subtitle, message, NotificationType::Info)
    }

    /// Create a new error notification
    pub fn error(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(title, subtitle, message, NotificationType::Error)
    }

    /// Notification for a failed top-story list fetch.
    pub fn fetch_failed(err: &AppError) -> Self {
        let message = match err {
            AppError::Api(_) => format!("Could not process top stories response: {err}"),
            _ => format!("Could not fetch top stories: {err}"),
        };
        Self::error("Hacker News App Error", err.category(), message)
    }

    fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        message: impl Into<String>,
        notification_type: NotificationType,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            message: message.into(),
            notification_type,
        }
    }
}

/// A blocking alert with a title and a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failed_uses_api_wording() {
        let n = Notification::fetch_failed(&AppError::Api("not an array".to_string()));
        assert_eq!(n.title, "Hacker News App Error");
        assert_eq!(n.subtitle, "API Error");
        assert!(n.message.starts_with("Could not process top stories response"));
        assert_eq!(n.notification_type, NotificationType::Error);
    }

    #[test]
    fn test_info() {
        let n = Notification::info("Settings Saved", "Interval: 60s", "Changes applied.");
        assert_eq!(n.notification_type, NotificationType::Info);
        assert_eq!(n.message, "Changes applied.");
    }
}
