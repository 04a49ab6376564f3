//! Notifications
//!
//! Transient user-facing messages produced by form submissions and the
//! dashboard workflows. Drivers decide how to show them: the browser UI
//! renders toasts, the CLI prints them.

use serde::{Deserialize, Serialize};

/// Message shown when the API cannot be reached at all.
pub const CONNECTIVITY_MESSAGE: &str = "Error al conectar con el servidor";

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// A single transient message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Notification {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: None,
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            description: None,
        }
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            title: title.into(),
            description: None,
        }
    }

    /// Attach a secondary line of text
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{} ({})", self.title, description),
            None => write!(f, "{}", self.title),
        }
    }
}

/// Sink for notifications emitted by workflows
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

impl Notifier for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_collects_notifications() {
        let mut sink: Vec<Notification> = Vec::new();
        sink.notify(Notification::success("ok"));
        sink.notify(Notification::error("bad").with_description("details"));

        assert_eq!(sink.len(), 2);
        assert!(!sink[0].is_error());
        assert!(sink[1].is_error());
        assert_eq!(sink[1].to_string(), "bad (details)");
    }
}
