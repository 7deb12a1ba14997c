//! Notification sink for success and failure toasts.
//!
//! The engine never blocks on a failure; it reports it here and keeps the
//! form editable. Hosts plug their toast system in through [`Notifier`].

use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Forwards notifications to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success | NotificationLevel::Info => {
                tracing::info!(target: "clinic_scheduler::notify", "{}", notification.message)
            }
            NotificationLevel::Error => {
                tracing::warn!(target: "clinic_scheduler::notify", "{}", notification.message)
            }
        }
    }
}

/// Keeps every notification in memory; clones share the same log.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    log: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.log
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    pub fn errors(&self) -> Vec<String> {
        self.by_level(NotificationLevel::Error)
    }

    pub fn successes(&self) -> Vec<String> {
        self.by_level(NotificationLevel::Success)
    }

    pub fn clear(&self) {
        if let Ok(mut log) = self.log.lock() {
            log.clear();
        }
    }

    fn by_level(&self, level: NotificationLevel) -> Vec<String> {
        self.notifications()
            .into_iter()
            .filter(|n| n.level == level)
            .map(|n| n.message)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut log) = self.log.lock() {
            log.push(notification);
        }
    }
}
