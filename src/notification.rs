//! Transient status messages shown in the chrome

use std::time::{Duration, Instant};

const DEFAULT_DURATION: Duration = Duration::from_secs(4);
const ERROR_DURATION: Duration = Duration::from_secs(6);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    expires_at: Instant,
}

impl Notification {
    fn new(message: impl Into<String>, level: NotificationLevel, duration: Duration) -> Self {
        Self {
            message: message.into(),
            level,
            expires_at: Instant::now() + duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Holds the most recent notification; newer ones replace older ones.
#[derive(Debug, Default)]
pub struct NotificationState {
    current: Option<Notification>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.current = Some(Notification::new(
            message,
            NotificationLevel::Info,
            DEFAULT_DURATION,
        ));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.current = Some(Notification::new(
            message,
            NotificationLevel::Error,
            ERROR_DURATION,
        ));
    }

    /// The notification to render, dropping it once expired.
    pub fn current(&mut self) -> Option<&Notification> {
        if self.current.as_ref().is_some_and(Notification::is_expired) {
            self.current = None;
        }
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_replaces_older() {
        let mut state = NotificationState::new();
        state.info("saved");
        state.error("print failed");

        let current = state.current().unwrap();
        assert_eq!(current.message, "print failed");
        assert_eq!(current.level, NotificationLevel::Error);
    }

    #[test]
    fn test_clear() {
        let mut state = NotificationState::new();
        state.info("saved");
        state.clear();
        assert!(state.current().is_none());
    }
}
