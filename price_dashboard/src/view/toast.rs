use std::time::{Duration, Instant};

use chrono::Local;

use crate::view::severity::Severity;

pub const DEFAULT_TOAST_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub message: String,
    pub severity: Severity,
    /// Local time the toast was raised, for display.
    pub time: String,
    shown_at: Instant,
}

/// Holds at most one transient notification.
#[derive(Debug, Clone)]
pub struct ToastSlot {
    current: Option<Toast>,
    lifetime: Duration,
}

impl ToastSlot {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            current: None,
            lifetime,
        }
    }

    pub fn show(&mut self, title: impl Into<String>, message: impl Into<String>, severity: Severity) {
        self.show_at(title, message, severity, Instant::now());
    }

    /// Replaces whatever is showing.
    pub fn show_at(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        now: Instant,
    ) {
        self.current = Some(Toast {
            title: title.into(),
            message: message.into(),
            severity,
            time: Local::now().format("%H:%M:%S").to_string(),
            shown_at: now,
        });
    }

    /// Hides the toast once its lifetime has elapsed. Returns `true` if it
    /// was hidden by this call.
    pub fn expire(&mut self, now: Instant) -> bool {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|t| now.saturating_duration_since(t.shown_at) >= self.lifetime);
        if expired {
            self.current = None;
        }
        expired
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }
}

impl Default for ToastSlot {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_LIFETIME)
    }
}
