//! Single-slot transient notification channel.
//!
//! Showing a message replaces whatever was visible. A message disappears on
//! its own once `dismiss_after` has elapsed; callers poll with the current
//! time rather than arming a timer.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub shown_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct Notifier {
    current: Option<Notification>,
    dismiss_after: Duration,
    enabled: bool,
}

impl Notifier {
    pub const DEFAULT_DISMISS_SECS: i64 = 3;

    pub fn new(dismiss_after: Duration, enabled: bool) -> Self {
        Self {
            current: None,
            dismiss_after,
            enabled,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, now: NaiveDateTime) {
        if !self.enabled {
            return;
        }
        let message = message.into();
        tracing::debug!(%message, "notification");
        self.current = Some(Notification {
            message,
            shown_at: now,
        });
    }

    /// The visible notification, or `None` once it has timed out.
    pub fn current(&self, now: NaiveDateTime) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|n| now - n.shown_at < self.dismiss_after)
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(Duration::seconds(Self::DEFAULT_DISMISS_SECS), true)
    }
}
