//! Notification sinks for domain events.
//!
//! The service hands every successful operation's events to a
//! [`MatchNotifier`]; whether and how they are delivered is the sink's
//! business. The core never fails because a notification could not be sent.

use crate::models::Notification;

/// Receives domain-event notifications after successful match operations.
pub trait MatchNotifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Notifier that emits one structured log line per event.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl MatchNotifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        let payload = serde_json::to_string(notification).unwrap_or_default();
        tracing::info!(
            event = notification.event.kind(),
            event_id = %notification.event_id,
            %payload,
            "domain event"
        );
    }
}

/// Notifier that drops every event. Useful in tests and one-off tooling.
#[derive(Debug, Default)]
pub struct NoopNotifier;

impl NoopNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl MatchNotifier for NoopNotifier {
    fn notify(&self, _notification: &Notification) {}
}
