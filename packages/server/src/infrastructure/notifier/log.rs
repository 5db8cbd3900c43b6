//! Notifier that records alerts in the log.
//!
//! Stands in for the email/SMS/push providers, whose transports live outside
//! this server.

use async_trait::async_trait;

use crate::domain::{Notification, NotificationError, Notifier};

#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        tracing::info!(
            channel = notification.contact.channel(),
            recipient = notification.contact.address(),
            subject = %notification.subject,
            "{}",
            notification.body
        );
        Ok(())
    }
}
