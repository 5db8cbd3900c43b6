//! Notifier trait: outbound alert delivery (email, SMS, push).

use async_trait::async_trait;

use super::{Contact, NotificationError};

/// A rendered alert ready for a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub contact: Contact,
    pub subject: String,
    pub body: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError>;
}
