//! UseCase: alert subscription

use std::sync::Arc;

use crate::domain::{Contact, RoomId, RoomRepository, Subscription, SubscriptionKind, SubscriptionRepository};

use super::error::SubscribeError;

/// Alert subscription use case
pub struct SubscribeUseCase {
    room_repository: Arc<dyn RoomRepository>,
    subscription_repository: Arc<dyn SubscriptionRepository>,
}

impl SubscribeUseCase {
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        subscription_repository: Arc<dyn SubscriptionRepository>,
    ) -> Self {
        Self {
            room_repository,
            subscription_repository,
        }
    }

    /// Subscribe `contact` to a room's full or available alerts.
    pub async fn execute(
        &self,
        room_id: RoomId,
        kind: SubscriptionKind,
        contact: Contact,
    ) -> Result<Subscription, SubscribeError> {
        self.room_repository.get_room(room_id).await?;

        let subscription = self
            .subscription_repository
            .add_subscription(room_id, kind, contact)
            .await?;
        tracing::info!(
            "Subscription {} added: room {} {:?} via {}",
            subscription.id.value(),
            room_id,
            kind,
            subscription.contact.channel()
        );
        Ok(subscription)
    }
}
