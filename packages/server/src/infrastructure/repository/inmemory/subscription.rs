//! In-memory Subscription repository implementation

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Contact, RepositoryError, RoomId, Subscription, SubscriptionId, SubscriptionKind,
    SubscriptionRepository,
};

struct SubscriptionTable {
    subscriptions: BTreeMap<SubscriptionId, Subscription>,
    next_id: u32,
}

/// In-memory Subscription repository
///
/// Does not check that `room_id` exists; the subscribe use case does.
pub struct InMemorySubscriptionRepository {
    table: Mutex<SubscriptionTable>,
}

impl InMemorySubscriptionRepository {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(SubscriptionTable {
                subscriptions: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemorySubscriptionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn add_subscription(
        &self,
        room_id: RoomId,
        kind: SubscriptionKind,
        contact: Contact,
    ) -> Result<Subscription, RepositoryError> {
        let mut table = self.table.lock().await;
        let id = SubscriptionId::new(table.next_id);
        table.next_id += 1;

        let subscription = Subscription {
            id,
            room_id,
            kind,
            contact,
        };
        table.subscriptions.insert(id, subscription.clone());
        Ok(subscription)
    }

    async fn get_subscriptions(
        &self,
        room_id: RoomId,
    ) -> Result<Vec<Subscription>, RepositoryError> {
        let table = self.table.lock().await;
        Ok(table
            .subscriptions
            .values()
            .filter(|s| s.room_id == room_id)
            .cloned()
            .collect())
    }

    async fn take_subscriptions(
        &self,
        room_id: RoomId,
        kind: SubscriptionKind,
    ) -> Result<Vec<Subscription>, RepositoryError> {
        let mut table = self.table.lock().await;
        let ids: Vec<SubscriptionId> = table
            .subscriptions
            .values()
            .filter(|s| s.room_id == room_id && s.kind == kind)
            .map(|s| s.id)
            .collect();
        Ok(ids
            .into_iter()
            .filter_map(|id| table.subscriptions.remove(&id))
            .collect())
    }
}
