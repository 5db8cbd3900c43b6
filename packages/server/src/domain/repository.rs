//! Repository trait definitions
//!
//! The domain layer declares the data access it needs; the infrastructure
//! layer provides the implementations (dependency inversion).

use async_trait::async_trait;

use super::{
    Capacity, Contact, OccupancyChange, OccupancyUpdate, RepositoryError, Room, RoomId, RoomName,
    Subscription, SubscriptionKind, Timestamp,
};

/// Room store
///
/// The authoritative holder of room records. Mutations of one room are
/// serialized by the implementation, so the `previous_occupancy` returned by
/// [`RoomRepository::update_occupancy`] is always the last committed value.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Create a room with zero occupancy
    async fn create_room(
        &self,
        name: RoomName,
        max_capacity: Capacity,
        is_open: bool,
    ) -> Result<Room, RepositoryError>;

    /// All rooms, ordered by id
    async fn get_rooms(&self) -> Result<Vec<Room>, RepositoryError>;

    async fn get_room(&self, room_id: RoomId) -> Result<Room, RepositoryError>;

    /// Set the headcount of a room and record it in the history.
    ///
    /// Read, write and history append happen as one atomic step.
    async fn update_occupancy(
        &self,
        room_id: RoomId,
        occupancy: u32,
        changed_at: Timestamp,
    ) -> Result<OccupancyUpdate, RepositoryError>;

    async fn update_status(&self, room_id: RoomId, is_open: bool)
    -> Result<Room, RepositoryError>;

    /// Empty a room and stamp `last_reset`, atomically like `update_occupancy`.
    async fn reset_occupancy(
        &self,
        room_id: RoomId,
        reset_at: Timestamp,
    ) -> Result<OccupancyUpdate, RepositoryError>;

    /// Occupancy history of a room, oldest first
    async fn get_history(&self, room_id: RoomId) -> Result<Vec<OccupancyChange>, RepositoryError>;
}

/// Alert subscription store
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn add_subscription(
        &self,
        room_id: RoomId,
        kind: SubscriptionKind,
        contact: Contact,
    ) -> Result<Subscription, RepositoryError>;

    /// Subscriptions of a room, ordered by id
    async fn get_subscriptions(&self, room_id: RoomId)
    -> Result<Vec<Subscription>, RepositoryError>;

    /// Remove and return the subscriptions of a room with the given kind.
    ///
    /// Lookup and removal are one atomic step, so two callers never both
    /// receive the same subscription.
    async fn take_subscriptions(
        &self,
        room_id: RoomId,
        kind: SubscriptionKind,
    ) -> Result<Vec<Subscription>, RepositoryError>;
}
