//! UseCase: administrative occupancy reset
//!
//! Empties every room (e.g. at closing time). Each reset goes through the
//! same detection and alerting as a staff update, so a full room that is
//! reset alerts its availability subscribers. One snapshot is broadcast at
//! the end.

use std::sync::Arc;

use kidzone_shared::time::Clock;

use crate::domain::{RepositoryError, Room, RoomRepository, Timestamp, TransitionEvent};

use super::{broadcast_rooms::BroadcastRoomsUseCase, dispatch_notifications::NotificationDispatcher};

/// Occupancy reset use case
pub struct ResetOccupancyUseCase {
    repository: Arc<dyn RoomRepository>,
    dispatcher: Arc<NotificationDispatcher>,
    broadcaster: Arc<BroadcastRoomsUseCase>,
    clock: Arc<dyn Clock>,
}

impl ResetOccupancyUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        dispatcher: Arc<NotificationDispatcher>,
        broadcaster: Arc<BroadcastRoomsUseCase>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            dispatcher,
            broadcaster,
            clock,
        }
    }

    /// Reset all rooms to zero occupancy.
    ///
    /// # Returns
    ///
    /// The rooms after the reset, ordered by id.
    pub async fn execute(&self) -> Result<Vec<Room>, RepositoryError> {
        let reset_at = Timestamp::new(self.clock.now_millis());
        let rooms = self.repository.get_rooms().await?;

        let mut reset_rooms = Vec::with_capacity(rooms.len());
        for room in rooms {
            let update = self.repository.reset_occupancy(room.id, reset_at).await?;
            let event = TransitionEvent::from_update(&update);
            self.dispatcher.dispatch(&event, &update.room).await;
            reset_rooms.push(update.room);
        }
        tracing::info!("Occupancy reset for {} room(s)", reset_rooms.len());

        self.broadcaster.execute_or_log().await;
        Ok(reset_rooms)
    }
}
