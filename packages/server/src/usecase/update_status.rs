//! UseCase: open/close a room

use std::sync::Arc;

use crate::domain::{Room, RoomId, RoomRepository};

use super::{broadcast_rooms::BroadcastRoomsUseCase, error::UpdateStatusError};

/// Room status update use case
pub struct UpdateStatusUseCase {
    repository: Arc<dyn RoomRepository>,
    broadcaster: Arc<BroadcastRoomsUseCase>,
}

impl UpdateStatusUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        broadcaster: Arc<BroadcastRoomsUseCase>,
    ) -> Self {
        Self {
            repository,
            broadcaster,
        }
    }

    /// Open or close a room and broadcast the new snapshot.
    ///
    /// Status changes never alert subscribers.
    pub async fn execute(&self, room_id: RoomId, is_open: bool) -> Result<Room, UpdateStatusError> {
        let room = self.repository.update_status(room_id, is_open).await?;
        tracing::info!(
            "Room {} is now {}",
            room_id,
            if is_open { "open" } else { "closed" }
        );

        self.broadcaster.execute_or_log().await;
        Ok(room)
    }
}
