//! UseCase: occupancy history of a room

use std::sync::Arc;

use crate::domain::{OccupancyChange, RoomId, RoomRepository};

use super::error::GetRoomHistoryError;

/// Room history use case
pub struct GetRoomHistoryUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomHistoryUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// History of a room, oldest first
    pub async fn execute(&self, room_id: RoomId) -> Result<Vec<OccupancyChange>, GetRoomHistoryError> {
        Ok(self.repository.get_history(room_id).await?)
    }
}
