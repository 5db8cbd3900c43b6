//! UseCase: room list

use std::sync::Arc;

use crate::domain::{RepositoryError, Room, RoomRepository};

/// Room list use case
pub struct GetRoomsUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// All rooms, ordered by id
    pub async fn execute(&self) -> Result<Vec<Room>, RepositoryError> {
        self.repository.get_rooms().await
    }
}
