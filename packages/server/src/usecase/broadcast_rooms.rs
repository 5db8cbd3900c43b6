//! UseCase: room snapshot broadcast
//!
//! Every broadcast re-reads the store and sends the complete room list, so a
//! client that missed one snapshot converges with the next.

use std::sync::Arc;

use crate::{
    domain::{MessagePusher, RoomRepository},
    infrastructure::dto::websocket::{RoomDto, RoomsUpdateMessage},
};

use super::error::BroadcastError;

/// Room snapshot broadcast use case
pub struct BroadcastRoomsUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl BroadcastRoomsUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Fetch the rooms once and push one `ROOMS_UPDATE` to every live
    /// connection.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - number of connections the snapshot was handed to
    /// * `Err(BroadcastError)` - the store could not be read; nothing was sent
    pub async fn execute(&self) -> Result<usize, BroadcastError> {
        let message = self.snapshot_message().await?;
        Ok(self.message_pusher.broadcast(&message).await)
    }

    /// Like [`execute`](Self::execute), but a failure is only logged.
    ///
    /// Used after mutations: the next mutation's broadcast is the retry.
    pub async fn execute_or_log(&self) {
        match self.execute().await {
            Ok(delivered) => tracing::debug!("Room snapshot delivered to {} client(s)", delivered),
            Err(e) => tracing::error!("Room snapshot broadcast failed: {}", e),
        }
    }

    /// Serialize the current room list as a `ROOMS_UPDATE` message.
    pub async fn snapshot_message(&self) -> Result<String, BroadcastError> {
        let rooms = self.repository.get_rooms().await?;
        let message = RoomsUpdateMessage::new(rooms.into_iter().map(RoomDto::from).collect());
        serde_json::to_string(&message).map_err(|e| BroadcastError::Serialization(e.to_string()))
    }
}
