//! UseCase: real-time client connection
//!
//! Registers the connection with the pusher and hands it one snapshot of its
//! own, so a fresh client does not wait for the next mutation.

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel};

use super::broadcast_rooms::BroadcastRoomsUseCase;

/// Client connection use case
pub struct ConnectClientUseCase {
    message_pusher: Arc<dyn MessagePusher>,
    broadcaster: Arc<BroadcastRoomsUseCase>,
}

impl ConnectClientUseCase {
    pub fn new(
        message_pusher: Arc<dyn MessagePusher>,
        broadcaster: Arc<BroadcastRoomsUseCase>,
    ) -> Self {
        Self {
            message_pusher,
            broadcaster,
        }
    }

    /// Register a new connection.
    ///
    /// # Arguments
    ///
    /// * `sender` - channel feeding the connection's socket writer
    ///
    /// # Returns
    ///
    /// The id the connection must later be unregistered with.
    pub async fn execute(&self, sender: PusherChannel) -> ConnectionId {
        let connection_id = ConnectionId::generate();
        self.message_pusher
            .register_client(connection_id, sender)
            .await;

        match self.broadcaster.snapshot_message().await {
            Ok(snapshot) => {
                if let Err(e) = self.message_pusher.push_to(&connection_id, &snapshot).await {
                    tracing::warn!(
                        "Failed to send initial snapshot to '{}': {}",
                        connection_id,
                        e
                    );
                }
            }
            Err(e) => {
                tracing::warn!(
                    "No initial snapshot for '{}': {}",
                    connection_id,
                    e
                );
            }
        }

        connection_id
    }
}
