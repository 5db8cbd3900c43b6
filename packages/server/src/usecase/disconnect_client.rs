//! UseCase: real-time client disconnection

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher};

/// Client disconnection use case
pub struct DisconnectClientUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// Unregister a connection. Safe to call more than once.
    pub async fn execute(&self, connection_id: &ConnectionId) {
        self.message_pusher.unregister_client(connection_id).await;
    }

    /// Number of connections still registered
    pub async fn count_remaining_connections(&self) -> usize {
        self.message_pusher.connection_count().await
    }
}
