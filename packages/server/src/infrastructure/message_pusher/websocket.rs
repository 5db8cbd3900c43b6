//! WebSocket MessagePusher implementation
//!
//! ## Responsibility
//!
//! - Own the registry of live connections (`ConnectionId` → `UnboundedSender`)
//! - Deliver messages to one connection (`push_to`) or to all (`broadcast`)
//!
//! ## Design notes
//!
//! Sockets are accepted in the UI layer (`ui/handler/websocket.rs`), which
//! spawns a writer task per socket and registers the write channel here.
//! Accepting sockets and delivering messages are thereby kept apart:
//! - UI layer: accept the upgrade, create the channel, unregister on close
//! - Infrastructure layer: hold the channels, send messages

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// WebSocket MessagePusher
///
/// The registry is the only shared mutable state of the hub; it is never
/// exposed, so all access goes through the `MessagePusher` methods.
pub struct WebSocketMessagePusher {
    clients: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(connection_id, sender);
        tracing::debug!(
            "Connection '{}' registered ({} live)",
            connection_id,
            clients.len()
        );
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        if clients.remove(connection_id).is_some() {
            tracing::debug!(
                "Connection '{}' unregistered ({} live)",
                connection_id,
                clients.len()
            );
        }
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        let sender = clients
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ConnectionNotFound(connection_id.to_string()))?;
        sender
            .send(content.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to connection '{}'", connection_id);
        Ok(())
    }

    async fn broadcast(&self, content: &str) -> usize {
        // Point-in-time copy: registrations racing with this broadcast neither
        // block it nor disturb the iteration.
        let targets: Vec<(ConnectionId, PusherChannel)> = {
            let clients = self.clients.lock().await;
            clients
                .iter()
                .map(|(id, sender)| (*id, sender.clone()))
                .collect()
        };

        let mut delivered = 0;
        for (connection_id, sender) in targets {
            if sender.is_closed() {
                tracing::debug!(
                    "Connection '{}' is closed, skipping broadcast",
                    connection_id
                );
                continue;
            }
            match sender.send(content.to_string()) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::warn!(
                        "Failed to push message to connection '{}': {}",
                        connection_id,
                        e
                    );
                }
            }
        }

        tracing::debug!("Broadcasted message to {} connection(s)", delivered);
        delivered
    }

    async fn connection_count(&self) -> usize {
        self.clients.lock().await.len()
    }
}
