//! MessagePusher trait: the registry of live real-time connections.
//!
//! The UI layer accepts sockets and hands the write side of each one over as
//! a [`PusherChannel`]; only the pusher ever touches the set of channels.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError};

/// Outbound channel feeding one connection's socket writer
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Add a connection to the live set. Re-registering an id replaces its channel.
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// Remove a connection. Removing an unknown id is a no-op.
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// Send to a single connection
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// Send to every live connection, best effort.
    ///
    /// Returns the number of connections the message was handed to. Closed
    /// connections are skipped but stay registered until unregistered.
    async fn broadcast(&self, content: &str) -> usize;

    async fn connection_count(&self) -> usize;
}
