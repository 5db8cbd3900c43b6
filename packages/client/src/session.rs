//! WebSocket watch session.

use futures_util::StreamExt;
use kidzone_server::infrastructure::dto::websocket::RoomsUpdateMessage;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{error::ClientError, formatter::BoardFormatter, ui::print_block};

/// Run one watch session until the connection drops or Ctrl+C.
///
/// # Returns
///
/// * `Ok(())` - the user interrupted; do not reconnect
/// * `Err(ClientError::ConnectionError)` - connecting failed or the connection was lost
pub async fn run_watch_session(url: &str) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to {}", url);
    println!("\nWatching room occupancy. Press Ctrl+C to exit.\n");

    // The server never expects input; only the read half is used.
    let (_write, mut read) = ws_stream.split();

    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    match serde_json::from_str::<RoomsUpdateMessage>(&text) {
                        Ok(update) => print_block(&BoardFormatter::format_board(&update.rooms)),
                        Err(_) => print_block(&BoardFormatter::format_raw_message(&text)),
                    }
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut read_task => {
            Err(ClientError::ConnectionError("Connection lost".to_string()))
        }
        _ = tokio::signal::ctrl_c() => {
            read_task.abort();
            Ok(())
        }
    }
}
