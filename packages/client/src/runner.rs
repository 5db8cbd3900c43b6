//! Watcher execution logic with reconnection support.

use std::time::Duration;

use crate::{domain::should_attempt_reconnect, error::ClientError, session::run_watch_session};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the room board watcher with reconnection logic
pub async fn run_watch(url: String) -> Result<(), ClientError> {
    let mut failed_attempts = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} (attempt {}/{})",
            url,
            failed_attempts + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_watch_session(&url).await {
            Ok(()) => {
                tracing::info!("Watch session ended normally");
                return Ok(());
            }
            Err(e) => {
                tracing::warn!("{}", e);
                failed_attempts += 1;

                if !should_attempt_reconnect(failed_attempts, MAX_RECONNECT_ATTEMPTS) {
                    return Err(ClientError::ReconnectExhausted(MAX_RECONNECT_ATTEMPTS));
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    failed_attempts + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }
}
