//! KidZone occupancy server.
//!
//! Staff post headcounts over HTTP; every connected display receives the full
//! room list over WebSocket after each change.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kidzone-server
//! cargo run --bin kidzone-server -- --host 0.0.0.0 --port 3000 --log-level info
//! ```

use std::sync::Arc;

use clap::Parser;
use kidzone_server::{
    domain::{Capacity, RoomName, RoomRepository},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        notifier::LogNotifier,
        repository::{InMemoryRoomRepository, InMemorySubscriptionRepository},
    },
    ui::{AppState, Server},
};
use kidzone_shared::{logger::setup_logger, time::SystemClock};

/// Rooms created at startup: (name, max capacity, open)
const DEFAULT_ROOMS: [(&str, u32, bool); 2] =
    [("Main KidZone", 20, true), ("Overflow Room", 15, false)];

#[derive(Parser, Debug)]
#[command(name = "kidzone-server")]
#[command(about = "KidZone room occupancy server with live WebSocket updates", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "debug")]
    log_level: String,

    /// Start with no rooms instead of the default set
    #[arg(long)]
    no_seed: bool,
}

async fn seed_rooms(repository: &dyn RoomRepository) -> Result<(), Box<dyn std::error::Error>> {
    for (name, capacity, is_open) in DEFAULT_ROOMS {
        let room = repository
            .create_room(
                RoomName::new(name.to_string())?,
                Capacity::new(capacity)?,
                is_open,
            )
            .await?;
        tracing::info!(
            "Room {} '{}' created (capacity {}, {})",
            room.id,
            room.name.as_str(),
            room.max_capacity.value(),
            if room.is_open { "open" } else { "closed" }
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // 1. Repositories (in-memory)
    let room_repository = Arc::new(InMemoryRoomRepository::new());
    let subscription_repository = Arc::new(InMemorySubscriptionRepository::new());
    if !args.no_seed {
        if let Err(e) = seed_rooms(room_repository.as_ref()).await {
            tracing::error!("Failed to seed rooms: {}", e);
            std::process::exit(1);
        }
    }

    // 2. Outbound channels: WebSocket connections and alert delivery
    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let notifier = Arc::new(LogNotifier::new());

    // 3. UseCases
    let state = AppState::new(
        room_repository,
        subscription_repository,
        message_pusher,
        notifier,
        Arc::new(SystemClock),
    );

    // 4. Run the server
    let server = Server::new(state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
