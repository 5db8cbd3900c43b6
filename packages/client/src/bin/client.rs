//! KidZone command-line client.
//!
//! `watch` shows a live room board and reconnects on disconnection (max 5
//! attempts with 5 second interval). `staff` opens a console that updates
//! rooms through the HTTP API.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kidzone-client -- watch
//! cargo run --bin kidzone-client -- watch --url ws://127.0.0.1:3000/ws
//! cargo run --bin kidzone-client -- staff --base-url http://127.0.0.1:8080
//! ```

use clap::{Parser, Subcommand};

use kidzone_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "kidzone-client")]
#[command(about = "KidZone room board watcher and staff console", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Default log level when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the live room board
    Watch {
        /// WebSocket server URL
        #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
        url: String,
    },
    /// Update rooms from an interactive console
    Staff {
        /// HTTP API base URL
        #[arg(short = 'b', long, default_value = "http://127.0.0.1:8080")]
        base_url: String,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let result = match args.command {
        Command::Watch { url } => kidzone_client::run_watch(url).await,
        Command::Staff { base_url } => kidzone_client::run_staff_console(base_url).await,
    };

    if let Err(e) = result {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
