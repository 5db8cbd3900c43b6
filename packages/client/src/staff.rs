//! Staff console: line commands sent to the HTTP API.

use kidzone_server::infrastructure::dto::{
    http::{ErrorResponse, OccupancyChangeDto, UpdateOccupancyRequest, UpdateStatusRequest},
    websocket::RoomDto,
};
use rustyline::{DefaultEditor, error::ReadlineError};
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::mpsc;

use crate::{error::ClientError, formatter::BoardFormatter, ui::print_block};

const PROMPT: &str = "staff> ";

const HELP: &str = "\
Commands:
  rooms                      list rooms
  occupancy <id> <count>     set the headcount of a room
  status <id> open|closed    open or close a room
  history <id>               show occupancy changes of a room
  reset                      set every room to zero
  help                       show this help
  quit                       exit
";

/// A parsed console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaffCommand {
    Rooms,
    Occupancy { room_id: u32, occupancy: i64 },
    Status { room_id: u32, is_open: bool },
    History { room_id: u32 },
    Reset,
    Help,
    Quit,
}

impl StaffCommand {
    /// Parse a console line.
    ///
    /// Negative counts pass through so the server can reject them.
    pub fn parse(line: &str) -> Result<Self, ClientError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            ["rooms"] => Ok(StaffCommand::Rooms),
            ["occupancy", room_id, occupancy] => Ok(StaffCommand::Occupancy {
                room_id: parse_room_id(room_id)?,
                occupancy: occupancy.parse().map_err(|_| {
                    ClientError::InvalidCommand(format!("'{}' is not a number", occupancy))
                })?,
            }),
            ["status", room_id, state] => {
                let is_open = match *state {
                    "open" => true,
                    "closed" => false,
                    other => {
                        return Err(ClientError::InvalidCommand(format!(
                            "status must be 'open' or 'closed', got '{}'",
                            other
                        )));
                    }
                };
                Ok(StaffCommand::Status {
                    room_id: parse_room_id(room_id)?,
                    is_open,
                })
            }
            ["history", room_id] => Ok(StaffCommand::History {
                room_id: parse_room_id(room_id)?,
            }),
            ["reset"] => Ok(StaffCommand::Reset),
            ["help"] => Ok(StaffCommand::Help),
            ["quit"] | ["exit"] => Ok(StaffCommand::Quit),
            _ => Err(ClientError::InvalidCommand(format!(
                "'{}' (type 'help')",
                line.trim()
            ))),
        }
    }
}

fn parse_room_id(value: &str) -> Result<u32, ClientError> {
    value
        .parse()
        .map_err(|_| ClientError::InvalidCommand(format!("'{}' is not a room id", value)))
}

/// HTTP client for the KidZone API
pub struct StaffClient {
    http: reqwest::Client,
    base_url: String,
}

impl StaffClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn get_rooms(&self) -> Result<Vec<RoomDto>, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/rooms", self.base_url))
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn get_history(&self, room_id: u32) -> Result<Vec<OccupancyChangeDto>, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/rooms/{}/history", self.base_url, room_id))
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn set_occupancy(&self, room_id: u32, occupancy: i64) -> Result<RoomDto, ClientError> {
        self.post(
            &format!("/api/rooms/{}/occupancy", room_id),
            &UpdateOccupancyRequest { occupancy },
        )
        .await
    }

    pub async fn set_status(&self, room_id: u32, is_open: bool) -> Result<RoomDto, ClientError> {
        self.post(
            &format!("/api/rooms/{}/status", room_id),
            &UpdateStatusRequest { is_open },
        )
        .await
    }

    pub async fn reset(&self) -> Result<Vec<RoomDto>, ClientError> {
        self.post("/api/rooms/reset", &serde_json::json!({})).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        parse_response(response).await
    }

    /// Execute one command and return what to print.
    pub async fn execute(&self, command: &StaffCommand) -> Result<String, ClientError> {
        match command {
            StaffCommand::Rooms => Ok(BoardFormatter::format_board(&self.get_rooms().await?)),
            StaffCommand::Occupancy { room_id, occupancy } => {
                let room = self.set_occupancy(*room_id, *occupancy).await?;
                Ok(format!("{}\n", BoardFormatter::format_room(&room)))
            }
            StaffCommand::Status { room_id, is_open } => {
                let room = self.set_status(*room_id, *is_open).await?;
                Ok(format!("{}\n", BoardFormatter::format_room(&room)))
            }
            StaffCommand::History { room_id } => Ok(BoardFormatter::format_history(
                &self.get_history(*room_id).await?,
            )),
            StaffCommand::Reset => Ok(BoardFormatter::format_board(&self.reset().await?)),
            StaffCommand::Help => Ok(HELP.to_string()),
            StaffCommand::Quit => Ok(String::new()),
        }
    }
}

/// Decode a success body, or turn the `{"message": ...}` error body into `Rejected`.
async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.message,
        Err(_) => status.to_string(),
    };
    Err(ClientError::Rejected {
        status: status.as_u16(),
        message,
    })
}

/// Run the interactive staff console until `quit`, Ctrl+C or Ctrl+D
pub async fn run_staff_console(base_url: String) -> Result<(), ClientError> {
    let client = StaffClient::new(base_url);
    println!("\nKidZone staff console. Type 'help' for commands.\n");

    let (line_tx, mut line_rx) = mpsc::unbounded_channel::<String>();
    // The readline thread waits for this before prompting again, so output
    // never interleaves with the prompt.
    let (done_tx, done_rx) = std::sync::mpsc::channel::<()>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line).ok();
                    if line_tx.send(line.to_string()).is_err() || done_rx.recv().is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    while let Some(line) = line_rx.recv().await {
        match StaffCommand::parse(&line) {
            Ok(StaffCommand::Quit) => break,
            Ok(command) => match client.execute(&command).await {
                Ok(output) => print_block(&output),
                Err(e) => println!("{}", e),
            },
            Err(e) => println!("{}", e),
        }
        if done_tx.send(()).is_err() {
            break;
        }
    }

    Ok(())
}
