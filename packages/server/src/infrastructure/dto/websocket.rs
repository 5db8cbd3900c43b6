//! WebSocket message DTOs.
//!
//! The snapshot shape is consumed by browser clients and must stay
//! byte-compatible: `{"type":"ROOMS_UPDATE","rooms":[...]}` with camelCase
//! room fields.

use serde::{Deserialize, Serialize};

/// Message type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    RoomsUpdate,
}

/// Room as seen by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDto {
    pub id: u32,
    pub name: String,
    pub current_occupancy: u32,
    pub max_capacity: u32,
    pub is_open: bool,
    /// RFC 3339, omitted when the room was never reset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reset: Option<String>,
}

/// Full room snapshot pushed after every change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomsUpdateMessage {
    pub r#type: MessageType,
    pub rooms: Vec<RoomDto>,
}

impl RoomsUpdateMessage {
    pub fn new(rooms: Vec<RoomDto>) -> Self {
        Self {
            r#type: MessageType::RoomsUpdate,
            rooms,
        }
    }
}
