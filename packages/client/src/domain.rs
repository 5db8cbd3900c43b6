//! Client-side decisions kept free of I/O.

use kidzone_server::infrastructure::dto::websocket::RoomDto;

/// Display status of a room on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomStatus {
    Closed,
    Full,
    Available,
}

impl RoomStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RoomStatus::Closed => "CLOSED",
            RoomStatus::Full => "FULL",
            RoomStatus::Available => "AVAILABLE",
        }
    }
}

/// Classify a room; a closed room shows as closed whatever its headcount.
pub fn room_status(room: &RoomDto) -> RoomStatus {
    if !room.is_open {
        RoomStatus::Closed
    } else if room.current_occupancy >= room.max_capacity {
        RoomStatus::Full
    } else {
        RoomStatus::Available
    }
}

/// Check if the watcher should try to connect again.
///
/// # Arguments
///
/// * `failed_attempts` - Consecutive failures so far
/// * `max_attempts` - The maximum number of attempts allowed
pub fn should_attempt_reconnect(failed_attempts: u32, max_attempts: u32) -> bool {
    failed_attempts < max_attempts
}
