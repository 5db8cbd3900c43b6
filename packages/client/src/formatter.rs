//! Output formatting for the watcher board and the staff console.

use kidzone_server::infrastructure::dto::{http::OccupancyChangeDto, websocket::RoomDto};

use crate::domain::room_status;

const RULE: &str = "============================================================\n";

/// Formatter for client display
pub struct BoardFormatter;

impl BoardFormatter {
    /// Format one room as a single board line
    ///
    /// # Example
    ///
    /// `[1] Main KidZone               10/20  AVAILABLE`
    pub fn format_room(room: &RoomDto) -> String {
        format!(
            "[{}] {:<24} {:>3}/{:<3} {}",
            room.id,
            room.name,
            room.current_occupancy,
            room.max_capacity,
            room_status(room).label()
        )
    }

    /// Format a full snapshot as a board
    pub fn format_board(rooms: &[RoomDto]) -> String {
        let mut output = String::new();
        output.push('\n');
        output.push_str(RULE);
        output.push_str("KidZone rooms\n");

        if rooms.is_empty() {
            output.push_str("(No rooms)\n");
        } else {
            for room in rooms {
                output.push_str(&Self::format_room(room));
                if let Some(last_reset) = &room.last_reset {
                    output.push_str(&format!(" (reset {})", last_reset));
                }
                output.push('\n');
            }
        }

        output.push_str(RULE);
        output
    }

    /// Format occupancy history, oldest first
    pub fn format_history(history: &[OccupancyChangeDto]) -> String {
        if history.is_empty() {
            return "(No changes recorded)\n".to_string();
        }
        history
            .iter()
            .map(|change| {
                format!(
                    "{}  {} -> {}\n",
                    change.timestamp, change.previous_occupancy, change.new_occupancy
                )
            })
            .collect()
    }

    /// Format a message that is not a room snapshot
    pub fn format_raw_message(text: &str) -> String {
        format!("\nUnrecognized message: {}\n", text)
    }
}
