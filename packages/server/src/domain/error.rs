//! Domain error types.

use thiserror::Error;

use super::value_object::RoomId;

/// Value object validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("Room name must not be empty")]
    EmptyRoomName,

    #[error("Room name must be at most {max} characters")]
    RoomNameTooLong { max: usize },

    #[error("Room capacity must be greater than zero")]
    ZeroCapacity,

    #[error("Invalid email address: '{0}'")]
    InvalidEmail(String),

    #[error("Invalid phone number: '{0}'")]
    InvalidPhoneNumber(String),

    #[error("Device token must not be empty")]
    EmptyDeviceToken,
}

/// Room invariant violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("Occupancy {occupancy} exceeds maximum capacity of {max_capacity}")]
    OccupancyExceedsCapacity { occupancy: u32, max_capacity: u32 },
}

/// Store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Room {0} not found")]
    RoomNotFound(RoomId),

    #[error("Occupancy cannot exceed maximum capacity of {max_capacity} (room {room_id})")]
    CapacityExceeded { room_id: RoomId, max_capacity: u32 },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while pushing to real-time connections
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Connection '{0}' not found")]
    ConnectionNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),
}

/// Errors raised by a notification provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    #[error("Delivery to {recipient} failed: {reason}")]
    DeliveryFailed { recipient: String, reason: String },
}
