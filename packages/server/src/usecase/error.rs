//! UseCase error types.

use thiserror::Error;

use crate::domain::{RepositoryError, RoomId};

/// Snapshot broadcast failure; affects only the attempt that raised it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BroadcastError {
    #[error("Failed to load rooms for snapshot: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Failed to serialize snapshot: {0}")]
    Serialization(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateOccupancyError {
    #[error("Room {0} not found")]
    RoomNotFound(RoomId),

    #[error("Occupancy cannot exceed maximum capacity of {max_capacity}")]
    CapacityExceeded { max_capacity: u32 },

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for UpdateOccupancyError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::RoomNotFound(room_id) => Self::RoomNotFound(room_id),
            RepositoryError::CapacityExceeded { max_capacity, .. } => {
                Self::CapacityExceeded { max_capacity }
            }
            other => Self::Repository(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateStatusError {
    #[error("Room {0} not found")]
    RoomNotFound(RoomId),

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for UpdateStatusError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::RoomNotFound(room_id) => Self::RoomNotFound(room_id),
            other => Self::Repository(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscribeError {
    #[error("Room {0} not found")]
    RoomNotFound(RoomId),

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for SubscribeError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::RoomNotFound(room_id) => Self::RoomNotFound(room_id),
            other => Self::Repository(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomHistoryError {
    #[error("Room {0} not found")]
    RoomNotFound(RoomId),

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for GetRoomHistoryError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::RoomNotFound(room_id) => Self::RoomNotFound(room_id),
            other => Self::Repository(other),
        }
    }
}
