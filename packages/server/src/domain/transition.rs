//! Threshold-crossing detection for occupancy changes.
//!
//! A room is full when its headcount is at or above its capacity. Only a
//! change of that full/not-full state is a transition; movement on one side
//! of the threshold (e.g. 5 → 6 in a room of 10) is not.

use super::{entity::OccupancyUpdate, value_object::RoomId};

/// Classification of one occupancy change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    BecameFull,
    BecameAvailable,
    NoTransition,
}

/// Classify an occupancy change against a capacity.
///
/// Pure and total: the same inputs always give the same answer.
pub fn detect(previous_occupancy: u32, new_occupancy: u32, max_capacity: u32) -> Transition {
    let was_full = previous_occupancy >= max_capacity;
    let is_full = new_occupancy >= max_capacity;

    if !was_full && is_full {
        Transition::BecameFull
    } else if was_full && !is_full {
        Transition::BecameAvailable
    } else {
        Transition::NoTransition
    }
}

/// An occupancy change together with its classification.
///
/// Computed once per mutation and handed straight to notification dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionEvent {
    pub room_id: RoomId,
    pub previous_occupancy: u32,
    pub new_occupancy: u32,
    pub max_capacity: u32,
    pub transition: Transition,
}

impl TransitionEvent {
    pub fn new(
        room_id: RoomId,
        previous_occupancy: u32,
        new_occupancy: u32,
        max_capacity: u32,
    ) -> Self {
        Self {
            room_id,
            previous_occupancy,
            new_occupancy,
            max_capacity,
            transition: detect(previous_occupancy, new_occupancy, max_capacity),
        }
    }

    /// Build the event from the store's own before/after values.
    pub fn from_update(update: &OccupancyUpdate) -> Self {
        Self::new(
            update.room.id,
            update.previous_occupancy,
            update.room.current_occupancy,
            update.room.max_capacity.value(),
        )
    }
}
