//! Domain entities.

use super::{
    error::RoomError,
    value_object::{Capacity, Contact, RoomId, RoomName, SubscriptionId, Timestamp},
};

/// A capacity-limited space tracked by headcount and open/closed status.
///
/// `current_occupancy` never exceeds `max_capacity`: [`Room::set_occupancy`]
/// is the only mutator and refuses values above the limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub name: RoomName,
    pub current_occupancy: u32,
    pub max_capacity: Capacity,
    pub is_open: bool,
    pub last_reset: Option<Timestamp>,
}

impl Room {
    /// Create an empty room
    pub fn new(id: RoomId, name: RoomName, max_capacity: Capacity, is_open: bool) -> Self {
        Self {
            id,
            name,
            current_occupancy: 0,
            max_capacity,
            is_open,
            last_reset: None,
        }
    }

    pub fn is_full(&self) -> bool {
        self.current_occupancy >= self.max_capacity.value()
    }

    /// Free spots left before the room is full
    pub fn spots_available(&self) -> u32 {
        self.max_capacity
            .value()
            .saturating_sub(self.current_occupancy)
    }

    /// Set the headcount and return the previous one.
    pub fn set_occupancy(&mut self, occupancy: u32) -> Result<u32, RoomError> {
        let max_capacity = self.max_capacity.value();
        if occupancy > max_capacity {
            return Err(RoomError::OccupancyExceedsCapacity {
                occupancy,
                max_capacity,
            });
        }
        Ok(std::mem::replace(&mut self.current_occupancy, occupancy))
    }

    /// Administrative reset: empty the room and stamp the reset time.
    pub fn reset(&mut self, reset_at: Timestamp) -> u32 {
        self.last_reset = Some(reset_at);
        std::mem::replace(&mut self.current_occupancy, 0)
    }
}

/// Result of an atomic occupancy mutation: the committed previous headcount
/// together with the room as stored afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyUpdate {
    pub previous_occupancy: u32,
    pub room: Room,
}

/// One entry of a room's occupancy history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyChange {
    pub room_id: RoomId,
    pub previous_occupancy: u32,
    pub new_occupancy: u32,
    pub changed_at: Timestamp,
}

/// Which threshold crossing a subscription listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubscriptionKind {
    /// Fires every time the room becomes full
    Full,
    /// Fires once when the room has space again, then is removed
    Available,
}

impl SubscriptionKind {
    /// One-shot subscriptions are consumed by the alert that fires them.
    pub fn is_one_shot(&self) -> bool {
        *self == SubscriptionKind::Available
    }
}

/// Alert subscription for a single room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub room_id: RoomId,
    pub kind: SubscriptionKind,
    pub contact: Contact,
}
