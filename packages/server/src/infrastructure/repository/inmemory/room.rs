//! In-memory Room repository implementation
//!
//! Implements the domain's `RoomRepository` trait over a `BTreeMap` guarded by
//! a single mutex. Every mutation takes the lock once for its whole
//! read-modify-write, which is what serializes concurrent updates of the same
//! room.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Capacity, OccupancyChange, OccupancyUpdate, RepositoryError, Room, RoomError, RoomId,
    RoomName, RoomRepository, Timestamp,
};

#[derive(Default)]
struct RoomTable {
    rooms: BTreeMap<RoomId, Room>,
    history: Vec<OccupancyChange>,
    next_id: u32,
}

impl RoomTable {
    fn room_mut(&mut self, room_id: RoomId) -> Result<&mut Room, RepositoryError> {
        self.rooms
            .get_mut(&room_id)
            .ok_or(RepositoryError::RoomNotFound(room_id))
    }

    fn record(&mut self, update: &OccupancyUpdate, changed_at: Timestamp) {
        self.history.push(OccupancyChange {
            room_id: update.room.id,
            previous_occupancy: update.previous_occupancy,
            new_occupancy: update.room.current_occupancy,
            changed_at,
        });
    }
}

/// In-memory Room repository
pub struct InMemoryRoomRepository {
    table: Mutex<RoomTable>,
}

impl InMemoryRoomRepository {
    /// Create an empty repository; ids start at 1
    pub fn new() -> Self {
        Self {
            table: Mutex::new(RoomTable {
                next_id: 1,
                ..RoomTable::default()
            }),
        }
    }
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create_room(
        &self,
        name: RoomName,
        max_capacity: Capacity,
        is_open: bool,
    ) -> Result<Room, RepositoryError> {
        let mut table = self.table.lock().await;
        let id = RoomId::new(table.next_id);
        table.next_id += 1;

        let room = Room::new(id, name, max_capacity, is_open);
        table.rooms.insert(id, room.clone());
        tracing::debug!("Room {} '{}' created", id, room.name);
        Ok(room)
    }

    async fn get_rooms(&self) -> Result<Vec<Room>, RepositoryError> {
        let table = self.table.lock().await;
        Ok(table.rooms.values().cloned().collect())
    }

    async fn get_room(&self, room_id: RoomId) -> Result<Room, RepositoryError> {
        let table = self.table.lock().await;
        table
            .rooms
            .get(&room_id)
            .cloned()
            .ok_or(RepositoryError::RoomNotFound(room_id))
    }

    async fn update_occupancy(
        &self,
        room_id: RoomId,
        occupancy: u32,
        changed_at: Timestamp,
    ) -> Result<OccupancyUpdate, RepositoryError> {
        let mut table = self.table.lock().await;
        let room = table.room_mut(room_id)?;
        let previous_occupancy = room.set_occupancy(occupancy).map_err(|e| match e {
            RoomError::OccupancyExceedsCapacity { max_capacity, .. } => {
                RepositoryError::CapacityExceeded {
                    room_id,
                    max_capacity,
                }
            }
        })?;

        let update = OccupancyUpdate {
            previous_occupancy,
            room: room.clone(),
        };
        table.record(&update, changed_at);
        Ok(update)
    }

    async fn update_status(
        &self,
        room_id: RoomId,
        is_open: bool,
    ) -> Result<Room, RepositoryError> {
        let mut table = self.table.lock().await;
        let room = table.room_mut(room_id)?;
        room.is_open = is_open;
        Ok(room.clone())
    }

    async fn reset_occupancy(
        &self,
        room_id: RoomId,
        reset_at: Timestamp,
    ) -> Result<OccupancyUpdate, RepositoryError> {
        let mut table = self.table.lock().await;
        let room = table.room_mut(room_id)?;
        let previous_occupancy = room.reset(reset_at);

        let update = OccupancyUpdate {
            previous_occupancy,
            room: room.clone(),
        };
        table.record(&update, reset_at);
        Ok(update)
    }

    async fn get_history(&self, room_id: RoomId) -> Result<Vec<OccupancyChange>, RepositoryError> {
        let table = self.table.lock().await;
        if !table.rooms.contains_key(&room_id) {
            return Err(RepositoryError::RoomNotFound(room_id));
        }
        Ok(table
            .history
            .iter()
            .filter(|change| change.room_id == room_id)
            .cloned()
            .collect())
    }
}
