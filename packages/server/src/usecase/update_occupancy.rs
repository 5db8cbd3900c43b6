//! UseCase: occupancy update
//!
//! store update (atomic, returns previous) → transition detection → alert
//! dispatch → snapshot broadcast. The broadcast runs whatever the alerts did.

use std::sync::Arc;

use kidzone_shared::time::Clock;

use crate::domain::{OccupancyUpdate, Room, RoomId, RoomRepository, Timestamp, TransitionEvent};

use super::{
    broadcast_rooms::BroadcastRoomsUseCase,
    dispatch_notifications::{DispatchReport, NotificationDispatcher},
    error::UpdateOccupancyError,
};

/// Result of a successful occupancy update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyOutcome {
    pub room: Room,
    pub event: TransitionEvent,
    pub report: DispatchReport,
}

/// Occupancy update use case
pub struct UpdateOccupancyUseCase {
    repository: Arc<dyn RoomRepository>,
    dispatcher: Arc<NotificationDispatcher>,
    broadcaster: Arc<BroadcastRoomsUseCase>,
    clock: Arc<dyn Clock>,
}

impl UpdateOccupancyUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        dispatcher: Arc<NotificationDispatcher>,
        broadcaster: Arc<BroadcastRoomsUseCase>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            dispatcher,
            broadcaster,
            clock,
        }
    }

    /// Set the headcount of a room.
    ///
    /// # Returns
    ///
    /// * `Ok(OccupancyOutcome)` - the stored room, its transition and the alert report
    /// * `Err(UpdateOccupancyError)` - unknown room or occupancy above capacity;
    ///   nothing was stored, alerted or broadcast
    pub async fn execute(
        &self,
        room_id: RoomId,
        occupancy: u32,
    ) -> Result<OccupancyOutcome, UpdateOccupancyError> {
        let changed_at = Timestamp::new(self.clock.now_millis());
        let update = self
            .repository
            .update_occupancy(room_id, occupancy, changed_at)
            .await?;

        Ok(self.on_occupancy_changed(update).await)
    }

    /// Handle a committed occupancy change: detect, alert, broadcast.
    pub async fn on_occupancy_changed(&self, update: OccupancyUpdate) -> OccupancyOutcome {
        let event = TransitionEvent::from_update(&update);
        tracing::info!(
            "Room {} occupancy {} → {} of {} ({:?})",
            event.room_id,
            event.previous_occupancy,
            event.new_occupancy,
            event.max_capacity,
            event.transition
        );

        let report = self.dispatcher.dispatch(&event, &update.room).await;
        self.broadcaster.execute_or_log().await;

        OccupancyOutcome {
            room: update.room,
            event,
            report,
        }
    }
}
