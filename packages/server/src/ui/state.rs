//! Shared application state.

use std::sync::Arc;

use kidzone_shared::time::Clock;

use crate::{
    domain::{MessagePusher, Notifier, RoomRepository, SubscriptionRepository},
    usecase::{
        BroadcastRoomsUseCase, ConnectClientUseCase, DisconnectClientUseCase,
        GetRoomHistoryUseCase, GetRoomsUseCase, NotificationDispatcher, ResetOccupancyUseCase,
        SubscribeUseCase, UpdateOccupancyUseCase, UpdateStatusUseCase,
    },
};

/// Shared application state: one instance of every use case
pub struct AppState {
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    pub get_room_history_usecase: Arc<GetRoomHistoryUseCase>,
    pub update_occupancy_usecase: Arc<UpdateOccupancyUseCase>,
    pub update_status_usecase: Arc<UpdateStatusUseCase>,
    pub reset_occupancy_usecase: Arc<ResetOccupancyUseCase>,
    pub subscribe_usecase: Arc<SubscribeUseCase>,
}

impl AppState {
    /// Wire every use case from the infrastructure pieces.
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        subscription_repository: Arc<dyn SubscriptionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let broadcaster = Arc::new(BroadcastRoomsUseCase::new(
            room_repository.clone(),
            message_pusher.clone(),
        ));
        let dispatcher = Arc::new(NotificationDispatcher::new(
            room_repository.clone(),
            subscription_repository.clone(),
            notifier,
        ));

        Self {
            connect_client_usecase: Arc::new(ConnectClientUseCase::new(
                message_pusher.clone(),
                broadcaster.clone(),
            )),
            disconnect_client_usecase: Arc::new(DisconnectClientUseCase::new(message_pusher)),
            get_rooms_usecase: Arc::new(GetRoomsUseCase::new(room_repository.clone())),
            get_room_history_usecase: Arc::new(GetRoomHistoryUseCase::new(
                room_repository.clone(),
            )),
            update_occupancy_usecase: Arc::new(UpdateOccupancyUseCase::new(
                room_repository.clone(),
                dispatcher.clone(),
                broadcaster.clone(),
                clock.clone(),
            )),
            update_status_usecase: Arc::new(UpdateStatusUseCase::new(
                room_repository.clone(),
                broadcaster.clone(),
            )),
            reset_occupancy_usecase: Arc::new(ResetOccupancyUseCase::new(
                room_repository.clone(),
                dispatcher,
                broadcaster,
                clock,
            )),
            subscribe_usecase: Arc::new(SubscribeUseCase::new(
                room_repository,
                subscription_repository,
            )),
        }
    }
}
