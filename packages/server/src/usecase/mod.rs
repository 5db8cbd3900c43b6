//! UseCase layer
//!
//! Each use case depends only on the domain traits; concrete stores, the
//! pusher and the notifier are injected as `Arc<dyn Trait>`.

mod broadcast_rooms;
mod connect_client;
mod disconnect_client;
mod dispatch_notifications;
mod error;
mod get_room_history;
mod get_rooms;
mod reset_occupancy;
mod subscribe;
mod update_occupancy;
mod update_status;

pub use broadcast_rooms::BroadcastRoomsUseCase;
pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use dispatch_notifications::{DispatchReport, NotificationDispatcher};
pub use error::{
    BroadcastError, GetRoomHistoryError, SubscribeError, UpdateOccupancyError, UpdateStatusError,
};
pub use get_room_history::GetRoomHistoryUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use reset_occupancy::ResetOccupancyUseCase;
pub use subscribe::SubscribeUseCase;
pub use update_occupancy::{OccupancyOutcome, UpdateOccupancyUseCase};
pub use update_status::UpdateStatusUseCase;
