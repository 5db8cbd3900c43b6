//! Request handlers.

pub mod http;
pub mod websocket;

pub use http::{
    create_subscription, get_room_history, get_rooms, health_check, reset_rooms,
    update_occupancy, update_status,
};
pub use websocket::websocket_handler;
