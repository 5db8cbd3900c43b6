//! Infrastructure layer: concrete stores, the WebSocket pusher, alert
//! providers and wire DTOs.

pub mod dto;
pub mod message_pusher;
pub mod notifier;
pub mod repository;
