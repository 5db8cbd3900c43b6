//! Message push (real-time delivery) implementations
//!
//! - `websocket`: WebSocket connection registry

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
