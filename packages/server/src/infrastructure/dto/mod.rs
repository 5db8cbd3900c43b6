//! Data Transfer Objects (DTOs) for the KidZone server.
//!
//! DTOs are organized by protocol:
//! - `websocket`: real-time snapshot messages
//! - `http`: HTTP API request and response bodies

pub mod conversion;
pub mod http;
pub mod websocket;
