//! KidZone command-line client.
//!
//! - `watch`: live room board fed by the WebSocket snapshot stream
//! - `staff`: console that updates rooms through the HTTP API

pub mod domain;
pub mod error;
pub mod formatter;
pub mod runner;
mod session;
pub mod staff;
mod ui;

pub use runner::run_watch;
pub use staff::run_staff_console;
