//! Shared utilities for the KidZone server and client.

pub mod logger;
pub mod time;
