//! KidZone room occupancy server library.
//!
//! Staff update per-room headcounts, every connected browser receives a full
//! room snapshot after each change, and subscribers are alerted when a room
//! becomes full or has space again.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
