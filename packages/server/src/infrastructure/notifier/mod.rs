//! Notifier implementations
//!
//! - `log`: writes alerts to the tracing log instead of a provider

pub mod log;

pub use log::LogNotifier;
