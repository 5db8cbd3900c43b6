//! In-memory stores backed by `tokio::sync::Mutex`.

pub mod room;
pub mod subscription;

pub use room::InMemoryRoomRepository;
pub use subscription::InMemorySubscriptionRepository;
