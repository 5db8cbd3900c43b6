//! Domain layer: entities, value objects, the transition detector and the
//! interfaces the use cases depend on.

pub mod entity;
pub mod error;
pub mod notifier;
pub mod pusher;
pub mod repository;
pub mod transition;
pub mod value_object;

pub use entity::{OccupancyChange, OccupancyUpdate, Room, Subscription, SubscriptionKind};
pub use error::{
    MessagePushError, NotificationError, RepositoryError, RoomError, ValueObjectError,
};
pub use notifier::{Notification, Notifier};
pub use pusher::{MessagePusher, PusherChannel};
pub use repository::{RoomRepository, SubscriptionRepository};
pub use transition::{Transition, TransitionEvent, detect};
pub use value_object::{
    Capacity, ConnectionId, Contact, RoomId, RoomName, SubscriptionId, Timestamp,
};
