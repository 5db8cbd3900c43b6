//! UseCase: alert fan-out for threshold transitions
//!
//! Sends run concurrently in a `JoinSet`; each recipient succeeds or fails on
//! its own and failures are only logged, never returned to the caller.

use std::sync::Arc;

use tokio::task::JoinSet;

use crate::domain::{
    Notification, Notifier, Room, RoomRepository, Subscription, SubscriptionKind,
    SubscriptionRepository, Transition, TransitionEvent,
};

pub const ROOM_FULL_SUBJECT: &str = "KidZone Alert: Room Status Update";
pub const SPACE_AVAILABLE_SUBJECT: &str = "KidZone Alert: Space Available";

/// Outcome of one dispatch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Recipients a send was started for
    pub attempted: usize,
    /// Sends that returned an error or panicked
    pub failed: usize,
}

/// Alert dispatcher
pub struct NotificationDispatcher {
    room_repository: Arc<dyn RoomRepository>,
    subscription_repository: Arc<dyn SubscriptionRepository>,
    notifier: Arc<dyn Notifier>,
}

impl NotificationDispatcher {
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        subscription_repository: Arc<dyn SubscriptionRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            room_repository,
            subscription_repository,
            notifier,
        }
    }

    /// Alert the subscribers matching `event.transition`.
    ///
    /// `BecameFull` reaches `Full` subscriptions, `BecameAvailable` reaches
    /// `Available` subscriptions, which are removed from the store before
    /// sending and stay removed whatever the delivery outcome.
    /// `NoTransition` sends nothing.
    pub async fn dispatch(&self, event: &TransitionEvent, room: &Room) -> DispatchReport {
        let kind = match event.transition {
            Transition::BecameFull => SubscriptionKind::Full,
            Transition::BecameAvailable => SubscriptionKind::Available,
            Transition::NoTransition => return DispatchReport::default(),
        };

        // One-shot subscriptions are claimed before any send starts, so an
        // overlapping transition on the same room cannot fire them again.
        let loaded = if kind.is_one_shot() {
            self.subscription_repository
                .take_subscriptions(event.room_id, kind)
                .await
        } else {
            self.subscription_repository
                .get_subscriptions(event.room_id)
                .await
                .map(|subscriptions| {
                    subscriptions
                        .into_iter()
                        .filter(|s| s.kind == kind)
                        .collect()
                })
        };
        let subscriptions: Vec<Subscription> = match loaded {
            Ok(subscriptions) => subscriptions,
            Err(e) => {
                tracing::warn!(
                    "Failed to load subscriptions for room {}: {}",
                    event.room_id,
                    e
                );
                return DispatchReport::default();
            }
        };
        if subscriptions.is_empty() {
            return DispatchReport::default();
        }

        let (subject, body) = match kind {
            SubscriptionKind::Full => {
                let alternatives = self.other_open_rooms(room).await;
                (ROOM_FULL_SUBJECT, room_full_message(room, &alternatives))
            }
            SubscriptionKind::Available => (
                SPACE_AVAILABLE_SUBJECT,
                space_available_message(room, event.max_capacity - event.new_occupancy),
            ),
        };

        let mut tasks = JoinSet::new();
        for subscription in &subscriptions {
            let notifier = Arc::clone(&self.notifier);
            let notification = Notification {
                contact: subscription.contact.clone(),
                subject: subject.to_string(),
                body: body.clone(),
            };
            tasks.spawn(async move {
                let result = notifier.send(&notification).await;
                (notification.contact, result)
            });
        }

        let mut report = DispatchReport {
            attempted: subscriptions.len(),
            failed: 0,
        };
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((contact, Ok(()))) => {
                    tracing::debug!("Alert for room {} sent to {}", event.room_id, contact);
                }
                Ok((contact, Err(e))) => {
                    report.failed += 1;
                    tracing::warn!("Alert for room {} to {} failed: {}", event.room_id, contact, e);
                }
                Err(e) => {
                    report.failed += 1;
                    tracing::error!("Alert task for room {} aborted: {}", event.room_id, e);
                }
            }
        }

        tracing::info!(
            "Room {} {:?}: {} alert(s) sent, {} failed",
            event.room_id,
            event.transition,
            report.attempted - report.failed,
            report.failed
        );
        report
    }

    /// Names of the other rooms that are open, for the "room full" alert.
    async fn other_open_rooms(&self, room: &Room) -> Vec<String> {
        match self.room_repository.get_rooms().await {
            Ok(rooms) => rooms
                .into_iter()
                .filter(|r| r.id != room.id && r.is_open)
                .map(|r| r.name.into_string())
                .collect(),
            Err(e) => {
                tracing::warn!("Failed to load alternative rooms: {}", e);
                Vec::new()
            }
        }
    }
}

fn room_full_message(room: &Room, alternatives: &[String]) -> String {
    if alternatives.is_empty() {
        format!(
            "The {} is now full. No other rooms are currently available.",
            room.name
        )
    } else {
        format!(
            "The {} is now full. Other rooms are available: {}",
            room.name,
            alternatives.join(", ")
        )
    }
}

fn space_available_message(room: &Room, spots: u32) -> String {
    let plural = if spots > 1 { "s" } else { "" };
    format!("{} now has {} spot{} available", room.name, spots, plural)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };

    use crate::{
        domain::{
            Capacity, Contact, NotificationError, RoomName, Timestamp, notifier::MockNotifier,
        },
        infrastructure::{
            notifier::LogNotifier,
            repository::{InMemoryRoomRepository, InMemorySubscriptionRepository},
        },
    };

    struct Fixture {
        rooms: Arc<InMemoryRoomRepository>,
        subscriptions: Arc<InMemorySubscriptionRepository>,
        main: Room,
    }

    async fn create_fixture() -> Fixture {
        let rooms = Arc::new(InMemoryRoomRepository::new());
        let main = rooms
            .create_room(
                RoomName::new("Main KidZone".to_string()).unwrap(),
                Capacity::new(10).unwrap(),
                true,
            )
            .await
            .unwrap();
        Fixture {
            rooms,
            subscriptions: Arc::new(InMemorySubscriptionRepository::new()),
            main,
        }
    }

    async fn subscribe(fixture: &Fixture, kind: SubscriptionKind, address: &str) {
        fixture
            .subscriptions
            .add_subscription(
                fixture.main.id,
                kind,
                Contact::email(address.to_string()).unwrap(),
            )
            .await
            .unwrap();
    }

    async fn set_occupancy(fixture: &Fixture, occupancy: u32) -> (TransitionEvent, Room) {
        let update = fixture
            .rooms
            .update_occupancy(fixture.main.id, occupancy, Timestamp::new(0))
            .await
            .unwrap();
        (TransitionEvent::from_update(&update), update.room)
    }

    #[tokio::test]
    async fn test_became_full_alerts_full_subscribers_only() {
        // given:
        let fixture = create_fixture().await;
        subscribe(&fixture, SubscriptionKind::Full, "full@example.com").await;
        subscribe(&fixture, SubscriptionKind::Available, "avail@example.com").await;
        fixture
            .rooms
            .create_room(
                RoomName::new("Overflow Room".to_string()).unwrap(),
                Capacity::new(15).unwrap(),
                true,
            )
            .await
            .unwrap();
        set_occupancy(&fixture, 9).await;
        let (event, room) = set_occupancy(&fixture, 10).await;

        let mut notifier = MockNotifier::new();
        notifier
            .expect_send()
            .withf(|n: &Notification| {
                n.contact == Contact::Email("full@example.com".to_string())
                    && n.subject == ROOM_FULL_SUBJECT
                    && n.body
                        == "The Main KidZone is now full. Other rooms are available: Overflow Room"
            })
            .times(1)
            .returning(|_| Ok(()));
        let dispatcher = NotificationDispatcher::new(
            fixture.rooms.clone(),
            fixture.subscriptions.clone(),
            Arc::new(notifier),
        );

        // when:
        let report = dispatcher.dispatch(&event, &room).await;

        // then: full subscriptions are kept
        assert_eq!(
            report,
            DispatchReport {
                attempted: 1,
                failed: 0
            }
        );
        let remaining = fixture
            .subscriptions
            .get_subscriptions(fixture.main.id)
            .await
            .unwrap();
        assert_eq!(remaining.len(), 2);
    }

    #[tokio::test]
    async fn test_became_available_consumes_one_shot_subscriptions() {
        // given:
        let fixture = create_fixture().await;
        subscribe(&fixture, SubscriptionKind::Full, "full@example.com").await;
        subscribe(&fixture, SubscriptionKind::Available, "avail@example.com").await;
        set_occupancy(&fixture, 10).await;
        let (event, room) = set_occupancy(&fixture, 8).await;

        let mut notifier = MockNotifier::new();
        notifier
            .expect_send()
            .withf(|n: &Notification| {
                n.subject == SPACE_AVAILABLE_SUBJECT
                    && n.body == "Main KidZone now has 2 spots available"
            })
            .times(1)
            .returning(|_| Ok(()));
        let dispatcher = NotificationDispatcher::new(
            fixture.rooms.clone(),
            fixture.subscriptions.clone(),
            Arc::new(notifier),
        );

        // when:
        let report = dispatcher.dispatch(&event, &room).await;

        // then: the available subscription is gone, the full one remains
        assert_eq!(report.attempted, 1);
        let remaining = fixture
            .subscriptions
            .get_subscriptions(fixture.main.id)
            .await
            .unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].kind, SubscriptionKind::Full);
    }

    #[tokio::test]
    async fn test_no_transition_sends_nothing() {
        // given:
        let fixture = create_fixture().await;
        subscribe(&fixture, SubscriptionKind::Full, "full@example.com").await;
        let (event, room) = set_occupancy(&fixture, 5).await;

        let mut notifier = MockNotifier::new();
        notifier.expect_send().times(0);
        let dispatcher = NotificationDispatcher::new(
            fixture.rooms.clone(),
            fixture.subscriptions.clone(),
            Arc::new(notifier),
        );

        // when:
        let report = dispatcher.dispatch(&event, &room).await;

        // then:
        assert_eq!(report, DispatchReport::default());
    }

    #[tokio::test]
    async fn test_one_failed_recipient_does_not_stop_the_others() {
        // Test: a provider error for one recipient is counted and logged while
        // the remaining recipients are still attempted
        // given:
        let fixture = create_fixture().await;
        subscribe(&fixture, SubscriptionKind::Available, "bounce@example.com").await;
        subscribe(&fixture, SubscriptionKind::Available, "ok1@example.com").await;
        subscribe(&fixture, SubscriptionKind::Available, "ok2@example.com").await;
        set_occupancy(&fixture, 10).await;
        let (event, room) = set_occupancy(&fixture, 9).await;

        let mut notifier = MockNotifier::new();
        notifier.expect_send().times(3).returning(|n: &Notification| {
            if n.contact.address() == "bounce@example.com" {
                Err(NotificationError::DeliveryFailed {
                    recipient: n.contact.address().to_string(),
                    reason: "mailbox unavailable".to_string(),
                })
            } else {
                Ok(())
            }
        });
        let dispatcher = NotificationDispatcher::new(
            fixture.rooms.clone(),
            fixture.subscriptions.clone(),
            Arc::new(notifier),
        );

        // when:
        let report = dispatcher.dispatch(&event, &room).await;

        // then: every one-shot subscription is consumed, failed or not
        assert_eq!(
            report,
            DispatchReport {
                attempted: 3,
                failed: 1
            }
        );
        assert!(
            fixture
                .subscriptions
                .get_subscriptions(fixture.main.id)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_second_availability_transition_does_not_refire() {
        // given: one availability subscription already fired once
        let fixture = create_fixture().await;
        subscribe(&fixture, SubscriptionKind::Available, "avail@example.com").await;
        let dispatcher = NotificationDispatcher::new(
            fixture.rooms.clone(),
            fixture.subscriptions.clone(),
            Arc::new(LogNotifier::new()),
        );
        set_occupancy(&fixture, 10).await;
        let (event, room) = set_occupancy(&fixture, 9).await;
        assert_eq!(dispatcher.dispatch(&event, &room).await.attempted, 1);

        // when: the room fills and empties again
        set_occupancy(&fixture, 10).await;
        let (event, room) = set_occupancy(&fixture, 9).await;
        let report = dispatcher.dispatch(&event, &room).await;

        // then:
        assert_eq!(report.attempted, 0);
    }

    /// Notifier that counts sends and holds each one open for a while
    struct SlowNotifier {
        sends: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Notifier for SlowNotifier {
        async fn send(&self, _notification: &Notification) -> Result<(), NotificationError> {
            self.sends.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_overlapping_availability_transitions_fire_one_shot_once() {
        // Test: a second availability transition arrives while the first
        // dispatch is still sending; the subscription must not fire twice
        // given:
        let fixture = create_fixture().await;
        subscribe(&fixture, SubscriptionKind::Available, "avail@example.com").await;
        set_occupancy(&fixture, 10).await;
        let (first_event, first_room) = set_occupancy(&fixture, 9).await;
        set_occupancy(&fixture, 10).await;
        let (second_event, second_room) = set_occupancy(&fixture, 9).await;
        assert_eq!(first_event.transition, Transition::BecameAvailable);
        assert_eq!(second_event.transition, Transition::BecameAvailable);

        let notifier = Arc::new(SlowNotifier {
            sends: AtomicUsize::new(0),
        });
        let dispatcher = NotificationDispatcher::new(
            fixture.rooms.clone(),
            fixture.subscriptions.clone(),
            notifier.clone(),
        );

        // when:
        let (first, second) = tokio::join!(
            dispatcher.dispatch(&first_event, &first_room),
            dispatcher.dispatch(&second_event, &second_room),
        );

        // then:
        assert_eq!(notifier.sends.load(Ordering::SeqCst), 1);
        assert_eq!(first.attempted + second.attempted, 1);
        assert!(
            fixture
                .subscriptions
                .get_subscriptions(fixture.main.id)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_room_full_message_without_alternatives() {
        let room = Room::new(
            crate::domain::RoomId::new(1),
            RoomName::new("Main KidZone".to_string()).unwrap(),
            Capacity::new(20).unwrap(),
            true,
        );

        assert_eq!(
            room_full_message(&room, &[]),
            "The Main KidZone is now full. No other rooms are currently available."
        );
    }

    #[test]
    fn test_space_available_message_singular() {
        let room = Room::new(
            crate::domain::RoomId::new(1),
            RoomName::new("Main KidZone".to_string()).unwrap(),
            Capacity::new(20).unwrap(),
            true,
        );

        assert_eq!(
            space_available_message(&room, 1),
            "Main KidZone now has 1 spot available"
        );
    }
}
