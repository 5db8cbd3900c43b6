//! Conversion logic between DTOs and domain entities.

use kidzone_shared::time::timestamp_to_rfc3339;
use thiserror::Error;

use crate::domain::{
    Contact, OccupancyChange, Room, Subscription, SubscriptionKind, ValueObjectError,
};
use crate::infrastructure::dto::{
    http::{
        CreateSubscriptionRequest, OccupancyChangeDto, SubscriptionDto, SubscriptionKindDto,
        UpdateOccupancyRequest,
    },
    websocket::RoomDto,
};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<Room> for RoomDto {
    fn from(room: Room) -> Self {
        Self {
            id: room.id.value(),
            name: room.name.into_string(),
            current_occupancy: room.current_occupancy,
            max_capacity: room.max_capacity.value(),
            is_open: room.is_open,
            last_reset: room.last_reset.map(|at| timestamp_to_rfc3339(at.value())),
        }
    }
}

impl From<OccupancyChange> for OccupancyChangeDto {
    fn from(change: OccupancyChange) -> Self {
        Self {
            room_id: change.room_id.value(),
            previous_occupancy: change.previous_occupancy,
            new_occupancy: change.new_occupancy,
            timestamp: timestamp_to_rfc3339(change.changed_at.value()),
        }
    }
}

impl From<SubscriptionKind> for SubscriptionKindDto {
    fn from(kind: SubscriptionKind) -> Self {
        match kind {
            SubscriptionKind::Full => Self::Full,
            SubscriptionKind::Available => Self::Available,
        }
    }
}

impl From<Subscription> for SubscriptionDto {
    fn from(subscription: Subscription) -> Self {
        Self {
            id: subscription.id.value(),
            room_id: subscription.room_id.value(),
            r#type: subscription.kind.into(),
            channel: subscription.contact.channel().to_string(),
            contact: subscription.contact.address().to_string(),
        }
    }
}

// ========================================
// DTO → Domain
// ========================================

impl From<SubscriptionKindDto> for SubscriptionKind {
    fn from(dto: SubscriptionKindDto) -> Self {
        match dto {
            SubscriptionKindDto::Full => Self::Full,
            SubscriptionKindDto::Available => Self::Available,
        }
    }
}

/// Why a subscription request carries no usable contact
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactRequestError {
    #[error("One of email, phone or fcmToken is required")]
    Missing,

    #[error("Only one of email, phone or fcmToken may be given")]
    Ambiguous,

    #[error(transparent)]
    Invalid(#[from] ValueObjectError),
}

impl CreateSubscriptionRequest {
    /// Validate the single contact field into a domain [`Contact`].
    pub fn contact(&self) -> Result<Contact, ContactRequestError> {
        match (&self.email, &self.phone, &self.fcm_token) {
            (Some(email), None, None) => Ok(Contact::email(email.clone())?),
            (None, Some(phone), None) => Ok(Contact::sms(phone.clone())?),
            (None, None, Some(token)) => Ok(Contact::push(token.clone())?),
            (None, None, None) => Err(ContactRequestError::Missing),
            _ => Err(ContactRequestError::Ambiguous),
        }
    }
}

/// Why an occupancy body carries no usable headcount
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OccupancyRequestError {
    #[error("Occupancy value is required")]
    Missing,

    #[error("Invalid occupancy value")]
    Invalid,
}

impl UpdateOccupancyRequest {
    /// Read the headcount from a raw JSON body.
    ///
    /// An absent `occupancy` field is `Missing`; a present one that is not a
    /// non-negative integer (string, fraction, null, negative) is `Invalid`.
    pub fn occupancy_from_body(body: &serde_json::Value) -> Result<u32, OccupancyRequestError> {
        if body.get("occupancy").is_none() {
            return Err(OccupancyRequestError::Missing);
        }
        let request: Self = serde_json::from_value(body.clone())
            .map_err(|_| OccupancyRequestError::Invalid)?;
        u32::try_from(request.occupancy).map_err(|_| OccupancyRequestError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Capacity, RoomId, RoomName, SubscriptionId, Timestamp};

    fn request() -> CreateSubscriptionRequest {
        CreateSubscriptionRequest {
            room_id: 1,
            r#type: SubscriptionKindDto::Available,
            email: None,
            phone: None,
            fcm_token: None,
        }
    }

    #[test]
    fn test_room_to_dto() {
        // given:
        let mut room = Room::new(
            RoomId::new(7),
            RoomName::new("Infants".to_string()).unwrap(),
            Capacity::new(8).unwrap(),
            false,
        );
        room.set_occupancy(3).unwrap();
        room.last_reset = Some(Timestamp::new(1672531200000));

        // when:
        let dto = RoomDto::from(room);

        // then:
        assert_eq!(dto.id, 7);
        assert_eq!(dto.name, "Infants");
        assert_eq!(dto.current_occupancy, 3);
        assert_eq!(dto.max_capacity, 8);
        assert!(!dto.is_open);
        assert_eq!(dto.last_reset.as_deref(), Some("2023-01-01T00:00:00.000Z"));
    }

    #[test]
    fn test_subscription_to_dto() {
        let subscription = Subscription {
            id: SubscriptionId::new(4),
            room_id: RoomId::new(1),
            kind: SubscriptionKind::Full,
            contact: Contact::email("parent@example.com".to_string()).unwrap(),
        };

        let dto = SubscriptionDto::from(subscription);

        assert_eq!(dto.id, 4);
        assert_eq!(dto.r#type, SubscriptionKindDto::Full);
        assert_eq!(dto.channel, "email");
        assert_eq!(dto.contact, "parent@example.com");
    }

    #[test]
    fn test_request_contact_picks_the_given_channel() {
        let mut by_phone = request();
        by_phone.phone = Some("+15551234567".to_string());
        assert_eq!(
            by_phone.contact(),
            Ok(Contact::Sms("+15551234567".to_string()))
        );

        let mut by_token = request();
        by_token.fcm_token = Some("device-token".to_string());
        assert_eq!(
            by_token.contact(),
            Ok(Contact::Push("device-token".to_string()))
        );
    }

    #[test]
    fn test_request_contact_requires_exactly_one_field() {
        assert_eq!(request().contact(), Err(ContactRequestError::Missing));

        let mut both = request();
        both.email = Some("parent@example.com".to_string());
        both.phone = Some("+15551234567".to_string());
        assert_eq!(both.contact(), Err(ContactRequestError::Ambiguous));
    }

    #[test]
    fn test_request_contact_rejects_invalid_email() {
        let mut bad = request();
        bad.email = Some("not-an-address".to_string());
        assert!(matches!(
            bad.contact(),
            Err(ContactRequestError::Invalid(ValueObjectError::InvalidEmail(_)))
        ));
    }

    #[test]
    fn test_occupancy_from_body() {
        assert_eq!(
            UpdateOccupancyRequest::occupancy_from_body(&serde_json::json!({"occupancy": 12})),
            Ok(12)
        );
        assert_eq!(
            UpdateOccupancyRequest::occupancy_from_body(&serde_json::json!({"occupancy": 0})),
            Ok(0)
        );
    }

    #[test]
    fn test_occupancy_from_body_missing_field() {
        for body in [
            serde_json::json!({}),
            serde_json::json!({"count": 3}),
            serde_json::json!(null),
        ] {
            assert_eq!(
                UpdateOccupancyRequest::occupancy_from_body(&body),
                Err(OccupancyRequestError::Missing),
                "body: {}",
                body
            );
        }
    }

    #[test]
    fn test_occupancy_from_body_present_but_invalid() {
        // given: the field is there, but not a non-negative integer
        for body in [
            serde_json::json!({"occupancy": "abc"}),
            serde_json::json!({"occupancy": 1.5}),
            serde_json::json!({"occupancy": null}),
            serde_json::json!({"occupancy": -1}),
            serde_json::json!({"occupancy": 5_000_000_000_i64}),
        ] {
            // when / then:
            assert_eq!(
                UpdateOccupancyRequest::occupancy_from_body(&body),
                Err(OccupancyRequestError::Invalid),
                "body: {}",
                body
            );
        }
    }
}
