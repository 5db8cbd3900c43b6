//! Value objects used by the domain model.
//!
//! Each type validates its input on construction, so an instance that exists
//! is always well-formed.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValueObjectError;

/// Maximum length of a room name (in characters)
pub const ROOM_NAME_MAX_LEN: usize = 100;

/// Room identifier, assigned sequentially by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(u32);

impl RoomId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RoomId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Display name of a room
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomName(String);

impl RoomName {
    /// Create a room name.
    ///
    /// Surrounding whitespace is trimmed; the result must be non-empty and at
    /// most [`ROOM_NAME_MAX_LEN`] characters.
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyRoomName);
        }
        if trimmed.chars().count() > ROOM_NAME_MAX_LEN {
            return Err(ValueObjectError::RoomNameTooLong {
                max: ROOM_NAME_MAX_LEN,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RoomName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Maximum number of occupants a room admits (always > 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capacity(u32);

impl Capacity {
    pub fn new(value: u32) -> Result<Self, ValueObjectError> {
        if value == 0 {
            return Err(ValueObjectError::ZeroCapacity);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Identifier of a live real-time connection
///
/// Connections carry no identity of their own, so the server mints one per
/// accepted socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Subscription identifier, assigned sequentially by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u32);

impl SubscriptionId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Unix timestamp in milliseconds (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Where an alert is delivered
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Contact {
    Email(String),
    Sms(String),
    Push(String),
}

impl Contact {
    /// Email address: a non-empty local part and a dotted domain, no spaces.
    pub fn email(value: String) -> Result<Self, ValueObjectError> {
        let value = value.trim().to_string();
        let valid = match value.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
                    && !value.contains(char::is_whitespace)
            }
            None => false,
        };
        if !valid {
            return Err(ValueObjectError::InvalidEmail(value));
        }
        Ok(Self::Email(value))
    }

    /// Phone number: optional leading `+`, then 7 to 15 digits.
    ///
    /// Spaces, dashes and parentheses are stripped before checking.
    pub fn sms(value: String) -> Result<Self, ValueObjectError> {
        let normalized: String = value
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
            .collect();
        let digits = normalized.strip_prefix('+').unwrap_or(&normalized);
        if !(7..=15).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValueObjectError::InvalidPhoneNumber(value));
        }
        Ok(Self::Sms(normalized))
    }

    /// Push device token: any non-blank string.
    pub fn push(value: String) -> Result<Self, ValueObjectError> {
        let value = value.trim().to_string();
        if value.is_empty() {
            return Err(ValueObjectError::EmptyDeviceToken);
        }
        Ok(Self::Push(value))
    }

    /// Channel name used in logs
    pub fn channel(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::Sms(_) => "sms",
            Self::Push(_) => "push",
        }
    }

    /// The raw address, phone number or token
    pub fn address(&self) -> &str {
        match self {
            Self::Email(value) | Self::Sms(value) | Self::Push(value) => value,
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.channel(), self.address())
    }
}
