//! HTTP API request and response DTOs.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/rooms/{id}/occupancy`
///
/// Signed so that negative values reach validation instead of failing
/// deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOccupancyRequest {
    pub occupancy: i64,
}

/// Body of `POST /api/rooms/{id}/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub is_open: bool,
}

/// Alert kind on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionKindDto {
    Full,
    Available,
}

/// Body of `POST /api/notifications`; exactly one contact field must be set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionRequest {
    pub room_id: u32,
    pub r#type: SubscriptionKindDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fcm_token: Option<String>,
}

/// Created subscription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDto {
    pub id: u32,
    pub room_id: u32,
    pub r#type: SubscriptionKindDto,
    pub channel: String,
    pub contact: String,
}

/// One history entry of `GET /api/rooms/{id}/history`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyChangeDto {
    pub room_id: u32,
    pub previous_occupancy: u32,
    pub new_occupancy: u32,
    pub timestamp: String,
}

/// Error body: `{"message": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}
