//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    domain::{RepositoryError, RoomId},
    infrastructure::dto::{
        conversion::OccupancyRequestError,
        http::{
            CreateSubscriptionRequest, ErrorResponse, OccupancyChangeDto, SubscriptionDto,
            UpdateOccupancyRequest, UpdateStatusRequest,
        },
        websocket::RoomDto,
    },
    ui::state::AppState,
    usecase::{GetRoomHistoryError, SubscribeError, UpdateOccupancyError, UpdateStatusError},
};

/// Error response: a status code with a `{"message": ...}` body
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    fn room_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Room not found")
    }

    fn internal(error: impl std::fmt::Display) -> Self {
        tracing::error!("Request failed: {}", error);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                message: self.message,
            }),
        )
            .into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::RoomNotFound(_) => Self::room_not_found(),
            other => Self::internal(other),
        }
    }
}

impl From<UpdateOccupancyError> for ApiError {
    fn from(error: UpdateOccupancyError) -> Self {
        match error {
            UpdateOccupancyError::RoomNotFound(_) => Self::room_not_found(),
            UpdateOccupancyError::CapacityExceeded { .. } => Self::bad_request(error.to_string()),
            UpdateOccupancyError::Repository(e) => Self::internal(e),
        }
    }
}

impl From<UpdateStatusError> for ApiError {
    fn from(error: UpdateStatusError) -> Self {
        match error {
            UpdateStatusError::RoomNotFound(_) => Self::room_not_found(),
            UpdateStatusError::Repository(e) => Self::internal(e),
        }
    }
}

impl From<SubscribeError> for ApiError {
    fn from(error: SubscribeError) -> Self {
        match error {
            SubscribeError::RoomNotFound(_) => Self::room_not_found(),
            SubscribeError::Repository(e) => Self::internal(e),
        }
    }
}

impl From<GetRoomHistoryError> for ApiError {
    fn from(error: GetRoomHistoryError) -> Self {
        match error {
            GetRoomHistoryError::RoomNotFound(_) => Self::room_not_found(),
            GetRoomHistoryError::Repository(e) => Self::internal(e),
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Result<Json<Vec<RoomDto>>, ApiError> {
    let rooms = state.get_rooms_usecase.execute().await?;
    Ok(Json(rooms.into_iter().map(RoomDto::from).collect()))
}

/// Get the occupancy history of a room
pub async fn get_room_history(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<u32>,
) -> Result<Json<Vec<OccupancyChangeDto>>, ApiError> {
    let history = state
        .get_room_history_usecase
        .execute(RoomId::new(room_id))
        .await?;
    Ok(Json(history.into_iter().map(OccupancyChangeDto::from).collect()))
}

/// Set the headcount of a room
pub async fn update_occupancy(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<u32>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<RoomDto>, ApiError> {
    // An unreadable body carries no occupancy field at all.
    let Json(body) = payload.map_err(|e| {
        tracing::warn!("Rejected occupancy body for room {}: {}", room_id, e);
        ApiError::bad_request(OccupancyRequestError::Missing.to_string())
    })?;
    let occupancy = UpdateOccupancyRequest::occupancy_from_body(&body)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let outcome = state
        .update_occupancy_usecase
        .execute(RoomId::new(room_id), occupancy)
        .await?;
    Ok(Json(RoomDto::from(outcome.room)))
}

/// Open or close a room
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<u32>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<RoomDto>, ApiError> {
    let Json(request) = payload.map_err(|e| {
        tracing::warn!("Rejected status body for room {}: {}", room_id, e);
        ApiError::bad_request("Invalid request")
    })?;

    let room = state
        .update_status_usecase
        .execute(RoomId::new(room_id), request.is_open)
        .await?;
    Ok(Json(RoomDto::from(room)))
}

/// Reset every room to zero occupancy
pub async fn reset_rooms(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RoomDto>>, ApiError> {
    let rooms = state.reset_occupancy_usecase.execute().await?;
    Ok(Json(rooms.into_iter().map(RoomDto::from).collect()))
}

/// Subscribe to full/available alerts for a room
pub async fn create_subscription(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateSubscriptionRequest>, JsonRejection>,
) -> Result<Json<SubscriptionDto>, ApiError> {
    let Json(request) = payload.map_err(|e| {
        tracing::warn!("Rejected subscription body: {}", e);
        ApiError::bad_request("Invalid request")
    })?;
    let contact = request
        .contact()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let subscription = state
        .subscribe_usecase
        .execute(RoomId::new(request.room_id), request.r#type.into(), contact)
        .await?;
    Ok(Json(SubscriptionDto::from(subscription)))
}
