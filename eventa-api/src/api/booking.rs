use axum::{
    extract::{Extension, Path, State},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::api::extract::AppJson;
use crate::domain::models::booking::BookingWithRoom;
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::server::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_booking).post(create_booking))
        .route("/:bookingId", put(update_booking))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[validate(range(min = 1, message = "roomId must be at least 1"))]
    pub room_id: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreatedResponse {
    pub booking_id: i32,
}

async fn get_booking(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<BookingWithRoom>, AppError> {
    let booking = state.booking_service.get_booking(user_id).await?;

    Ok(Json(booking))
}

async fn create_booking(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    AppJson(payload): AppJson<BookingRequest>,
) -> Result<Json<BookingCreatedResponse>, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let booking_id = state
        .booking_service
        .create_booking(user_id, payload.room_id)
        .await?;

    Ok(Json(BookingCreatedResponse { booking_id }))
}

async fn update_booking(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(booking_id): Path<i32>,
    AppJson(payload): AppJson<BookingRequest>,
) -> Result<Json<BookingCreatedResponse>, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let booking_id = state
        .booking_service
        .update_booking(user_id, booking_id, payload.room_id)
        .await?;

    Ok(Json(BookingCreatedResponse { booking_id }))
}
