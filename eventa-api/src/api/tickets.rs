use axum::{
    extract::{Extension, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::api::extract::AppJson;
use crate::domain::models::ticket::{TicketType, TicketWithType};
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::server::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_ticket).post(create_ticket))
        .route("/types", get(get_ticket_types))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
    #[validate(range(min = 1, message = "ticketTypeId must be at least 1"))]
    pub ticket_type_id: i32,
}

async fn get_ticket_types(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TicketType>>, AppError> {
    let ticket_types = state.ticket_service.get_ticket_types().await?;

    Ok(Json(ticket_types))
}

async fn get_ticket(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<TicketWithType>, AppError> {
    let ticket = state.ticket_service.get_user_ticket(user_id).await?;

    Ok(Json(ticket))
}

async fn create_ticket(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    AppJson(payload): AppJson<CreateTicketRequest>,
) -> Result<(StatusCode, Json<TicketWithType>), AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let ticket = state
        .ticket_service
        .create_ticket(user_id, payload.ticket_type_id)
        .await?;

    Ok((StatusCode::CREATED, Json(ticket)))
}
