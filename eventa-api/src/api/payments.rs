use axum::{
    extract::{Extension, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::api::extract::AppJson;
use crate::domain::models::payment::{CardIssuer, Payment};
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::server::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_payment))
        .route("/process", post(process_payment))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPaymentParams {
    pub ticket_id: i32,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPaymentRequest {
    pub ticket_id: i32,
    pub card_data: CardData,
}

/// 卡号保留为字符串，末四位为字符截断而非数值运算
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    pub issuer: CardIssuer,
    #[validate(length(min = 4, message = "card number too short"))]
    pub number: String,
    #[validate(length(min = 1, message = "card holder name is required"))]
    pub name: String,
    pub expiration_date: String,
    pub cvv: String,
}

async fn get_payment(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Query(params): Query<GetPaymentParams>,
) -> Result<Json<Payment>, AppError> {
    let payment = state
        .payment_service
        .get_payment_by_ticket_id(user_id, params.ticket_id)
        .await?;

    Ok(Json(payment))
}

async fn process_payment(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    AppJson(payload): AppJson<ProcessPaymentRequest>,
) -> Result<Json<Payment>, AppError> {
    payload
        .card_data
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let payment = state
        .payment_service
        .create_payment(
            user_id,
            payload.ticket_id,
            payload.card_data.issuer,
            &payload.card_data.number,
        )
        .await?;

    Ok(Json(payment))
}
