use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum CardIssuer {
    Visa,
    Mastercard,
}

/// 一张门票对应一次支付记录（本设计无退款/作废流程）
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i32,
    pub ticket_id: i32,
    pub value: i32,
    pub card_issuer: CardIssuer,
    pub card_last_digits: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
