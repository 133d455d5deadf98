use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// 报名记录，每个用户唯一；持票的前提条件
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub cpf: String,
    pub birthday: NaiveDate,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: i32,
    pub enrollment_id: i32,
    pub street: String,
    pub number: String,
    pub city: String,
    pub state: String,
    pub neighborhood: String,
    pub cep: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
