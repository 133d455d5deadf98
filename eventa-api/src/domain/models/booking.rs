use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::hotel::Room;

/// 预订：一个用户占用一个房间。唯一性靠先查后写维护，见 BookingService
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i32,
    pub user_id: i32,
    pub room_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingWithRoom {
    pub id: i32,
    pub room: Room,
}
