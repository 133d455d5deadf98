use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::domain::models::hotel::Room;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn find_by_id(&self, room_id: i32) -> Result<Option<Room>, sqlx::Error>;
}

pub struct MysqlRoomRepository {
    pool: MySqlPool,
}

impl MysqlRoomRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for MysqlRoomRepository {
    async fn find_by_id(&self, room_id: i32) -> Result<Option<Room>, sqlx::Error> {
        sqlx::query_as::<_, Room>(
            r#"
            SELECT * FROM rooms
            WHERE id = ?
            "#,
        )
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await
    }
}
