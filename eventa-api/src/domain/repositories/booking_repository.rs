use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::domain::models::booking::{Booking, BookingWithRoom};
use crate::domain::models::hotel::Room;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_by_user_id(&self, user_id: i32)
        -> Result<Option<BookingWithRoom>, sqlx::Error>;

    async fn find_by_room_id(&self, room_id: i32) -> Result<Option<Booking>, sqlx::Error>;

    async fn find_by_id(&self, booking_id: i32) -> Result<Option<Booking>, sqlx::Error>;

    async fn create(&self, user_id: i32, room_id: i32) -> Result<i32, sqlx::Error>;

    async fn update_room(&self, booking_id: i32, room_id: i32) -> Result<(), sqlx::Error>;
}

pub struct MysqlBookingRepository {
    pool: MySqlPool,
}

impl MysqlBookingRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for MysqlBookingRepository {
    async fn find_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Option<BookingWithRoom>, sqlx::Error> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE user_id = ?
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(booking) = booking else {
            return Ok(None);
        };

        let room = sqlx::query_as::<_, Room>(
            r#"
            SELECT * FROM rooms
            WHERE id = ?
            "#,
        )
        .bind(booking.room_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Some(BookingWithRoom {
            id: booking.id,
            room,
        }))
    }

    async fn find_by_room_id(&self, room_id: i32) -> Result<Option<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE room_id = ?
            LIMIT 1
            "#,
        )
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn find_by_id(&self, booking_id: i32) -> Result<Option<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE id = ?
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn create(&self, user_id: i32, room_id: i32) -> Result<i32, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO bookings (user_id, room_id)
            VALUES (?, ?)
            "#,
        )
        .bind(user_id)
        .bind(room_id)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id() as i32)
    }

    async fn update_room(&self, booking_id: i32, room_id: i32) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE bookings
            SET room_id = ?
            WHERE id = ?
            "#,
        )
        .bind(room_id)
        .bind(booking_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
