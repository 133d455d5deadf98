use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::domain::models::payment::{CardIssuer, Payment};

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn find_by_ticket_id(&self, ticket_id: i32) -> Result<Option<Payment>, sqlx::Error>;

    /// 通过 payment → ticket → enrollment 联查解析门票归属用户
    async fn owner_user_id_by_ticket_id(
        &self,
        ticket_id: i32,
    ) -> Result<Option<i32>, sqlx::Error>;

    async fn create(
        &self,
        ticket_id: i32,
        value: i32,
        card_issuer: CardIssuer,
        card_last_digits: &str,
    ) -> Result<Payment, sqlx::Error>;
}

pub struct MysqlPaymentRepository {
    pool: MySqlPool,
}

impl MysqlPaymentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for MysqlPaymentRepository {
    async fn find_by_ticket_id(&self, ticket_id: i32) -> Result<Option<Payment>, sqlx::Error> {
        sqlx::query_as::<_, Payment>(
            r#"
            SELECT * FROM payments
            WHERE ticket_id = ?
            LIMIT 1
            "#,
        )
        .bind(ticket_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn owner_user_id_by_ticket_id(
        &self,
        ticket_id: i32,
    ) -> Result<Option<i32>, sqlx::Error> {
        let row: Option<(i32,)> = sqlx::query_as(
            r#"
            SELECT e.user_id
            FROM payments p
            JOIN tickets t ON t.id = p.ticket_id
            JOIN enrollments e ON e.id = t.enrollment_id
            WHERE p.ticket_id = ?
            LIMIT 1
            "#,
        )
        .bind(ticket_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(user_id,)| user_id))
    }

    async fn create(
        &self,
        ticket_id: i32,
        value: i32,
        card_issuer: CardIssuer,
        card_last_digits: &str,
    ) -> Result<Payment, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO payments (ticket_id, value, card_issuer, card_last_digits)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(ticket_id)
        .bind(value)
        .bind(card_issuer)
        .bind(card_last_digits)
        .execute(&self.pool)
        .await?;

        let payment_id = result.last_insert_id() as i32;

        sqlx::query_as::<_, Payment>(
            r#"
            SELECT * FROM payments
            WHERE id = ?
            "#,
        )
        .bind(payment_id)
        .fetch_one(&self.pool)
        .await
    }
}
