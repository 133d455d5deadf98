use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::domain::models::ticket::{Ticket, TicketStatus, TicketType, TicketWithType};

#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn all_types(&self) -> Result<Vec<TicketType>, sqlx::Error>;

    /// 报名记录名下的第一张门票（含票种）
    async fn find_with_type_by_enrollment_id(
        &self,
        enrollment_id: i32,
    ) -> Result<Option<TicketWithType>, sqlx::Error>;

    async fn find_with_type_by_id(
        &self,
        ticket_id: i32,
    ) -> Result<Option<TicketWithType>, sqlx::Error>;

    async fn create(
        &self,
        enrollment_id: i32,
        ticket_type_id: i32,
    ) -> Result<TicketWithType, sqlx::Error>;

    async fn set_status(&self, ticket_id: i32, status: TicketStatus) -> Result<(), sqlx::Error>;
}

pub struct MysqlTicketRepository {
    pool: MySqlPool,
}

impl MysqlTicketRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn load_type(&self, ticket_type_id: i32) -> Result<Option<TicketType>, sqlx::Error> {
        sqlx::query_as::<_, TicketType>(
            r#"
            SELECT * FROM ticket_types
            WHERE id = ?
            "#,
        )
        .bind(ticket_type_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn with_type(&self, ticket: Ticket) -> Result<Option<TicketWithType>, sqlx::Error> {
        let ticket_type = self.load_type(ticket.ticket_type_id).await?;
        Ok(ticket_type.map(|ticket_type| TicketWithType { ticket, ticket_type }))
    }
}

#[async_trait]
impl TicketRepository for MysqlTicketRepository {
    async fn all_types(&self) -> Result<Vec<TicketType>, sqlx::Error> {
        sqlx::query_as::<_, TicketType>(
            r#"
            SELECT * FROM ticket_types
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn find_with_type_by_enrollment_id(
        &self,
        enrollment_id: i32,
    ) -> Result<Option<TicketWithType>, sqlx::Error> {
        let ticket = sqlx::query_as::<_, Ticket>(
            r#"
            SELECT * FROM tickets
            WHERE enrollment_id = ?
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(enrollment_id)
        .fetch_optional(&self.pool)
        .await?;

        match ticket {
            Some(ticket) => self.with_type(ticket).await,
            None => Ok(None),
        }
    }

    async fn find_with_type_by_id(
        &self,
        ticket_id: i32,
    ) -> Result<Option<TicketWithType>, sqlx::Error> {
        let ticket = sqlx::query_as::<_, Ticket>(
            r#"
            SELECT * FROM tickets
            WHERE id = ?
            "#,
        )
        .bind(ticket_id)
        .fetch_optional(&self.pool)
        .await?;

        match ticket {
            Some(ticket) => self.with_type(ticket).await,
            None => Ok(None),
        }
    }

    async fn create(
        &self,
        enrollment_id: i32,
        ticket_type_id: i32,
    ) -> Result<TicketWithType, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO tickets (enrollment_id, ticket_type_id, status)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(enrollment_id)
        .bind(ticket_type_id)
        .bind(TicketStatus::Reserved)
        .execute(&self.pool)
        .await?;

        let ticket_id = result.last_insert_id() as i32;

        self.find_with_type_by_id(ticket_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    async fn set_status(&self, ticket_id: i32, status: TicketStatus) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE tickets
            SET status = ?
            WHERE id = ?
            "#,
        )
        .bind(status)
        .bind(ticket_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
