use std::sync::Arc;

use crate::domain::models::ticket::{TicketType, TicketWithType};
use crate::domain::repositories::{EnrollmentRepository, TicketRepository};
use crate::error::AppError;

#[derive(Clone)]
pub struct TicketService {
    enrollments: Arc<dyn EnrollmentRepository>,
    tickets: Arc<dyn TicketRepository>,
}

impl TicketService {
    pub fn new(
        enrollments: Arc<dyn EnrollmentRepository>,
        tickets: Arc<dyn TicketRepository>,
    ) -> Self {
        Self {
            enrollments,
            tickets,
        }
    }

    pub async fn get_ticket_types(&self) -> Result<Vec<TicketType>, AppError> {
        Ok(self.tickets.all_types().await?)
    }

    pub async fn get_user_ticket(&self, user_id: i32) -> Result<TicketWithType, AppError> {
        let enrollment = self
            .enrollments
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("User {} has no enrollment", user_id))
            })?;

        self.tickets
            .find_with_type_by_enrollment_id(enrollment.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} has no ticket", user_id)))
    }

    /// 票种 id 不做存在性预检，外键冲突作为数据库错误上抛
    pub async fn create_ticket(
        &self,
        user_id: i32,
        ticket_type_id: i32,
    ) -> Result<TicketWithType, AppError> {
        let enrollment = self
            .enrollments
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("User {} has no enrollment", user_id))
            })?;

        Ok(self.tickets.create(enrollment.id, ticket_type_id).await?)
    }
}
