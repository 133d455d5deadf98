use std::sync::Arc;

use crate::domain::models::payment::{CardIssuer, Payment};
use crate::domain::models::ticket::TicketStatus;
use crate::domain::repositories::{EnrollmentRepository, PaymentRepository, TicketRepository};
use crate::error::AppError;

/// 支付对账：校验门票归属后落支付记录并把门票置为 PAID
#[derive(Clone)]
pub struct PaymentService {
    enrollments: Arc<dyn EnrollmentRepository>,
    tickets: Arc<dyn TicketRepository>,
    payments: Arc<dyn PaymentRepository>,
}

impl PaymentService {
    pub fn new(
        enrollments: Arc<dyn EnrollmentRepository>,
        tickets: Arc<dyn TicketRepository>,
        payments: Arc<dyn PaymentRepository>,
    ) -> Self {
        Self {
            enrollments,
            tickets,
            payments,
        }
    }

    pub async fn get_payment_by_ticket_id(
        &self,
        user_id: i32,
        ticket_id: i32,
    ) -> Result<Payment, AppError> {
        if ticket_id == 0 {
            return Err(AppError::BadRequest("Invalid ticket id".to_string()));
        }

        // 归属联查解析不出持票人时按 Unauthorized 处理
        let owner_id = self
            .payments
            .owner_user_id_by_ticket_id(ticket_id)
            .await?
            .ok_or_else(|| AppError::Auth("Ticket owner could not be resolved".to_string()))?;

        if owner_id != user_id {
            return Err(AppError::Auth(
                "Ticket does not belong to the caller".to_string(),
            ));
        }

        self.payments
            .find_by_ticket_id(ticket_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Ticket {} has no payment", ticket_id))
            })
    }

    pub async fn create_payment(
        &self,
        user_id: i32,
        ticket_id: i32,
        card_issuer: CardIssuer,
        card_number: &str,
    ) -> Result<Payment, AppError> {
        if ticket_id == 0 {
            return Err(AppError::BadRequest("Invalid ticket id".to_string()));
        }

        let ticket = self
            .tickets
            .find_with_type_by_id(ticket_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Ticket {} does not exist", ticket_id)))?;

        let enrollment = self
            .enrollments
            .find_by_id(ticket.ticket.enrollment_id)
            .await?
            .ok_or_else(|| AppError::Auth("Ticket owner could not be resolved".to_string()))?;

        if enrollment.user_id != user_id {
            return Err(AppError::Auth(
                "Ticket does not belong to the caller".to_string(),
            ));
        }

        // 卡号按字符截断取末四位，不做数值处理
        let card_last_digits = last_digits(card_number);

        let payment = self
            .payments
            .create(
                ticket_id,
                ticket.ticket_type.price,
                card_issuer,
                &card_last_digits,
            )
            .await?;

        // 无条件置为 PAID：重复支付静默成功并追加一条支付记录（沿用既有行为）
        self.tickets
            .set_status(ticket_id, TicketStatus::Paid)
            .await?;

        Ok(payment)
    }
}

fn last_digits(card_number: &str) -> String {
    let count = card_number.chars().count();
    card_number.chars().skip(count.saturating_sub(4)).collect()
}
