use std::sync::Arc;

use crate::domain::models::booking::BookingWithRoom;
use crate::domain::models::ticket::TicketStatus;
use crate::domain::repositories::{
    BookingRepository, EnrollmentRepository, RoomRepository, TicketRepository,
};
use crate::error::AppError;

/// 预订资格引擎：裁定用户能否创建/改签房间预订。
/// 各前置条件失败统一折叠为 Forbidden / NotFound 两种对外信号。
#[derive(Clone)]
pub struct BookingService {
    enrollments: Arc<dyn EnrollmentRepository>,
    tickets: Arc<dyn TicketRepository>,
    rooms: Arc<dyn RoomRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(
        enrollments: Arc<dyn EnrollmentRepository>,
        tickets: Arc<dyn TicketRepository>,
        rooms: Arc<dyn RoomRepository>,
        bookings: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            enrollments,
            tickets,
            rooms,
            bookings,
        }
    }

    pub async fn get_booking(&self, user_id: i32) -> Result<BookingWithRoom, AppError> {
        self.bookings
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} has no booking", user_id)))
    }

    pub async fn create_booking(&self, user_id: i32, room_id: i32) -> Result<i32, AppError> {
        self.check_ticket_eligibility(user_id).await?;
        self.check_room_availability(room_id).await?;

        // 空闲检查与写入之间无事务包裹，并发重复预订由下层唯一约束兜底（当前 schema 未加）
        let booking_id = self.bookings.create(user_id, room_id).await?;

        Ok(booking_id)
    }

    pub async fn update_booking(
        &self,
        user_id: i32,
        booking_id: i32,
        room_id: i32,
    ) -> Result<i32, AppError> {
        // 不存在的 bookingId 同样报 Forbidden，避免向非持有者泄露预订存在性
        let booking = self.bookings.find_by_id(booking_id).await?;
        if booking.is_none() {
            return Err(AppError::Forbidden(format!(
                "Booking {} is not accessible",
                booking_id
            )));
        }

        let owned = self
            .bookings
            .find_by_user_id(user_id)
            .await?
            .filter(|own| own.id == booking_id);
        if owned.is_none() {
            return Err(AppError::Forbidden(format!(
                "Booking {} is not accessible",
                booking_id
            )));
        }

        self.check_ticket_eligibility(user_id).await?;
        self.check_room_availability(room_id).await?;

        self.bookings.update_room(booking_id, room_id).await?;

        Ok(booking_id)
    }

    /// 报名、门票、票种三项资格一次裁定：必须已支付、含酒店、非远程
    async fn check_ticket_eligibility(&self, user_id: i32) -> Result<(), AppError> {
        let enrollment = self
            .enrollments
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| {
                AppError::Forbidden(format!("User {} has no enrollment", user_id))
            })?;

        let ticket = self
            .tickets
            .find_with_type_by_enrollment_id(enrollment.id)
            .await?
            .ok_or_else(|| {
                AppError::Forbidden(format!("User {} has no ticket", user_id))
            })?;

        let eligible = ticket.ticket.status == TicketStatus::Paid
            && ticket.ticket_type.includes_hotel
            && !ticket.ticket_type.is_remote;

        if !eligible {
            return Err(AppError::Forbidden(
                "Ticket is not eligible for a hotel booking".to_string(),
            ));
        }

        Ok(())
    }

    async fn check_room_availability(&self, room_id: i32) -> Result<(), AppError> {
        let room = self.rooms.find_by_id(room_id).await?;
        if room.is_none() {
            return Err(AppError::NotFound(format!("Room {} does not exist", room_id)));
        }

        let occupied = self.bookings.find_by_room_id(room_id).await?;
        if occupied.is_some() {
            return Err(AppError::Forbidden(format!(
                "Room {} is already booked",
                room_id
            )));
        }

        Ok(())
    }
}
