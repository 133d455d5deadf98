pub mod booking_repository;
pub mod enrollment_repository;
pub mod payment_repository;
pub mod room_repository;
pub mod ticket_repository;

pub use booking_repository::{BookingRepository, MysqlBookingRepository};
pub use enrollment_repository::{EnrollmentRepository, MysqlEnrollmentRepository};
pub use payment_repository::{MysqlPaymentRepository, PaymentRepository};
pub use room_repository::{MysqlRoomRepository, RoomRepository};
pub use ticket_repository::{MysqlTicketRepository, TicketRepository};
