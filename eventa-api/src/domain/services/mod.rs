pub mod booking_service;
pub mod payment_service;
pub mod ticket_service;
