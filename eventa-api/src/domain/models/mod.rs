pub mod booking;
pub mod enrollment;
pub mod hotel;
pub mod payment;
pub mod ticket;
