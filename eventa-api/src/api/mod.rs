pub mod booking;
pub mod extract;
pub mod payments;
pub mod tickets;
