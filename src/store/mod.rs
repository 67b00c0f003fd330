pub mod bookings;
pub mod seats;

pub use bookings::BookingLedger;
pub use seats::{SeatStatus, SeatStore};
