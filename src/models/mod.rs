pub mod booking;
pub mod movie;
pub mod seat;
pub mod show;
pub mod snack;
pub mod venue;

pub use booking::{Booking, BookingStatus};
pub use movie::Movie;
pub use seat::{Seat, SeatCategory, SeatPricing};
pub use show::{Show, ShowKey};
pub use snack::Snack;
pub use venue::Venue;
