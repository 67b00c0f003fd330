use serde::{Deserialize, Serialize};

use crate::error::BookingError;
use crate::models::seat::{Seat, SeatCategory, SeatPricing};

/// Rows are lettered A..Z, which caps the grid height.
const MAX_ROWS: i32 = 26;

/// A cinema hall with a fixed seat grid. The grid is generated once at
/// construction time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub rows: i32,
    pub columns: i32,
    seats: Vec<Seat>,
}

impl Venue {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        rows: i32,
        columns: i32,
        pricing: &SeatPricing,
    ) -> Result<Self, BookingError> {
        let seats = generate_seats(rows, columns, pricing)?;
        Ok(Venue {
            id,
            name: name.into(),
            rows,
            columns,
            seats,
        })
    }

    /// The full seat catalog, in grid order (row-major).
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seat_by_id(&self, seat_id: &str) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == seat_id)
    }
}

/// Builds the grid for a `rows` x `columns` hall. The last two rows are
/// Deluxe, every earlier row Standard; a hall with fewer than three rows
/// ends up all Deluxe.
pub fn generate_seats(
    rows: i32,
    columns: i32,
    pricing: &SeatPricing,
) -> Result<Vec<Seat>, BookingError> {
    if rows <= 0 || columns <= 0 || rows > MAX_ROWS {
        return Err(BookingError::InvalidDimensions { rows, columns });
    }

    let mut seats = Vec::with_capacity((rows * columns) as usize);
    for row in 0..rows {
        let category = if row >= rows - 2 {
            SeatCategory::Deluxe
        } else {
            SeatCategory::Standard
        };
        for col in 0..columns {
            seats.push(Seat::new(row as u32, col as u32, category, pricing));
        }
    }
    Ok(seats)
}
