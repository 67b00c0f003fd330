use serde::{Deserialize, Serialize};

/// Seat class, determined by the row position inside the venue grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatCategory {
    Standard,
    Deluxe,
}

/// Per-category ticket prices. A policy value, not derived from anything;
/// configurable through the environment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeatPricing {
    pub standard: f64,
    pub deluxe: f64,
}

impl Default for SeatPricing {
    fn default() -> Self {
        Self {
            standard: 180.0,
            deluxe: 250.0,
        }
    }
}

impl SeatPricing {
    pub fn price_of(&self, category: SeatCategory) -> f64 {
        match category {
            SeatCategory::Standard => self.standard,
            SeatCategory::Deluxe => self.deluxe,
        }
    }
}

/// A single seat of a venue grid. Immutable once the grid is generated;
/// availability is per show and lives in the seat store, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    /// Row letter plus 1-based column, e.g. "A1", "C7".
    pub id: String,
    pub row: char,
    pub column: u32,
    pub category: SeatCategory,
    pub price: f64,
}

impl Seat {
    pub fn new(row_index: u32, column_index: u32, category: SeatCategory, pricing: &SeatPricing) -> Self {
        let row = (b'A' + row_index as u8) as char;
        let column = column_index + 1;
        Seat {
            id: format!("{}{}", row, column),
            row,
            column,
            category,
            price: pricing.price_of(category),
        }
    }
}
