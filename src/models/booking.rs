use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BookingError;
use crate::models::seat::Seat;
use crate::models::show::ShowKey;
use crate::models::snack::Snack;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    /// Under construction; seats and snacks are still mutable.
    Draft,
    /// Paid for. Line items are frozen.
    Confirmed,
    /// Terminal. Seats have been released back to the store.
    Cancelled,
}

/// A customer reservation for one show. Line-item mutation is only legal
/// in `Draft`; the total is always the sum of the current lines and is
/// never settable from outside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    /// Human-readable code, e.g. "CB-20250601-0042".
    pub code: String,
    pub customer: String,
    pub show: ShowKey,
    pub seats: Vec<Seat>,
    pub snacks: Vec<Snack>,
    pub total: f64,
    pub payment_method: Option<String>,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
}

impl Booking {
    pub fn new(customer: impl Into<String>, show: ShowKey, sequence: u64, created_at: NaiveDateTime) -> Self {
        Booking {
            id: Uuid::new_v4(),
            code: booking_code(created_at, sequence),
            customer: customer.into(),
            show,
            seats: Vec::new(),
            snacks: Vec::new(),
            total: 0.0,
            payment_method: None,
            status: BookingStatus::Draft,
            created_at,
        }
    }

    pub(crate) fn ensure_draft(&self) -> Result<(), BookingError> {
        match self.status {
            BookingStatus::Draft => Ok(()),
            BookingStatus::Confirmed => Err(BookingError::BookingAlreadyConfirmed),
            BookingStatus::Cancelled => Err(BookingError::BookingAlreadyCancelled),
        }
    }

    /// Appends seats that the store has already booked for this show.
    pub fn add_seats(&mut self, seats: Vec<Seat>) -> Result<(), BookingError> {
        self.ensure_draft()?;
        for seat in seats {
            self.total += seat.price;
            self.seats.push(seat);
        }
        Ok(())
    }

    pub fn add_snacks(&mut self, snacks: Vec<Snack>) -> Result<(), BookingError> {
        self.ensure_draft()?;
        for snack in snacks {
            self.total += snack.price;
            self.snacks.push(snack);
        }
        Ok(())
    }

    /// Removes a held seat and returns it so the caller can release it in
    /// the store.
    pub fn remove_seat(&mut self, seat_id: &str) -> Result<Seat, BookingError> {
        self.ensure_draft()?;
        let pos = self
            .seats
            .iter()
            .position(|s| s.id == seat_id)
            .ok_or_else(|| BookingError::UnknownSeat(seat_id.to_string()))?;
        let seat = self.seats.remove(pos);
        self.total -= seat.price;
        Ok(seat)
    }

    pub fn remove_snack(&mut self, snack_id: i64) -> Result<Snack, BookingError> {
        self.ensure_draft()?;
        let pos = self
            .snacks
            .iter()
            .position(|s| s.id == snack_id)
            .ok_or(BookingError::UnknownSnack(snack_id))?;
        let snack = self.snacks.remove(pos);
        self.total -= snack.price;
        Ok(snack)
    }

    /// Draft -> Confirmed. Records the payment method and freezes lines.
    pub fn confirm(&mut self, payment_method: impl Into<String>) -> Result<(), BookingError> {
        match self.status {
            BookingStatus::Draft => {
                self.payment_method = Some(payment_method.into());
                self.status = BookingStatus::Confirmed;
                Ok(())
            }
            BookingStatus::Confirmed => Err(BookingError::BookingAlreadyConfirmed),
            // There is no way back from Cancelled.
            BookingStatus::Cancelled => Err(BookingError::InvalidTransition {
                from: BookingStatus::Cancelled,
                to: BookingStatus::Confirmed,
            }),
        }
    }

    /// Draft|Confirmed -> Cancelled. Cancellation after payment is allowed
    /// and carries the same seat-release semantics.
    pub fn cancel(&mut self) -> Result<(), BookingError> {
        if self.status == BookingStatus::Cancelled {
            return Err(BookingError::BookingAlreadyCancelled);
        }
        self.status = BookingStatus::Cancelled;
        Ok(())
    }

    /// Recomputed sum of the current line items. Equal to `total` at all
    /// times; exists so tests and audits can re-check the invariant.
    pub fn line_total(&self) -> f64 {
        self.seats.iter().map(|s| s.price).sum::<f64>()
            + self.snacks.iter().map(|s| s.price).sum::<f64>()
    }
}

fn booking_code(created_at: NaiveDateTime, sequence: u64) -> String {
    format!("CB-{}-{:04}", created_at.format("%Y%m%d"), sequence)
}
