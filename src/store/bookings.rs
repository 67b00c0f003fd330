use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;

use crate::error::BookingError;
use crate::models::booking::{Booking, BookingStatus};
use crate::models::show::ShowKey;
use crate::models::snack::Snack;
use crate::store::seats::SeatStore;

struct LedgerInner {
    bookings: HashMap<Uuid, Booking>,
    next_sequence: u64,
}

/// Owns every booking and coordinates aggregate mutation with the seat
/// store. All reads hand out cloned snapshots; the live aggregates are
/// only reachable through the ledger's own methods.
///
/// Lock order is always ledger first, then the seat store, so the two can
/// never deadlock against each other.
pub struct BookingLedger {
    inner: RwLock<LedgerInner>,
}

impl Default for BookingLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingLedger {
    pub fn new() -> Self {
        BookingLedger {
            inner: RwLock::new(LedgerInner {
                bookings: HashMap::new(),
                next_sequence: 1,
            }),
        }
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, LedgerInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, LedgerInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Opens a draft booking for a registered show.
    pub fn create(
        &self,
        customer: impl Into<String>,
        show: ShowKey,
        seats: &SeatStore,
    ) -> Result<Booking, BookingError> {
        if !seats.contains(&show) {
            return Err(BookingError::UnknownShow);
        }
        let mut inner = self.write();
        let sequence = inner.next_sequence;
        inner.next_sequence += 1;

        let booking = Booking::new(customer, show, sequence, Utc::now().naive_utc());
        inner.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    /// Adds a batch of seats to a draft booking. All-or-nothing: if any
    /// seat of the batch is unavailable, nothing is booked and the ledger
    /// and store are left as if the call never happened.
    pub fn add_seats(
        &self,
        id: Uuid,
        seat_ids: &[String],
        seats: &SeatStore,
    ) -> Result<Booking, BookingError> {
        let mut inner = self.write();
        let booking = inner
            .bookings
            .get_mut(&id)
            .ok_or(BookingError::UnknownBooking)?;
        // Reject before touching the store so a frozen booking can never
        // grab seats it would immediately have to give back.
        booking.ensure_draft()?;

        let booked = seats.book_all(&booking.show, seat_ids)?;
        booking.add_seats(booked)?;
        Ok(booking.clone())
    }

    pub fn add_snacks(&self, id: Uuid, snacks: Vec<Snack>) -> Result<Booking, BookingError> {
        let mut inner = self.write();
        let booking = inner
            .bookings
            .get_mut(&id)
            .ok_or(BookingError::UnknownBooking)?;
        booking.add_snacks(snacks)?;
        Ok(booking.clone())
    }

    /// Drops a seat from a draft booking and releases it in the store.
    pub fn remove_seat(
        &self,
        id: Uuid,
        seat_id: &str,
        seats: &SeatStore,
    ) -> Result<Booking, BookingError> {
        let mut inner = self.write();
        let booking = inner
            .bookings
            .get_mut(&id)
            .ok_or(BookingError::UnknownBooking)?;
        let removed = booking.remove_seat(seat_id)?;
        seats.release(&booking.show, &removed.id)?;
        Ok(booking.clone())
    }

    pub fn remove_snack(&self, id: Uuid, snack_id: i64) -> Result<Booking, BookingError> {
        let mut inner = self.write();
        let booking = inner
            .bookings
            .get_mut(&id)
            .ok_or(BookingError::UnknownBooking)?;
        booking.remove_snack(snack_id)?;
        Ok(booking.clone())
    }

    /// Records payment and freezes the booking.
    pub fn confirm(&self, id: Uuid, payment_method: &str) -> Result<Booking, BookingError> {
        let mut inner = self.write();
        let booking = inner
            .bookings
            .get_mut(&id)
            .ok_or(BookingError::UnknownBooking)?;
        booking.confirm(payment_method)?;
        Ok(booking.clone())
    }

    /// Cancels a booking, before or after payment, releasing every seat it
    /// currently holds.
    pub fn cancel(&self, id: Uuid, seats: &SeatStore) -> Result<Booking, BookingError> {
        let mut inner = self.write();
        let booking = inner
            .bookings
            .get_mut(&id)
            .ok_or(BookingError::UnknownBooking)?;
        booking.cancel()?;
        seats.release_all(&booking.show, booking.seats.iter().map(|s| s.id.as_str()))?;
        Ok(booking.clone())
    }

    pub fn get(&self, id: Uuid) -> Result<Booking, BookingError> {
        self.read()
            .bookings
            .get(&id)
            .cloned()
            .ok_or(BookingError::UnknownBooking)
    }

    /// Snapshot of a customer's bookings, newest first.
    pub fn by_customer(&self, customer: &str) -> Vec<Booking> {
        let mut found: Vec<Booking> = self
            .read()
            .bookings
            .values()
            .filter(|b| b.customer == customer)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found
    }

    /// Snapshot of all confirmed bookings; the reporting input.
    pub fn confirmed(&self) -> Vec<Booking> {
        self.read()
            .bookings
            .values()
            .filter(|b| b.status == BookingStatus::Confirmed)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::seat::SeatPricing;
    use crate::models::venue::generate_seats;
    use chrono::NaiveDate;

    fn show() -> ShowKey {
        let at = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(17, 0, 0)
            .unwrap();
        ShowKey::new(1, 1, at)
    }

    fn setup() -> (BookingLedger, SeatStore) {
        let store = SeatStore::new();
        // 4x2 hall: A/B Standard at 180, C/D Deluxe at 250.
        let catalog = generate_seats(4, 2, &SeatPricing::default()).unwrap();
        store.ensure_show(show(), &catalog);
        (BookingLedger::new(), store)
    }

    #[test]
    fn create_requires_a_registered_show() {
        let (ledger, store) = setup();
        let missing = ShowKey::new(9, 9, show().starts_at);
        assert_eq!(
            ledger.create("alice", missing, &store).unwrap_err(),
            BookingError::UnknownShow
        );
    }

    #[test]
    fn booking_codes_are_sequential() {
        let (ledger, store) = setup();
        let first = ledger.create("alice", show(), &store).unwrap();
        let second = ledger.create("bob", show(), &store).unwrap();
        assert!(first.code.ends_with("-0001"));
        assert!(second.code.ends_with("-0002"));
    }

    #[test]
    fn example_scenario_total_and_cancel() {
        let (ledger, store) = setup();
        let draft = ledger.create("alice", show(), &store).unwrap();

        let booked = ledger
            .add_seats(draft.id, &["A1".into(), "C1".into()], &store)
            .unwrap();
        assert_eq!(booked.total, 430.0);
        assert_eq!(store.available_seats(&show()).unwrap().len(), 6);

        let cancelled = ledger.cancel(draft.id, &store).unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
        assert_eq!(store.available_seats(&show()).unwrap().len(), 8);
        assert_eq!(store.booked_seats(&show()).unwrap().len(), 0);
    }

    #[test]
    fn failed_batch_leaves_ledger_and_store_untouched() {
        let (ledger, store) = setup();
        let rival = ledger.create("bob", show(), &store).unwrap();
        ledger.add_seats(rival.id, &["B1".into()], &store).unwrap();

        let draft = ledger.create("alice", show(), &store).unwrap();
        let err = ledger
            .add_seats(draft.id, &["A1".into(), "B1".into()], &store)
            .unwrap_err();
        assert_eq!(err, BookingError::SeatsUnavailable(vec!["B1".to_string()]));

        let after = ledger.get(draft.id).unwrap();
        assert!(after.seats.is_empty());
        assert_eq!(after.total, 0.0);
        assert!(store.is_available(&show(), "A1"));
    }

    #[test]
    fn confirmed_booking_cannot_take_more_seats() {
        let (ledger, store) = setup();
        let draft = ledger.create("alice", show(), &store).unwrap();
        ledger.add_seats(draft.id, &["A1".into()], &store).unwrap();
        ledger.confirm(draft.id, "card").unwrap();

        let err = ledger
            .add_seats(draft.id, &["A2".into()], &store)
            .unwrap_err();
        assert_eq!(err, BookingError::BookingAlreadyConfirmed);
        // The rejected seat was never taken from the store.
        assert!(store.is_available(&show(), "A2"));
    }

    #[test]
    fn remove_seat_releases_it_and_updates_the_total() {
        let (ledger, store) = setup();
        let draft = ledger.create("alice", show(), &store).unwrap();
        ledger
            .add_seats(draft.id, &["A1".into(), "D2".into()], &store)
            .unwrap();

        let after = ledger.remove_seat(draft.id, "D2", &store).unwrap();
        assert_eq!(after.total, 180.0);
        assert_eq!(after.total, after.line_total());
        assert!(store.is_available(&show(), "D2"));
        assert!(!store.is_available(&show(), "A1"));
    }

    #[test]
    fn cancel_after_payment_still_releases_seats() {
        let (ledger, store) = setup();
        let draft = ledger.create("alice", show(), &store).unwrap();
        ledger.add_seats(draft.id, &["C1".into()], &store).unwrap();
        ledger.confirm(draft.id, "gcash").unwrap();

        ledger.cancel(draft.id, &store).unwrap();
        assert!(store.is_available(&show(), "C1"));
        assert!(ledger.confirmed().is_empty());
    }

    #[test]
    fn cancel_releases_only_the_bookings_own_seats() {
        let (ledger, store) = setup();
        let mine = ledger.create("alice", show(), &store).unwrap();
        let theirs = ledger.create("bob", show(), &store).unwrap();
        ledger.add_seats(mine.id, &["A1".into()], &store).unwrap();
        ledger.add_seats(theirs.id, &["B1".into()], &store).unwrap();

        ledger.cancel(mine.id, &store).unwrap();
        assert!(store.is_available(&show(), "A1"));
        assert!(!store.is_available(&show(), "B1"));
    }

    #[test]
    fn confirmed_lists_only_paid_bookings() {
        let (ledger, store) = setup();
        let paid = ledger.create("alice", show(), &store).unwrap();
        ledger.add_seats(paid.id, &["A1".into()], &store).unwrap();
        ledger.confirm(paid.id, "card").unwrap();
        ledger.create("bob", show(), &store).unwrap();

        let confirmed = ledger.confirmed();
        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0].id, paid.id);
    }
}
