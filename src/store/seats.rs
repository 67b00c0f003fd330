use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::BookingError;
use crate::models::seat::Seat;
use crate::models::show::ShowKey;

/// One seat of a show's map, with its current availability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatStatus {
    #[serde(flatten)]
    pub seat: Seat,
    pub available: bool,
}

/// Per-show seat state. Keyed by seat id; the key set is fixed at seeding
/// time and equals the venue catalog, so available and booked seats always
/// partition the catalog.
struct ShowSeats {
    seats: BTreeMap<String, SeatStatus>,
}

/// Single source of truth for which seats are free for a given show.
///
/// Each show partition sits behind its own mutex, so `book_all` holds one
/// lock for the whole batch and other bookings of the same show can never
/// observe a half-applied batch. The outer map is only touched when shows
/// are registered.
pub struct SeatStore {
    shows: RwLock<HashMap<ShowKey, Arc<Mutex<ShowSeats>>>>,
}

impl Default for SeatStore {
    fn default() -> Self {
        Self::new()
    }
}

// Lock poisoning only happens if a panic occurred mid-operation; the data
// is a plain map, so recover the guard instead of propagating the panic.
fn locked(partition: &Mutex<ShowSeats>) -> MutexGuard<'_, ShowSeats> {
    partition.lock().unwrap_or_else(|e| e.into_inner())
}

impl SeatStore {
    pub fn new() -> Self {
        SeatStore {
            shows: RwLock::new(HashMap::new()),
        }
    }

    /// Seeds every catalog seat as available for `key`. Idempotent: a show
    /// that is already registered keeps its current state untouched.
    pub fn ensure_show(&self, key: ShowKey, catalog: &[Seat]) {
        let mut shows = self.shows.write().unwrap_or_else(|e| e.into_inner());
        shows.entry(key).or_insert_with(|| {
            let seats = catalog
                .iter()
                .map(|seat| {
                    (
                        seat.id.clone(),
                        SeatStatus {
                            seat: seat.clone(),
                            available: true,
                        },
                    )
                })
                .collect();
            Arc::new(Mutex::new(ShowSeats { seats }))
        });
    }

    pub fn contains(&self, key: &ShowKey) -> bool {
        self.shows
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(key)
    }

    fn partition(&self, key: &ShowKey) -> Result<Arc<Mutex<ShowSeats>>, BookingError> {
        self.shows
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
            .ok_or(BookingError::UnknownShow)
    }

    /// Unknown shows and unknown seats are never "available".
    pub fn is_available(&self, key: &ShowKey, seat_id: &str) -> bool {
        let Ok(partition) = self.partition(key) else {
            return false;
        };
        let guard = locked(&partition);
        guard.seats.get(seat_id).map(|s| s.available).unwrap_or(false)
    }

    /// Books a single seat. Strict: booking an already-booked seat fails
    /// with `SeatAlreadyBooked` and performs no mutation.
    pub fn book(&self, key: &ShowKey, seat_id: &str) -> Result<Seat, BookingError> {
        let partition = self.partition(key)?;
        let mut guard = locked(&partition);
        let status = guard
            .seats
            .get_mut(seat_id)
            .ok_or_else(|| BookingError::UnknownSeat(seat_id.to_string()))?;
        if !status.available {
            return Err(BookingError::SeatAlreadyBooked(seat_id.to_string()));
        }
        status.available = false;
        Ok(status.seat.clone())
    }

    /// Books a whole batch atomically under one show lock. If any id is
    /// unknown, already booked, or repeated inside the batch, the call
    /// fails with `SeatsUnavailable` listing the offending ids and the
    /// partition is left exactly as it was.
    pub fn book_all(&self, key: &ShowKey, seat_ids: &[String]) -> Result<Vec<Seat>, BookingError> {
        let partition = self.partition(key)?;
        let mut guard = locked(&partition);

        let mut seen = HashSet::new();
        let failing: Vec<String> = seat_ids
            .iter()
            .filter(|id| {
                let fresh = seen.insert(id.as_str());
                let available = guard.seats.get(id.as_str()).map(|s| s.available).unwrap_or(false);
                !(fresh && available)
            })
            .cloned()
            .collect();
        if !failing.is_empty() {
            return Err(BookingError::SeatsUnavailable(failing));
        }

        let mut booked = Vec::with_capacity(seat_ids.len());
        for id in seat_ids {
            // Validated above; the lock has been held throughout.
            if let Some(status) = guard.seats.get_mut(id.as_str()) {
                status.available = false;
                booked.push(status.seat.clone());
            }
        }
        Ok(booked)
    }

    /// Returns a seat to the pool. Releasing an already-available seat is
    /// a no-op, which keeps cancellation idempotent.
    pub fn release(&self, key: &ShowKey, seat_id: &str) -> Result<(), BookingError> {
        let partition = self.partition(key)?;
        let mut guard = locked(&partition);
        let status = guard
            .seats
            .get_mut(seat_id)
            .ok_or_else(|| BookingError::UnknownSeat(seat_id.to_string()))?;
        status.available = true;
        Ok(())
    }

    /// Releases several seats under one lock; used by cancellation.
    pub fn release_all<'a, I>(&self, key: &ShowKey, seat_ids: I) -> Result<(), BookingError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let partition = self.partition(key)?;
        let mut guard = locked(&partition);
        for seat_id in seat_ids {
            let status = guard
                .seats
                .get_mut(seat_id)
                .ok_or_else(|| BookingError::UnknownSeat(seat_id.to_string()))?;
            status.available = true;
        }
        Ok(())
    }

    /// Consistent snapshot of the whole seat map, in seat-id order.
    pub fn seat_map(&self, key: &ShowKey) -> Result<Vec<SeatStatus>, BookingError> {
        let partition = self.partition(key)?;
        let guard = locked(&partition);
        Ok(guard.seats.values().cloned().collect())
    }

    pub fn available_seats(&self, key: &ShowKey) -> Result<Vec<Seat>, BookingError> {
        Ok(self
            .seat_map(key)?
            .into_iter()
            .filter(|s| s.available)
            .map(|s| s.seat)
            .collect())
    }

    pub fn booked_seats(&self, key: &ShowKey) -> Result<Vec<Seat>, BookingError> {
        Ok(self
            .seat_map(key)?
            .into_iter()
            .filter(|s| !s.available)
            .map(|s| s.seat)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::seat::SeatPricing;
    use crate::models::venue::generate_seats;
    use chrono::NaiveDate;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn show() -> ShowKey {
        let at = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(17, 0, 0)
            .unwrap();
        ShowKey::new(1, 1, at)
    }

    fn seeded(rows: i32, columns: i32) -> SeatStore {
        let store = SeatStore::new();
        let catalog = generate_seats(rows, columns, &SeatPricing::default()).unwrap();
        store.ensure_show(show(), &catalog);
        store
    }

    fn assert_partition_invariant(store: &SeatStore, key: &ShowKey, total: usize) {
        let available: HashSet<String> = store
            .available_seats(key)
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        let booked: HashSet<String> = store
            .booked_seats(key)
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert!(available.is_disjoint(&booked));
        assert_eq!(available.len() + booked.len(), total);
    }

    #[test]
    fn ensure_show_is_idempotent_and_never_resets() {
        let store = seeded(2, 2);
        store.book(&show(), "A1").unwrap();

        let catalog = generate_seats(2, 2, &SeatPricing::default()).unwrap();
        store.ensure_show(show(), &catalog);
        assert!(!store.is_available(&show(), "A1"));
        assert_partition_invariant(&store, &show(), 4);
    }

    #[test]
    fn unknown_show_and_seat_are_never_available() {
        let store = seeded(2, 2);
        assert!(!store.is_available(&show(), "Z9"));

        let other = ShowKey::new(9, 9, show().starts_at);
        assert!(!store.is_available(&other, "A1"));
        assert_eq!(store.book(&other, "A1").unwrap_err(), BookingError::UnknownShow);
        assert_eq!(
            store.book(&show(), "Z9").unwrap_err(),
            BookingError::UnknownSeat("Z9".to_string())
        );
    }

    #[test]
    fn double_booking_fails_and_leaves_state_unchanged() {
        let store = seeded(2, 2);
        store.book(&show(), "A1").unwrap();

        let before = store.seat_map(&show()).unwrap();
        assert_eq!(
            store.book(&show(), "A1").unwrap_err(),
            BookingError::SeatAlreadyBooked("A1".to_string())
        );
        assert_eq!(store.seat_map(&show()).unwrap(), before);
        assert_partition_invariant(&store, &show(), 4);
    }

    #[test]
    fn batch_with_repeated_seat_commits_nothing() {
        let store = seeded(2, 2);
        let err = store
            .book_all(&show(), &["A1".into(), "A2".into(), "A1".into()])
            .unwrap_err();
        assert_eq!(err, BookingError::SeatsUnavailable(vec!["A1".to_string()]));

        assert!(store.is_available(&show(), "A1"));
        assert!(store.is_available(&show(), "A2"));
        assert_partition_invariant(&store, &show(), 4);
    }

    #[test]
    fn batch_reports_every_failing_id() {
        let store = seeded(2, 2);
        store.book(&show(), "B1").unwrap();

        let err = store
            .book_all(&show(), &["A1".into(), "B1".into(), "Z9".into()])
            .unwrap_err();
        assert_eq!(
            err,
            BookingError::SeatsUnavailable(vec!["B1".to_string(), "Z9".to_string()])
        );
        // A1 was part of the failed batch and must not have been taken.
        assert!(store.is_available(&show(), "A1"));
    }

    #[test]
    fn successful_batch_books_all_requested_seats() {
        let store = seeded(2, 2);
        let seats = store.book_all(&show(), &["A1".into(), "B2".into()]).unwrap();
        assert_eq!(seats.len(), 2);
        assert!(!store.is_available(&show(), "A1"));
        assert!(!store.is_available(&show(), "B2"));
        assert!(store.is_available(&show(), "A2"));
        assert_partition_invariant(&store, &show(), 4);
    }

    #[test]
    fn release_restores_availability_and_is_idempotent() {
        let store = seeded(2, 2);
        store.book(&show(), "A1").unwrap();
        store.release(&show(), "A1").unwrap();
        assert!(store.is_available(&show(), "A1"));

        // Releasing an already-available seat is not an error.
        store.release(&show(), "A1").unwrap();
        assert!(store.is_available(&show(), "A1"));
        assert_partition_invariant(&store, &show(), 4);
    }

    #[test]
    fn racing_for_the_last_seat_yields_exactly_one_winner() {
        let store = Arc::new(seeded(1, 1));
        let barrier = Arc::new(std::sync::Barrier::new(2));

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let store = Arc::clone(&store);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    store.book(&show(), "A1")
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let wins = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(wins, 1);
        assert!(results
            .iter()
            .any(|r| r == &Err(BookingError::SeatAlreadyBooked("A1".to_string()))));
    }
}
