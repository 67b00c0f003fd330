//! Read-side rollups over confirmed bookings and the seat store.
//!
//! Everything here is a pure fold over snapshots: no mutation, and empty
//! input always produces empty or zeroed aggregates instead of an error.

use std::collections::BTreeMap;

use crate::error::BookingError;
use crate::models::booking::Booking;
use crate::models::show::ShowKey;
use crate::store::seats::SeatStore;

/// Seats sold per movie id.
pub fn tickets_per_movie(bookings: &[Booking]) -> BTreeMap<i64, u64> {
    let mut tickets = BTreeMap::new();
    for booking in bookings {
        *tickets.entry(booking.show.movie_id).or_insert(0) += booking.seats.len() as u64;
    }
    tickets
}

/// Seats sold per venue id.
pub fn tickets_per_venue(bookings: &[Booking]) -> BTreeMap<i64, u64> {
    let mut tickets = BTreeMap::new();
    for booking in bookings {
        *tickets.entry(booking.show.venue_id).or_insert(0) += booking.seats.len() as u64;
    }
    tickets
}

/// Revenue (seats plus snacks) per movie id.
pub fn revenue_per_movie(bookings: &[Booking]) -> BTreeMap<i64, f64> {
    let mut revenue = BTreeMap::new();
    for booking in bookings {
        *revenue.entry(booking.show.movie_id).or_insert(0.0) += booking.total;
    }
    revenue
}

/// Revenue (seats plus snacks) per venue id.
pub fn revenue_per_venue(bookings: &[Booking]) -> BTreeMap<i64, f64> {
    let mut revenue = BTreeMap::new();
    for booking in bookings {
        *revenue.entry(booking.show.venue_id).or_insert(0.0) += booking.total;
    }
    revenue
}

/// Booked share of the show's catalog as a percentage. A show with an
/// empty catalog reports 0.0 rather than dividing by zero.
pub fn occupancy(seats: &SeatStore, key: &ShowKey) -> Result<f64, BookingError> {
    let map = seats.seat_map(key)?;
    if map.is_empty() {
        return Ok(0.0);
    }
    let booked = map.iter().filter(|s| !s.available).count();
    Ok(booked as f64 / map.len() as f64 * 100.0)
}
