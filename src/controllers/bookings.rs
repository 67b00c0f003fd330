use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::BookingError;
use crate::models::{ShowKey, Snack};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bookings", post(create_booking))
        .route("/bookings", get(get_customer_bookings))
        .route("/bookings/seats/add", patch(add_seats))
        .route("/bookings/seats/remove", patch(remove_seat))
        .route("/bookings/snacks/add", patch(add_snacks))
        .route("/bookings/snacks/remove", patch(remove_snack))
        .route("/bookings/cancel", patch(cancel_booking))
        .route("/snacks", get(get_snack_menu))
}

/* ---------- BOOKINGS ---------- */

// POST /api/bookings
#[derive(Debug, Deserialize)]
struct CreateBookingRequest {
    customer: String,
    movie_id: i64,
    venue_id: i64,
    starts_at: NaiveDateTime,
}

async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if req.customer.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "customer must not be empty".to_string()));
    }

    let key = ShowKey::new(req.movie_id, req.venue_id, req.starts_at);
    let booking = state
        .bookings
        .create(req.customer, key, &state.seats)
        .map_err(|e| (StatusCode::NOT_FOUND, e.to_string()))?;

    tracing::info!("booking {} opened for show {:?}", booking.code, key);
    Ok((StatusCode::CREATED, Json(booking)))
}

// GET /api/bookings?customer=alice
#[derive(Debug, Deserialize)]
struct BookingsQuery {
    customer: String,
}

async fn get_customer_bookings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BookingsQuery>,
) -> impl IntoResponse {
    let bookings = state.bookings.by_customer(&params.customer);
    (StatusCode::OK, Json(bookings))
}

/* ---------- SEATS ---------- */

// PATCH /api/bookings/seats/add
#[derive(Debug, Deserialize)]
struct AddSeatsRequest {
    booking_id: Uuid,
    seat_ids: Vec<String>,
}

async fn add_seats(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddSeatsRequest>,
) -> Result<impl IntoResponse, BookingError> {
    let booking = state
        .bookings
        .add_seats(req.booking_id, &req.seat_ids, &state.seats)?;
    Ok((StatusCode::OK, Json(booking)))
}

// PATCH /api/bookings/seats/remove
#[derive(Debug, Deserialize)]
struct RemoveSeatRequest {
    booking_id: Uuid,
    seat_id: String,
}

async fn remove_seat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RemoveSeatRequest>,
) -> Result<impl IntoResponse, BookingError> {
    let booking = state
        .bookings
        .remove_seat(req.booking_id, &req.seat_id, &state.seats)?;
    Ok((StatusCode::OK, Json(booking)))
}

/* ---------- SNACKS ---------- */

// GET /api/snacks
async fn get_snack_menu(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.catalog.snacks()))
}

// PATCH /api/bookings/snacks/add
#[derive(Debug, Deserialize)]
struct AddSnacksRequest {
    booking_id: Uuid,
    snack_ids: Vec<i64>,
}

async fn add_snacks(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddSnacksRequest>,
) -> Result<impl IntoResponse, BookingError> {
    let snacks: Vec<Snack> = req
        .snack_ids
        .iter()
        .map(|id| state.catalog.snack(*id))
        .collect::<Result<_, _>>()?;

    let booking = state.bookings.add_snacks(req.booking_id, snacks)?;
    Ok((StatusCode::OK, Json(booking)))
}

// PATCH /api/bookings/snacks/remove
#[derive(Debug, Deserialize)]
struct RemoveSnackRequest {
    booking_id: Uuid,
    snack_id: i64,
}

async fn remove_snack(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RemoveSnackRequest>,
) -> Result<impl IntoResponse, BookingError> {
    let booking = state.bookings.remove_snack(req.booking_id, req.snack_id)?;
    Ok((StatusCode::OK, Json(booking)))
}

/* ---------- CANCELLATION ---------- */

// PATCH /api/bookings/cancel
#[derive(Debug, Deserialize)]
struct CancelBookingRequest {
    booking_id: Uuid,
}

async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CancelBookingRequest>,
) -> Result<impl IntoResponse, BookingError> {
    let booking = state.bookings.cancel(req.booking_id, &state.seats)?;
    tracing::info!(
        "booking {} cancelled, {} seats released",
        booking.code,
        booking.seats.len()
    );
    Ok((StatusCode::OK, Json(booking)))
}
