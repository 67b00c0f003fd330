use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::BookingError;
use crate::models::ShowKey;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/shows", get(list_shows))
        .route("/shows/seat-map", get(get_seat_map))
}

/* ---------- SHOWS ---------- */

// GET /api/shows
#[derive(Debug, Serialize)]
struct ShowResponse {
    movie_id: i64,
    venue_id: i64,
    starts_at: NaiveDateTime,
    movie_title: String,
    venue_name: String,
}

async fn list_shows(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let shows: Vec<ShowResponse> = state
        .catalog
        .shows()
        .into_iter()
        .map(|s| ShowResponse {
            movie_id: s.key.movie_id,
            venue_id: s.key.venue_id,
            starts_at: s.key.starts_at,
            movie_title: s.movie_title,
            venue_name: s.venue_name,
        })
        .collect();
    (StatusCode::OK, Json(shows))
}

/* ---------- SEAT MAP ---------- */

// GET /api/shows/seat-map?movie_id=1&venue_id=1&starts_at=2025-06-01T17:00:00
#[derive(Debug, Deserialize)]
struct SeatMapQuery {
    movie_id: i64,
    venue_id: i64,
    starts_at: NaiveDateTime,
}

async fn get_seat_map(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SeatMapQuery>,
) -> Result<impl IntoResponse, BookingError> {
    let key = ShowKey::new(params.movie_id, params.venue_id, params.starts_at);
    let seat_map = state.seats.seat_map(&key)?;
    Ok((StatusCode::OK, Json(seat_map)))
}
