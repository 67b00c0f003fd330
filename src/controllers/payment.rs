use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::patch,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::BookingError;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/bookings/confirm", patch(confirm_payment))
}

// PATCH /api/bookings/confirm
#[derive(Debug, Deserialize)]
struct ConfirmPaymentRequest {
    booking_id: Uuid,
    payment_method: String,
}

async fn confirm_payment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConfirmPaymentRequest>,
) -> Result<impl IntoResponse, BookingError> {
    let booking = state
        .bookings
        .confirm(req.booking_id, &req.payment_method)?;

    tracing::info!(
        "booking {} confirmed: {} seats, total {:.2}, paid via {}",
        booking.code,
        booking.seats.len(),
        booking.total,
        req.payment_method
    );
    Ok((StatusCode::OK, Json(booking)))
}
