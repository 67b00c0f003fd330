use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::models::booking::BookingStatus;

/// Typed failures of the booking core. All of these are recoverable
/// conditions surfaced to the HTTP layer as 4xx responses.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BookingError {
    #[error("invalid seat grid dimensions {rows}x{columns}")]
    InvalidDimensions { rows: i32, columns: i32 },

    #[error("show is not registered")]
    UnknownShow,

    #[error("seat {0} does not exist for this show")]
    UnknownSeat(String),

    #[error("seat {0} is already booked")]
    SeatAlreadyBooked(String),

    #[error("seats unavailable: {}", .0.join(", "))]
    SeatsUnavailable(Vec<String>),

    #[error("booking is already confirmed")]
    BookingAlreadyConfirmed,

    #[error("booking is already cancelled")]
    BookingAlreadyCancelled,

    #[error("invalid booking transition {from:?} -> {to:?}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error("booking not found")]
    UnknownBooking,

    #[error("movie {0} not found")]
    UnknownMovie(i64),

    #[error("venue {0} not found")]
    UnknownVenue(i64),

    #[error("snack {0} not found")]
    UnknownSnack(i64),
}

impl BookingError {
    fn status_code(&self) -> StatusCode {
        match self {
            BookingError::InvalidDimensions { .. } => StatusCode::BAD_REQUEST,
            BookingError::UnknownShow
            | BookingError::UnknownSeat(_)
            | BookingError::UnknownBooking
            | BookingError::UnknownMovie(_)
            | BookingError::UnknownVenue(_)
            | BookingError::UnknownSnack(_) => StatusCode::NOT_FOUND,
            BookingError::SeatAlreadyBooked(_)
            | BookingError::SeatsUnavailable(_)
            | BookingError::BookingAlreadyConfirmed
            | BookingError::BookingAlreadyCancelled
            | BookingError::InvalidTransition { .. } => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = match &self {
            // Carry the failing subset so the client can re-render the seat map.
            BookingError::SeatsUnavailable(ids) => json!({
                "error": self.to_string(),
                "unavailable_seats": ids,
            }),
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
