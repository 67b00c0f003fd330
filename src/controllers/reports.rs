use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::BookingError;
use crate::services::reports;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/reports", get(get_report))
}

// GET /api/reports?kind=tickets-per-movie
#[derive(Debug, Deserialize)]
struct ReportQuery {
    kind: String,
}

#[derive(Debug, Serialize)]
struct TicketsRow {
    id: i64,
    name: String,
    tickets: u64,
}

#[derive(Debug, Serialize)]
struct RevenueRow {
    id: i64,
    name: String,
    revenue: f64,
}

#[derive(Debug, Serialize)]
struct OccupancyRow {
    movie_title: String,
    venue_name: String,
    starts_at: chrono::NaiveDateTime,
    occupancy_percent: f64,
}

async fn get_report(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReportQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let confirmed = state.bookings.confirmed();

    let body = match params.kind.as_str() {
        "tickets-per-movie" => json!(tickets_rows(
            reports::tickets_per_movie(&confirmed),
            |id| state.catalog.movie(id).map(|m| m.title),
        )),
        "tickets-per-venue" => json!(tickets_rows(
            reports::tickets_per_venue(&confirmed),
            |id| state.catalog.venue(id).map(|v| v.name),
        )),
        "revenue-per-movie" => json!(revenue_rows(
            reports::revenue_per_movie(&confirmed),
            |id| state.catalog.movie(id).map(|m| m.title),
        )),
        "revenue-per-venue" => json!(revenue_rows(
            reports::revenue_per_venue(&confirmed),
            |id| state.catalog.venue(id).map(|v| v.name),
        )),
        "occupancy" => {
            let mut rows = Vec::new();
            for show in state.catalog.shows() {
                let percent = reports::occupancy(&state.seats, &show.key).map_err(|e| {
                    tracing::error!("occupancy report failed for {:?}: {:?}", show.key, e);
                    (StatusCode::INTERNAL_SERVER_ERROR, "failed to build report".to_string())
                })?;
                rows.push(OccupancyRow {
                    movie_title: show.movie_title,
                    venue_name: show.venue_name,
                    starts_at: show.key.starts_at,
                    occupancy_percent: percent,
                });
            }
            json!(rows)
        }
        other => {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("unknown report kind: {}", other),
            ));
        }
    };

    Ok((StatusCode::OK, Json(body)))
}

fn tickets_rows<F>(grouped: BTreeMap<i64, u64>, name_of: F) -> Vec<TicketsRow>
where
    F: Fn(i64) -> Result<String, BookingError>,
{
    grouped
        .into_iter()
        .map(|(id, tickets)| TicketsRow {
            id,
            name: name_of(id).unwrap_or_else(|_| format!("#{}", id)),
            tickets,
        })
        .collect()
}

fn revenue_rows<F>(grouped: BTreeMap<i64, f64>, name_of: F) -> Vec<RevenueRow>
where
    F: Fn(i64) -> Result<String, BookingError>,
{
    grouped
        .into_iter()
        .map(|(id, revenue)| RevenueRow {
            id,
            name: name_of(id).unwrap_or_else(|_| format!("#{}", id)),
            revenue,
        })
        .collect()
}
