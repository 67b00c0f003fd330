use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Identity of a single screening: this movie, in this hall, at this time.
/// Value-based equality and hashing; used as the partition key for all
/// per-show seat state, replacing ad-hoc string concatenation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShowKey {
    pub movie_id: i64,
    pub venue_id: i64,
    pub starts_at: NaiveDateTime,
}

impl ShowKey {
    pub fn new(movie_id: i64, venue_id: i64, starts_at: NaiveDateTime) -> Self {
        ShowKey {
            movie_id,
            venue_id,
            starts_at,
        }
    }
}

/// A registered screening, with display data denormalized for listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub key: ShowKey,
    pub movie_title: String,
    pub venue_name: String,
}
