use std::sync::RwLock;

use chrono::{NaiveDateTime, Utc};

use crate::error::BookingError;
use crate::models::seat::SeatPricing;
use crate::models::{Movie, Show, ShowKey, Snack, Venue};
use crate::store::seats::SeatStore;

struct CatalogInner {
    movies: Vec<Movie>,
    venues: Vec<Venue>,
    shows: Vec<Show>,
    snacks: Vec<Snack>,
}

/// The static side of the system: movies, venues, registered shows and the
/// snack menu. Readers always get cloned snapshots; mutation goes through
/// the explicit methods below.
pub struct Catalog {
    inner: RwLock<CatalogInner>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Catalog {
            inner: RwLock::new(CatalogInner {
                movies: Vec::new(),
                venues: Vec::new(),
                shows: Vec::new(),
                snacks: Vec::new(),
            }),
        }
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, CatalogInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, CatalogInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn add_movie(&self, movie: Movie) {
        self.write().movies.push(movie);
    }

    pub fn add_venue(
        &self,
        id: i64,
        name: &str,
        rows: i32,
        columns: i32,
        pricing: &SeatPricing,
    ) -> Result<Venue, BookingError> {
        let venue = Venue::new(id, name, rows, columns, pricing)?;
        self.write().venues.push(venue.clone());
        Ok(venue)
    }

    pub fn add_snack(&self, snack: Snack) {
        self.write().snacks.push(snack);
    }

    /// Registers a screening and seeds its seat partition in the store.
    /// Idempotent: re-registering an existing show returns it unchanged.
    pub fn register_show(
        &self,
        movie_id: i64,
        venue_id: i64,
        starts_at: NaiveDateTime,
        seats: &SeatStore,
    ) -> Result<Show, BookingError> {
        let key = ShowKey::new(movie_id, venue_id, starts_at);
        let mut inner = self.write();

        if let Some(existing) = inner.shows.iter().find(|s| s.key == key) {
            return Ok(existing.clone());
        }

        let movie = inner
            .movies
            .iter()
            .find(|m| m.id == movie_id)
            .ok_or(BookingError::UnknownMovie(movie_id))?;
        let venue = inner
            .venues
            .iter()
            .find(|v| v.id == venue_id)
            .ok_or(BookingError::UnknownVenue(venue_id))?;

        let show = Show {
            key,
            movie_title: movie.title.clone(),
            venue_name: venue.name.clone(),
        };
        seats.ensure_show(key, venue.seats());
        inner.shows.push(show.clone());
        Ok(show)
    }

    pub fn movies(&self) -> Vec<Movie> {
        self.read().movies.clone()
    }

    pub fn movie(&self, id: i64) -> Result<Movie, BookingError> {
        self.read()
            .movies
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(BookingError::UnknownMovie(id))
    }

    pub fn venues(&self) -> Vec<Venue> {
        self.read().venues.clone()
    }

    pub fn venue(&self, id: i64) -> Result<Venue, BookingError> {
        self.read()
            .venues
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or(BookingError::UnknownVenue(id))
    }

    pub fn shows(&self) -> Vec<Show> {
        self.read().shows.clone()
    }

    pub fn show(&self, key: &ShowKey) -> Result<Show, BookingError> {
        self.read()
            .shows
            .iter()
            .find(|s| s.key == *key)
            .cloned()
            .ok_or(BookingError::UnknownShow)
    }

    pub fn snacks(&self) -> Vec<Snack> {
        self.read().snacks.clone()
    }

    pub fn snack(&self, id: i64) -> Result<Snack, BookingError> {
        self.read()
            .snacks
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(BookingError::UnknownSnack(id))
    }

    /// Seeds the demo data the binary starts with: three 8x10 halls, three
    /// movies with two showtimes each, and the standard snack menu.
    pub fn seed_demo(&self, seats: &SeatStore, pricing: &SeatPricing) -> Result<(), BookingError> {
        for (id, name) in [(1, "Cinema 1"), (2, "Cinema 2"), (3, "Cinema 3")] {
            self.add_venue(id, name, 8, 10, pricing)?;
        }

        self.add_movie(Movie {
            id: 1,
            title: "Avengers: Endgame".to_string(),
            description: None,
            genre: "Action, Adventure, Drama".to_string(),
            duration_minutes: 181,
            rating: Some("PG-13".to_string()),
        });
        self.add_movie(Movie {
            id: 2,
            title: "Frozen II".to_string(),
            description: None,
            genre: "Animation, Adventure, Comedy".to_string(),
            duration_minutes: 103,
            rating: Some("PG".to_string()),
        });
        self.add_movie(Movie {
            id: 3,
            title: "Joker".to_string(),
            description: None,
            genre: "Crime, Drama, Thriller".to_string(),
            duration_minutes: 122,
            rating: Some("R".to_string()),
        });

        let today = Utc::now().date_naive();
        let slot = |hour, minute| today.and_hms_opt(hour, minute, 0).unwrap_or_default();
        let schedule = [
            (1, 1, slot(17, 0)),
            (1, 1, slot(20, 30)),
            (2, 2, slot(15, 0)),
            (2, 2, slot(19, 30)),
            (3, 3, slot(18, 30)),
            (3, 3, slot(21, 0)),
        ];
        for (movie_id, venue_id, starts_at) in schedule {
            self.register_show(movie_id, venue_id, starts_at, seats)?;
        }

        for (id, name, category, price, description) in [
            (1, "Small Popcorn", "Popcorn", 70.0, "Small buttered popcorn"),
            (2, "Medium Popcorn", "Popcorn", 120.0, "Medium buttered popcorn"),
            (3, "Large Popcorn", "Popcorn", 160.0, "Large buttered popcorn"),
            (4, "Caramel Popcorn", "Popcorn", 140.0, "Sweet caramel coated popcorn"),
            (5, "Small Soda", "Drink", 50.0, "Small fountain soda"),
            (6, "Medium Soda", "Drink", 80.0, "Medium fountain soda"),
            (7, "Large Soda", "Drink", 100.0, "Large fountain soda"),
            (8, "Bottled Water", "Drink", 40.0, "500ml bottled water"),
            (9, "Popcorn & Soda Combo", "Combo", 180.0, "Medium popcorn with medium soda"),
            (10, "Family Combo", "Combo", 350.0, "Large popcorn with 2 large sodas"),
            (11, "Snack Platter", "Combo", 250.0, "Medium popcorn, nachos and medium soda"),
        ] {
            self.add_snack(Snack::new(id, name, category, price, description));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn register_show_needs_known_movie_and_venue() {
        let catalog = Catalog::new();
        let seats = SeatStore::new();
        catalog
            .add_venue(1, "Cinema 1", 4, 2, &SeatPricing::default())
            .unwrap();

        assert_eq!(
            catalog.register_show(7, 1, at(17), &seats).unwrap_err(),
            BookingError::UnknownMovie(7)
        );
    }

    #[test]
    fn register_show_seeds_the_seat_store_once() {
        let catalog = Catalog::new();
        let seats = SeatStore::new();
        catalog
            .add_venue(1, "Cinema 1", 4, 2, &SeatPricing::default())
            .unwrap();
        catalog.add_movie(Movie {
            id: 1,
            title: "Joker".to_string(),
            description: None,
            genre: "Drama".to_string(),
            duration_minutes: 122,
            rating: None,
        });

        let show = catalog.register_show(1, 1, at(17), &seats).unwrap();
        seats.book(&show.key, "A1").unwrap();

        // Re-registering must not reset booked seats or duplicate the show.
        let again = catalog.register_show(1, 1, at(17), &seats).unwrap();
        assert_eq!(again, show);
        assert_eq!(catalog.shows().len(), 1);
        assert!(!seats.is_available(&show.key, "A1"));
    }

    #[test]
    fn demo_seed_registers_shows_and_snacks() {
        let catalog = Catalog::new();
        let seats = SeatStore::new();
        catalog.seed_demo(&seats, &SeatPricing::default()).unwrap();

        assert_eq!(catalog.movies().len(), 3);
        assert_eq!(catalog.venues().len(), 3);
        assert_eq!(catalog.shows().len(), 6);
        assert_eq!(catalog.snacks().len(), 11);
        for show in catalog.shows() {
            assert_eq!(seats.available_seats(&show.key).unwrap().len(), 80);
        }
    }
}
