pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

// Shared state for the whole application.
pub struct AppState {
    pub catalog: services::Catalog,
    pub seats: store::SeatStore,
    pub bookings: store::BookingLedger,
    pub config: config::Config,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        Self {
            catalog: services::Catalog::new(),
            seats: store::SeatStore::new(),
            bookings: store::BookingLedger::new(),
            config,
        }
    }
}
