use serde::Deserialize;
use std::env;

use crate::models::seat::SeatPricing;

// Top-level configuration container.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub pricing: SeatPricing,
}

// Application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app: AppConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                environment: "development".to_string(),
                rust_log: "cinebook=debug,tower_http=debug".to_string(),
            },
            pricing: SeatPricing::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or(defaults.app.host),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()
                    .expect("PORT must be a valid number"),
                environment: env::var("ENVIRONMENT").unwrap_or(defaults.app.environment),
                rust_log: env::var("RUST_LOG").unwrap_or(defaults.app.rust_log),
            },
            pricing: SeatPricing {
                standard: env::var("SEAT_PRICE_STANDARD")
                    .unwrap_or_else(|_| "180".to_string())
                    .parse()
                    .expect("SEAT_PRICE_STANDARD must be a valid number"),
                deluxe: env::var("SEAT_PRICE_DELUXE")
                    .unwrap_or_else(|_| "250".to_string())
                    .parse()
                    .expect("SEAT_PRICE_DELUXE must be a valid number"),
            },
        }
    }
}
