use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinebook::{config::Config, controllers, AppState};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CineBook API");

    // Build the in-memory state and seed the demo catalog
    let pricing = config.pricing;
    let app_state = Arc::new(AppState::new(config));
    app_state.catalog.seed_demo(&app_state.seats, &pricing)?;
    info!(
        "Catalog seeded: {} movies, {} venues, {} shows",
        app_state.catalog.movies().len(),
        app_state.catalog.venues().len(),
        app_state.catalog.shows().len()
    );

    // Create the main router
    let app = Router::new()
        .route("/", get(|| async { "CineBook API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        // Mount the routes from the controllers module
        .nest("/api", controllers::routes())
        // Pass the application state to the router
        .with_state(app_state.clone())
        .layer(TraceLayer::new_for_http());

    let host: std::net::IpAddr = app_state.config.app.host.parse()?;
    let addr = SocketAddr::from((host, app_state.config.app.port));
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
