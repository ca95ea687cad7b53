use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rewatch_core::Enricher;
use youtube_client::YouTubeClient;

mod config;
mod rest;

use config::Config;

pub struct AppState {
    pub enricher: Enricher,
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        // Watch-history enrichment (trailing slash is the published path)
        .route("/scrape-watch-history/", post(rest::scrape_watch_history))
        .with_state(state)
        // A whole Takeout export posts as one multi-megabyte body; no size cap
        .layer(DefaultBodyLimit::disable())
        // CORS
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Logging layer: method + path + status + latency only (no query params)
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("rewatch=info".parse()?))
        .init();

    let config = Config::from_env();

    let catalog = Arc::new(YouTubeClient::new(config.youtube_api_key));
    let state = Arc::new(AppState {
        enricher: Enricher::new(catalog),
    });

    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("Rewatch API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
