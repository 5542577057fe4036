//! pizza-server — Pizza ordering backend
//!
//! Long-running service that:
//! - Serves the public menu catalog
//! - Prices and stores customer orders (pizza customization, coupons, tax)
//! - Applies and removes coupons on existing orders (JWT authenticated)

mod api;
mod auth;
mod config;
mod db;
mod error;
mod orders;
mod pricing;
mod state;

use config::Config;
use error::BoxError;
use state::AppState;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pizza_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!(
        "Starting pizza-server (env: {}, tax rate: {})",
        config.environment,
        config.tax_rate
    );

    let state = AppState::new(&config).await?;
    let app = api::create_router(state);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("pizza-server HTTP listening on {http_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
