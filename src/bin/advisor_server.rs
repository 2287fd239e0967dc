// Advisor Server Binary Entry Point
//
// Purpose: Serve the soil analysis form and forward submissions to the prediction endpoint
// Usage: cargo run --features web --bin advisor_server

use crop_advisor_rust::{AdvisorConfig, AppState, create_router};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "crop_advisor_rust=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting advisor server...");

    let config = AdvisorConfig::from_env()?;

    tracing::info!("Configuration:");
    tracing::info!("  PREDICT_URL: {}", config.predict_url);
    tracing::info!("  PREDICT_LANG: {}", config.lang);
    tracing::info!("  STATIC_DIR: {}", config.static_dir);
    tracing::info!("  PORT: {}", config.port);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await?;

    Ok(())
}
