use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use voice_translator::config::Config;
use voice_translator::server::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when the variables are already set)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("voice_translator=info".parse()?),
        )
        .init();

    info!("Starting voice translator");

    let config = Config::from_env()?;

    // Language capabilities must load before we accept any request
    let state = AppState::from_config(&config)
        .await
        .context("Failed to initialize language capabilities")?;
    info!("{} languages available", state.registry.supported_count());

    let app = build_router(Arc::new(state), Some(Path::new(&config.frontend_dir)));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
