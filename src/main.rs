//! Server binary for the calculation engine.

use workday_engine::api::{AppState, create_router};
use workday_engine::store::MemoryStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let state = AppState::new(MemoryStore::new());
    let router = create_router(state);

    let bind = std::env::var("WORKDAY_BIND").unwrap_or_else(|_| "0.0.0.0:5000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(%bind, "workday-engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
