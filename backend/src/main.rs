use std::sync::Arc;

use globeteller::{AppState, config::ServerConfig, create_router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "globeteller=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!("client config: {:?}", config.client);

    let state = AppState {
        client: Arc::new(config.client),
    };
    let app = create_router(state);

    tracing::info!("starting globeteller on http://{}", config.addr);
    tracing::info!("  POST /api/trips - validate a trip document and build its globe path");
    tracing::info!("  GET /api/config - client configuration");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
