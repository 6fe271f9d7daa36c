use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spymasters::{
    db, router, AppState, Config, InMemoryMatchRepository, MatchRepository,
    SqliteMatchRepository, StorageBackend,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spymasters=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run().await {
        error!(error = %err, "Server stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting spymaster tracker");

    let config = Config::from_env()?;

    // Easy to switch between implementations:
    let match_repository: Arc<dyn MatchRepository + Send + Sync> = match &config.storage {
        StorageBackend::InMemory => Arc::new(InMemoryMatchRepository::new()),
        StorageBackend::Sqlite { url } => {
            let pool = db::connect_and_migrate(url).await?;
            Arc::new(SqliteMatchRepository::new(pool))
        }
    };

    let app_state = AppState::new(match_repository, config.history_limit);
    let app = router(app_state);

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
