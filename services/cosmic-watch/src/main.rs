use cosmic_watch::{
    clients::NasaClient,
    repo::{AlertRepo, WatchlistRepo},
    routes::create_router,
    AppState, Config, FeedCache,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!("Connecting to PostgreSQL...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await
        .map_err(|e| {
            tracing::error!("Failed to connect to PostgreSQL: {:?}", e);
            e
        })?;

    tracing::info!("Connected to PostgreSQL");

    init_db(&pool).await?;

    // One feed cache for the whole process
    let client = NasaClient::from_config(&config)?;
    let feed = FeedCache::new(
        Arc::new(client),
        Duration::from_secs(config.neo_cache_ttl),
    );

    let addr = config.bind_addr();
    let state = AppState::new(pool, feed, config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize database tables
async fn init_db(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    tracing::info!("Initializing database tables");

    WatchlistRepo::new(pool.clone()).init_tables().await?;
    tracing::info!("Watchlist table initialized");

    AlertRepo::new(pool.clone()).init_tables().await?;
    tracing::info!("Alerts table initialized");

    Ok(())
}
