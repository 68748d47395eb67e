use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use course_api::config::Config;
use course_api::db::{self, QueryExecutor, SchemaBootstrapper, SeedData};
use course_api::router::{AppState, app_router};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;
    cfg.apply_globals();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        listen_addr = %cfg.listen_addr,
        loglevel = %cfg.loglevel,
        seed_path = %cfg.seed_path.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "<bundled>".to_string()),
    );

    let pool = db::connect(&cfg.database_url).await?;
    let executor = QueryExecutor::new(pool);

    // Must complete before any request can touch the store.
    let seed = SeedData::load(cfg.seed_path.as_deref())?;
    SchemaBootstrapper::new(executor.clone(), seed).run().await?;

    let app = app_router(AppState::new(executor.clone()));

    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    executor.pool().close().await;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
