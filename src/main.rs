use dotenvy::dotenv;
use formlink::{api, config::{Config, LogConfig}, db, logging, state::AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let _guard = logging::init_logging(&LogConfig::load());
    let config = Config::load();

    let pool = db::connect(&config.database_url, config.db_max_connections).await?;
    db::init_schema(&pool).await?;

    let state = AppState::from_config(pool, &config);
    let app = api::router(state, config.mode);

    let listener = tokio::net::TcpListener::bind(&config.server_addr).await?;
    info!(
        listen_addr = %listener.local_addr()?,
        mode = ?config.mode,
        validate_urls = config.shorten.validate,
        "Starting server"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
