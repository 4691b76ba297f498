use std::sync::Arc;

use anyhow::Context;
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

use songbook::{
    config::Config,
    db::{Database, SongStore},
    logging::init_tracing,
    routers::app_router,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    let _log_guard = init_tracing(&config)?;
    info!(mode = ?config.mode, "Configuration loaded");

    let database = match Database::new(&config.database_url, config.db_max_connections).await {
        Ok(db) => {
            info!("📊 Connected to SQLite database");
            db
        }
        Err(e) => {
            error!("❌ Failed to connect to database: {}", e);
            return Err(e).context("database connection required");
        }
    };

    if let Err(e) = database.migrate().await {
        error!("❌ Failed to run database migrations: {}", e);
        return Err(e).context("database migrations failed");
    }

    let songs: Arc<dyn SongStore> = Arc::new(database);
    let app = app_router(AppState::new(songs), &config.static_dir);

    let address = config.listen_addr()?;
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("binding {address}"))?;

    info!("🎵 Songbook listening on {}", address);
    info!("📡 Song API endpoints: /api/v1/songs/*");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
