use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use pdfview_server::config::AppConfig;
use pdfview_server::database::init_db;
use pdfview_server::repository::{
    DatabaseInstanceRepository, InstanceRepository, MemoryInstanceRepository,
};
use pdfview_server::state::AppState;
use pdfview_server::viewer::SelectionController;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let store = pdfview_common::storage::build_store(&config.storage)
        .await
        .context("Failed to initialize asset storage")?;

    let instances: Arc<dyn InstanceRepository> = match config.database.url.as_deref() {
        Some(url) => {
            let db = init_db(url).await.context("Failed to connect to database")?;
            info!("Instance state stored in database");
            Arc::new(DatabaseInstanceRepository::new(db))
        }
        None => {
            warn!("No database.url configured, instance state will not survive restarts");
            Arc::new(MemoryInstanceRepository::new())
        }
    };

    let controller = SelectionController::new(
        store,
        config.storage.max_upload_bytes,
        config.serve_endpoint(),
    );

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server.host/server.port")?;

    let state = AppState {
        config: Arc::new(config),
        controller: Arc::new(controller),
        instances,
    };
    let app = pdfview_server::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
