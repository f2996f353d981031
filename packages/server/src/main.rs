use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use raffle_common::media::filesystem::FilesystemMediaStore;
use raffle_server::campaign::notifier::LogNotifier;
use raffle_server::config::AppConfig;
use raffle_server::state::AppState;
use raffle_server::{build_router, database, schema};
use tracing::{Level, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let db = database::init_db(&config.database.url)
        .await
        .context("failed to connect to database")?;
    schema::ensure_indexes(&db).await?;

    let media = FilesystemMediaStore::new(
        config.media.dir.clone().into(),
        &config.media.public_base_url,
        config.media.max_upload_bytes,
    )
    .await
    .with_context(|| format!("failed to prepare media dir {}", config.media.dir))?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid server address")?;

    let state = AppState {
        db,
        config: Arc::new(config),
        notifier: Arc::new(LogNotifier),
        media: Arc::new(media),
    };
    let app = build_router(state);

    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
