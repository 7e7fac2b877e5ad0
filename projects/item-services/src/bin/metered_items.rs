use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use item_services::{config, db, metered, metrics::RequestMetrics, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init("item_services=info")?;

    info!("Starting metered items service v{}", env!("CARGO_PKG_VERSION"));

    let cfg = config::load_metered()?;
    info!("Configuration loaded");

    let db_pool = db::init_metered_store(&cfg.database.path).await?;
    info!("Database initialized");

    let metrics = Arc::new(RequestMetrics::new()?);

    metered::serve(cfg, db_pool, metrics).await
}
