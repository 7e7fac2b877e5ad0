use anyhow::Result;
use tracing::info;

use item_services::{api, config, db, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init("item_services=info")?;

    info!("Starting auth/items service v{}", env!("CARGO_PKG_VERSION"));

    let cfg = config::load_auth()?;
    info!("Configuration loaded");

    let db_pool = db::init_auth_store(&cfg.database.path).await?;
    info!("Database initialized");

    api::serve(cfg, db_pool).await
}
