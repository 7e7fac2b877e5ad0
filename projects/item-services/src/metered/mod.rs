//! Item service whose `/items` routes are wrapped in a request counter and a
//! latency histogram, scraped at `/metrics`.

use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::MeteredServiceConfig;
use crate::db::tracked_items::{SqliteTrackedItemRepository, TrackedItemRepository};
use crate::db::DbPool;
use crate::metrics::RequestMetrics;

pub mod handlers;
pub mod router;
pub mod track;

pub struct MeteredState {
    pub items: Arc<dyn TrackedItemRepository>,
    pub metrics: Arc<RequestMetrics>,
}

impl MeteredState {
    pub fn new(db: DbPool, metrics: Arc<RequestMetrics>) -> Self {
        Self {
            items: Arc::new(SqliteTrackedItemRepository::new(db)),
            metrics,
        }
    }
}

pub async fn serve(cfg: MeteredServiceConfig, db: DbPool, metrics: Arc<RequestMetrics>) -> Result<()> {
    let bind_addr = format!("{}:{}", cfg.api.bind, cfg.api.port);
    let state = Arc::new(MeteredState::new(db, metrics));
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Metered items API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(crate::telemetry::shutdown_signal())
        .await?;
    Ok(())
}

pub fn build_app(state: Arc<MeteredState>) -> Router {
    Router::new()
        .merge(router::routes(state))
        .layer(TraceLayer::new_for_http())
}
