use anyhow::Result;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::AuthServiceConfig;
use crate::db::items::{ItemRepository, SqliteItemRepository};
use crate::db::users::{SqliteUserRepository, UserRepository};
use crate::db::DbPool;

pub mod handlers;
pub mod middleware;
pub mod router;

/// Shared state of the auth/items service, built once at startup.
pub struct AppState {
    pub items: Arc<dyn ItemRepository>,
    pub users: Arc<dyn UserRepository>,
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub upload_dir: PathBuf,
    pub upload_max_bytes: usize,
}

impl AppState {
    pub fn new(cfg: &AuthServiceConfig, db: DbPool) -> Self {
        Self {
            items: Arc::new(SqliteItemRepository::new(db.clone())),
            users: Arc::new(SqliteUserRepository::new(db)),
            jwt_secret: cfg.auth.jwt_secret.clone(),
            jwt_expiry_hours: cfg.auth.jwt_expiry_hours,
            upload_dir: PathBuf::from(&cfg.uploads.dir),
            upload_max_bytes: cfg.uploads.max_bytes,
        }
    }
}

pub async fn serve(cfg: AuthServiceConfig, db: DbPool) -> Result<()> {
    let bind_addr = format!("{}:{}", cfg.api.bind, cfg.api.port);
    let state = Arc::new(AppState::new(&cfg, db));
    let cors = build_cors_layer(&cfg.api.cors_allowed_origins);
    let app = build_app(state, cors);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Auth/items API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(crate::telemetry::shutdown_signal())
        .await?;
    Ok(())
}

fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    if origins.is_empty() {
        tracing::warn!("No valid CORS origins configured; CORS will block all cross-origin requests");
        return CorsLayer::new();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

pub fn build_app(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        .merge(router::routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
