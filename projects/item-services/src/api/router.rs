use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{middleware, Router};
use std::sync::Arc;

use super::handlers;
use super::middleware::auth::require_bearer;
use super::AppState;

pub fn routes(state: Arc<AppState>) -> Router {
    // Every route in here runs behind the bearer check.
    let protected = Router::new()
        .route("/api/items", get(handlers::items::list).post(handlers::items::create))
        .route(
            "/api/items/{id}",
            get(handlers::items::get)
                .put(handlers::items::update)
                .delete(handlers::items::delete),
        )
        .route(
            "/api/upload-image",
            post(handlers::upload::upload_image)
                .layer(DefaultBodyLimit::max(state.upload_max_bytes)),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    Router::new()
        // Health (public)
        .route("/health", get(handlers::health::health_check))
        // Accounts (public)
        .route("/api/register", post(handlers::users::register))
        .route("/api/login", post(handlers::auth::login))
        .merge(protected)
        .with_state(state)
}
