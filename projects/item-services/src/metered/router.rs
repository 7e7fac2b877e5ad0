use axum::routing::get;
use axum::{middleware, Router};
use std::sync::Arc;

use super::track::track_request;
use super::{handlers, MeteredState};

pub fn routes(state: Arc<MeteredState>) -> Router {
    let tracked = Router::new()
        .route("/items", get(handlers::list_items).post(handlers::create_item))
        .route_layer(middleware::from_fn_with_state(state.clone(), track_request));

    Router::new()
        .route("/health", get(crate::api::handlers::health::health_check))
        // Counts itself but is not timed.
        .route("/metrics", get(handlers::scrape_metrics))
        .merge(tracked)
        .with_state(state)
}
