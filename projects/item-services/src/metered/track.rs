use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::MeteredState;

/// Counts the request and times the wrapped handler, whatever its outcome.
pub async fn track_request(
    State(state): State<Arc<MeteredState>>,
    req: Request,
    next: Next,
) -> Response {
    state.metrics.inc_requests();
    let _timer = state.metrics.start_timer();
    next.run(req).await
}
