use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use super::MeteredState;
use crate::db::models::tracked_item::CreateTrackedItemRequest;
use crate::error::{FaultResult, ServiceFault};

pub async fn create_item(
    State(state): State<Arc<MeteredState>>,
    payload: Result<Json<CreateTrackedItemRequest>, JsonRejection>,
) -> FaultResult<(StatusCode, Json<Value>)> {
    let Json(body) = payload.map_err(|e| ServiceFault::capture(e.body_text()))?;
    let item = state
        .items
        .create(&body.name)
        .await
        .map_err(ServiceFault::capture)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Item created successfully", "id": item.id })),
    ))
}

pub async fn list_items(State(state): State<Arc<MeteredState>>) -> FaultResult<Json<Value>> {
    let items = state.items.list_all().await.map_err(ServiceFault::capture)?;
    Ok(Json(json!({ "items": items })))
}

pub async fn scrape_metrics(State(state): State<Arc<MeteredState>>) -> FaultResult<impl IntoResponse> {
    state.metrics.inc_requests();
    let body = state.metrics.render().map_err(ServiceFault::capture)?;
    Ok(([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body))
}
