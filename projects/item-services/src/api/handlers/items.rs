use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::AppState;
use crate::db::models::item::{Item, ItemFields};
use crate::error::{AppError, AppResult};

fn item_not_found(id: impl std::fmt::Display) -> AppError {
    AppError::NotFound(format!("Item {} not found", id))
}

/// Only integer ids address an item; anything else matches nothing.
fn parse_item_id(raw: &str) -> AppResult<i64> {
    raw.parse().map_err(|_| item_not_found(raw))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Item>> {
    let id = parse_item_id(&raw_id)?;
    let item = state.items.find_by_id(id).await?.ok_or_else(|| item_not_found(id))?;
    Ok(Json(item))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<ItemFields>, JsonRejection>,
) -> AppResult<Json<Value>> {
    let id = parse_item_id(&raw_id)?;
    let mut item = state.items.find_by_id(id).await?.ok_or_else(|| item_not_found(id))?;

    let Json(fields) = payload?;
    fields.apply_to(&mut item)?;
    state.items.save(&item).await?;

    Ok(Json(json!({ "message": format!("Item {} updated successfully", id) })))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Value>> {
    let id = parse_item_id(&raw_id)?;
    if !state.items.delete(id).await? {
        return Err(item_not_found(id));
    }
    Ok(Json(json!({ "message": format!("Item {} deleted successfully", id) })))
}

pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Item>>> {
    let items = state.items.list_all().await?;
    Ok(Json(items))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ItemFields>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let Json(fields) = payload?;
    let item = state.items.create(fields.into_new_item()?).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Item created successfully", "id": item.id })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_ids_parse() {
        assert_eq!(parse_item_id("42").ok(), Some(42));
    }

    #[test]
    fn test_non_integer_id_is_not_found() {
        let err = parse_item_id("abc").expect_err("abc is not an id");
        assert!(matches!(&err, AppError::NotFound(msg) if msg == "Item abc not found"));
    }
}
