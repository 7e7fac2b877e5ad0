use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::AppState;
use crate::auth::password;
use crate::db::is_unique_violation;
use crate::db::models::user::Credentials;
use crate::error::{AppError, AppResult};

fn user_exists() -> AppError {
    AppError::Conflict("User already exists".to_string())
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let Json(body) = payload?;

    let username = body.username.trim().to_string();
    if username.is_empty() {
        return Err(AppError::Validation("Username cannot be empty".to_string()));
    }
    if body.password.is_empty() {
        return Err(AppError::Validation("Password cannot be empty".to_string()));
    }

    if state.users.find_by_username(&username).await?.is_some() {
        return Err(user_exists());
    }

    let password_hash = password::hash_password(&body.password)?;

    // A concurrent registration can still win the race to the unique index.
    match state.users.create(&username, &password_hash).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, username = %user.username, "user registered");
            Ok((
                StatusCode::CREATED,
                Json(json!({ "message": "User created successfully" })),
            ))
        }
        Err(e) if is_unique_violation(&e) => Err(user_exists()),
        Err(e) => Err(e.into()),
    }
}
