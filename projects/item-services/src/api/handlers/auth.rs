use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::AppState;
use crate::auth::{jwt, password};
use crate::db::models::user::Credentials;
use crate::error::{AppError, AppResult};

pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> AppResult<Json<Value>> {
    let Json(req) = payload?;

    let user = state
        .users
        .find_by_username(req.username.trim())
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !password::verify_password(&req.password, &user.password) {
        tracing::warn!(username = %user.username, "login rejected: wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let token = jwt::issue(user.id, &user.username, &state.jwt_secret, state.jwt_expiry_hours)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!({
        "access_token": token,
        "token_type": "Bearer",
        "expires_in": state.jwt_expiry_hours * 3600,
    })))
}
