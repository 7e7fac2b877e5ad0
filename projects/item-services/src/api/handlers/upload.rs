use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;

use crate::api::middleware::auth::AuthUser;
use crate::api::AppState;
use crate::error::{AppError, AppResult};

const IMAGE_FIELD: &str = "image";

fn no_image() -> AppError {
    AppError::Validation("No image provided".to_string())
}

/// Final path component of a client-supplied filename, if any.
fn stored_file_name(raw: &str) -> Option<String> {
    Path::new(raw)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let user_id = claims.user_id().ok_or(AppError::AuthFailed)?;
    let mut multipart = multipart.map_err(|_| no_image())?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let Some(filename) = field.file_name().and_then(stored_file_name) else {
            return Err(no_image());
        };
        let bytes = field.bytes().await?;

        tokio::fs::create_dir_all(&state.upload_dir).await?;
        let path = state
            .upload_dir
            .join(format!("user_{}_{}", user_id, filename));
        tokio::fs::write(&path, &bytes).await?;

        let image_url = path.display().to_string();
        tracing::info!(user_id, %image_url, size = bytes.len(), "image stored");

        return Ok((
            StatusCode::CREATED,
            Json(json!({ "message": "Image uploaded successfully", "image_url": image_url })),
        ));
    }

    Err(no_image())
}
