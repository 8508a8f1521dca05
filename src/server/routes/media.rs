use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use axum_typed_multipart::{FieldData, TryFromMultipart, TypedMultipart};
use serde::Deserialize;
use sqlx::SqlitePool;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use validator::Validate;

use crate::db::queries::media;
use crate::db::Media;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::telemetry::WRITE_CNTR;

#[derive(TryFromMultipart)]
struct UploadMedia {
    alt: String,
    #[form_data(limit = "1GiB")]
    file: FieldData<NamedTempFile>,
}

#[derive(Deserialize, Validate)]
struct MediaUpdate {
    #[validate(length(min = 1, message = "alt must not be empty"))]
    alt: String,
}

async fn list_media(State(pool): State<SqlitePool>) -> ApiResult<Json<Vec<Media>>> {
    Ok(Json(media::get_all_media(&pool).await?))
}

async fn media_item(State(pool): State<SqlitePool>, Path(id): Path<i64>) -> ApiResult<Json<Media>> {
    Ok(Json(media::get_media_by_id(&pool, id).await?))
}

async fn upload_media(
    State(pool): State<SqlitePool>,
    State(media_dir): State<PathBuf>,
    TypedMultipart(form): TypedMultipart<UploadMedia>,
) -> ApiResult<Json<Media>> {
    if form.alt.trim().is_empty() {
        return Err(ApiError::Validation("alt must not be empty".to_owned()));
    }
    let file_name = form
        .file
        .metadata
        .file_name
        .clone()
        .filter(|name| !name.contains('/') && !name.contains('\\') && name != "..")
        .ok_or_else(|| ApiError::Validation("file name is missing or invalid".to_owned()))?;
    let mime_type = form.file.metadata.content_type.clone();

    let file = form.file.contents;
    let file_size = file
        .as_file()
        .metadata()
        .context("Failed to read uploaded file size")?
        .len() as i64;
    file.persist(media_dir.join(&file_name))
        .map_err(|err| err.error)
        .with_context(|| format!("Failed to store uploaded file {file_name}"))?;

    let id = media::create_media(&pool, &file_name, &form.alt, mime_type.as_deref(), file_size)
        .await?;
    WRITE_CNTR.with_label_values(&["media", "create"]).inc();

    Ok(Json(media::get_media_by_id(&pool, id).await?))
}

async fn update_media(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(update): Json<MediaUpdate>,
) -> ApiResult<Json<Media>> {
    update.validate()?;
    media::update_media_alt(&pool, id, &update.alt).await?;
    WRITE_CNTR.with_label_values(&["media", "update"]).inc();

    Ok(Json(media::get_media_by_id(&pool, id).await?))
}

async fn delete_media(
    State(pool): State<SqlitePool>,
    State(media_dir): State<PathBuf>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let removed = media::delete_media(&pool, id).await?;
    WRITE_CNTR.with_label_values(&["media", "delete"]).inc();
    if let Err(err) = std::fs::remove_file(media_dir.join(&removed.file_name)) {
        tracing::warn!("Failed to remove media file {}: {err}", removed.file_name);
    }
    Ok(StatusCode::OK)
}

pub fn media_router(state: AppState) -> Router {
    Router::new()
        .route("/media", get(list_media).post(upload_media))
        .route(
            "/media/{id}",
            delete(delete_media).put(update_media).get(media_item),
        )
        .with_state(state)
}
