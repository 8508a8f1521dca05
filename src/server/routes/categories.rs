use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use validator::Validate;

use crate::db::queries::{categories, links};
use crate::db::{Category, QuestionCategory};
use crate::server::app::AppState;
use crate::server::error::ApiResult;
use crate::telemetry::WRITE_CNTR;

#[derive(Deserialize, Validate)]
struct NewCategory {
    #[validate(length(min = 1, message = "title must not be empty"))]
    title: String,
}

#[derive(Deserialize, Validate)]
struct CategoryUpdate {
    #[validate(length(min = 1, message = "title must not be empty"))]
    title: String,
}

async fn list_categories(State(pool): State<SqlitePool>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(categories::get_all_categories(&pool).await?))
}

async fn category(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Category>> {
    Ok(Json(categories::get_category(&pool, id).await?))
}

async fn create_category(
    State(pool): State<SqlitePool>,
    Json(new_category): Json<NewCategory>,
) -> ApiResult<Json<Category>> {
    new_category.validate()?;
    let id = categories::create_category(&pool, &new_category.title).await?;
    WRITE_CNTR.with_label_values(&["categories", "create"]).inc();

    Ok(Json(categories::get_category(&pool, id).await?))
}

async fn update_category(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(update): Json<CategoryUpdate>,
) -> ApiResult<Json<Category>> {
    update.validate()?;
    categories::update_category(&pool, id, &update.title).await?;
    WRITE_CNTR.with_label_values(&["categories", "update"]).inc();

    Ok(Json(categories::get_category(&pool, id).await?))
}

async fn delete_category(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    categories::delete_category(&pool, id).await?;
    WRITE_CNTR.with_label_values(&["categories", "delete"]).inc();
    Ok(StatusCode::OK)
}

/// Links referencing this category, ordering ascending.
async fn category_links(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<QuestionCategory>>> {
    categories::get_category(&pool, id).await?;
    Ok(Json(links::get_links_for_category(&pool, id).await?))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            delete(delete_category).put(update_category).get(category),
        )
        .route("/categories/{id}/links", get(category_links))
        .with_state(state)
}
