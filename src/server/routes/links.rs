use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::db::queries::links::{self, LinkUpdate, NewLink};
use crate::db::{QuestionCategory, Reorder};
use crate::server::app::AppState;
use crate::server::error::ApiResult;
use crate::telemetry::WRITE_CNTR;

#[derive(Deserialize)]
struct OrderingBody {
    row_id: Vec<i64>,
}

async fn list_links(State(pool): State<SqlitePool>) -> ApiResult<Json<Vec<QuestionCategory>>> {
    Ok(Json(links::get_all_links(&pool).await?))
}

async fn link(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> ApiResult<Json<QuestionCategory>> {
    Ok(Json(links::get_link(&pool, id).await?))
}

async fn create_link(
    State(pool): State<SqlitePool>,
    Json(new_link): Json<NewLink>,
) -> ApiResult<Json<QuestionCategory>> {
    let id = links::create_link(&pool, &new_link).await?;
    WRITE_CNTR.with_label_values(&["links", "create"]).inc();

    Ok(Json(links::get_link(&pool, id).await?))
}

async fn update_link(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(update): Json<LinkUpdate>,
) -> ApiResult<Json<QuestionCategory>> {
    links::update_link(&pool, id, &update).await?;
    WRITE_CNTR.with_label_values(&["links", "update"]).inc();

    Ok(Json(links::get_link(&pool, id).await?))
}

async fn delete_link(State(pool): State<SqlitePool>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    links::delete_link(&pool, id).await?;
    WRITE_CNTR.with_label_values(&["links", "delete"]).inc();
    Ok(StatusCode::OK)
}

/// Rewrites `ordering` from the submitted id sequence, first id first.
async fn reorder(
    State(pool): State<SqlitePool>,
    Json(body): Json<OrderingBody>,
) -> ApiResult<Json<Vec<QuestionCategory>>> {
    let ordering: Vec<Reorder> = body
        .row_id
        .into_iter()
        .enumerate()
        .map(|(n, id)| Reorder {
            id,
            ordering: n as i64,
        })
        .collect();

    links::reorder_links(&pool, ordering).await?;
    WRITE_CNTR.with_label_values(&["links", "reorder"]).inc();

    Ok(Json(links::get_all_links(&pool).await?))
}

pub fn links_router(state: AppState) -> Router {
    Router::new()
        .route("/links", get(list_links).post(create_link))
        .route("/links/{id}", delete(delete_link).put(update_link).get(link))
        .route("/links/order", post(reorder))
        .with_state(state)
}
