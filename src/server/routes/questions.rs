use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use validator::Validate;

use crate::db::queries::{links, questions};
use crate::db::{Question, QuestionCategory};
use crate::server::app::AppState;
use crate::server::error::ApiResult;
use crate::telemetry::WRITE_CNTR;

#[derive(Deserialize, Validate)]
struct NewQuestion {
    #[validate(length(min = 1, message = "title must not be empty"))]
    title: String,
}

#[derive(Deserialize, Validate)]
struct QuestionUpdate {
    #[validate(length(min = 1, message = "title must not be empty"))]
    title: String,
}

async fn list_questions(State(pool): State<SqlitePool>) -> ApiResult<Json<Vec<Question>>> {
    Ok(Json(questions::get_all_questions(&pool).await?))
}

async fn question(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Question>> {
    Ok(Json(questions::get_question_by_id(&pool, id).await?))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    Json(new_question): Json<NewQuestion>,
) -> ApiResult<Json<Question>> {
    new_question.validate()?;
    let id = questions::create_question(&pool, &new_question.title).await?;
    WRITE_CNTR.with_label_values(&["questions", "create"]).inc();

    Ok(Json(questions::get_question_by_id(&pool, id).await?))
}

async fn update_question(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(update): Json<QuestionUpdate>,
) -> ApiResult<Json<Question>> {
    update.validate()?;
    questions::update_question(&pool, id, &update.title).await?;
    WRITE_CNTR.with_label_values(&["questions", "update"]).inc();

    Ok(Json(questions::get_question_by_id(&pool, id).await?))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    questions::delete_question(&pool, id).await?;
    WRITE_CNTR.with_label_values(&["questions", "delete"]).inc();
    Ok(StatusCode::OK)
}

/// Links referencing this question, ordering ascending.
async fn question_links(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<QuestionCategory>>> {
    questions::get_question_by_id(&pool, id).await?;
    Ok(Json(links::get_links_for_question(&pool, id).await?))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route(
            "/questions/{id}",
            delete(delete_question).put(update_question).get(question),
        )
        .route("/questions/{id}/links", get(question_links))
        .with_state(state)
}
