use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use validator::Validate;

use crate::db::queries::users;
use crate::db::User;
use crate::server::app::AppState;
use crate::server::error::ApiResult;
use crate::telemetry::WRITE_CNTR;

fn default_active() -> bool {
    true
}

#[derive(Deserialize, Validate)]
struct NewUser {
    #[validate(email(message = "email is not valid"))]
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
    #[serde(default)]
    is_admin: bool,
    #[serde(default = "default_active")]
    active: bool,
}

#[derive(Deserialize, Validate)]
struct UserUpdate {
    #[validate(email(message = "email is not valid"))]
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
    #[serde(default)]
    is_admin: bool,
    #[serde(default = "default_active")]
    active: bool,
}

async fn list_users(State(pool): State<SqlitePool>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(users::get_users(&pool).await?))
}

async fn user(State(pool): State<SqlitePool>, Path(id): Path<i64>) -> ApiResult<Json<User>> {
    Ok(Json(users::get_user(&pool, id).await?))
}

async fn create_user(
    State(pool): State<SqlitePool>,
    Json(new_user): Json<NewUser>,
) -> ApiResult<Json<User>> {
    new_user.validate()?;
    let id = users::create_user(
        &pool,
        &new_user.email,
        new_user.first_name.as_deref(),
        new_user.last_name.as_deref(),
        new_user.is_admin,
        new_user.active,
    )
    .await?;
    WRITE_CNTR.with_label_values(&["users", "create"]).inc();

    Ok(Json(users::get_user(&pool, id).await?))
}

async fn update_user(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(update): Json<UserUpdate>,
) -> ApiResult<Json<User>> {
    update.validate()?;
    users::update_user(
        &pool,
        User {
            id,
            email: update.email,
            first_name: update.first_name,
            last_name: update.last_name,
            is_admin: update.is_admin,
            active: update.active,
        },
    )
    .await?;
    WRITE_CNTR.with_label_values(&["users", "update"]).inc();

    Ok(Json(users::get_user(&pool, id).await?))
}

async fn delete_user(State(pool): State<SqlitePool>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    users::delete_user(&pool, id).await?;
    WRITE_CNTR.with_label_values(&["users", "delete"]).inc();
    Ok(StatusCode::OK)
}

pub fn users_router(state: AppState) -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            delete(delete_user).put(update_user).get(user),
        )
        .with_state(state)
}
