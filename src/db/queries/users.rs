use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_admin: bool,
    pub active: bool,
}

const USER_COLUMNS: &str = "id, email, first_name, last_name, is_admin, active";

pub async fn get_user(pool: &SqlitePool, id: i64) -> sqlx::Result<User> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");
    sqlx::query_as::<_, User>(&query).bind(id).fetch_one(pool).await
}

pub async fn get_users(pool: &SqlitePool) -> sqlx::Result<Vec<User>> {
    let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id");
    sqlx::query_as::<_, User>(&query).fetch_all(pool).await
}

pub async fn create_user(
    pool: &SqlitePool,
    email: &str,
    first_name: Option<&str>,
    last_name: Option<&str>,
    is_admin: bool,
    active: bool,
) -> sqlx::Result<i64> {
    let id = sqlx::query(
        "INSERT INTO users (email, first_name, last_name, is_admin, active) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(email)
    .bind(first_name)
    .bind(last_name)
    .bind(is_admin)
    .bind(active)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn update_user(pool: &SqlitePool, user: User) -> sqlx::Result<()> {
    get_user(pool, user.id).await?;
    sqlx::query(
        "UPDATE users SET email = ?1, first_name = ?2, last_name = ?3, is_admin = ?4, active = ?5 \
         WHERE id = ?6",
    )
    .bind(&user.email)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(user.is_admin)
    .bind(user.active)
    .bind(user.id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete_user(pool: &SqlitePool, id: i64) -> sqlx::Result<()> {
    get_user(pool, id).await?;
    sqlx::query("DELETE FROM users WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
