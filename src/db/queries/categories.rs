use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub title: String,
}

pub async fn get_category(pool: &SqlitePool, id: i64) -> sqlx::Result<Category> {
    sqlx::query_as::<_, Category>("SELECT id, title FROM categories WHERE id = ?1")
        .bind(id)
        .fetch_one(pool)
        .await
}

pub async fn get_all_categories(pool: &SqlitePool) -> sqlx::Result<Vec<Category>> {
    sqlx::query_as::<_, Category>("SELECT id, title FROM categories ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn create_category(pool: &SqlitePool, title: &str) -> sqlx::Result<i64> {
    let id = sqlx::query("INSERT INTO categories (title) VALUES (?1)")
        .bind(title)
        .execute(pool)
        .await?
        .last_insert_rowid();

    Ok(id)
}

pub async fn update_category(pool: &SqlitePool, id: i64, title: &str) -> sqlx::Result<()> {
    get_category(pool, id).await?;
    sqlx::query("UPDATE categories SET title = ?1 WHERE id = ?2")
        .bind(title)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete_category(pool: &SqlitePool, id: i64) -> sqlx::Result<()> {
    get_category(pool, id).await?;
    sqlx::query("DELETE FROM categories WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
