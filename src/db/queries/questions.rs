use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub title: String,
}

pub async fn get_question_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Question> {
    sqlx::query_as::<_, Question>("SELECT id, title FROM questions WHERE id = ?1")
        .bind(id)
        .fetch_one(pool)
        .await
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>("SELECT id, title FROM questions ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn create_question(pool: &SqlitePool, title: &str) -> sqlx::Result<i64> {
    let id = sqlx::query("INSERT INTO questions (title) VALUES (?1)")
        .bind(title)
        .execute(pool)
        .await?
        .last_insert_rowid();

    Ok(id)
}

pub async fn update_question(pool: &SqlitePool, id: i64, title: &str) -> sqlx::Result<()> {
    get_question_by_id(pool, id).await?;
    sqlx::query("UPDATE questions SET title = ?1 WHERE id = ?2")
        .bind(title)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<()> {
    get_question_by_id(pool, id).await?;
    sqlx::query("DELETE FROM questions WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
