use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Media {
    pub id: i64,
    pub file_name: String,
    pub alt: String,
    pub mime_type: Option<String>,
    pub file_size: i64,
}

const MEDIA_COLUMNS: &str = "id, file_name, alt, mime_type, file_size";

pub async fn get_media_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Media> {
    let query = format!("SELECT {MEDIA_COLUMNS} FROM media WHERE id = ?1");
    sqlx::query_as::<_, Media>(&query).bind(id).fetch_one(pool).await
}

pub async fn get_all_media(pool: &SqlitePool) -> sqlx::Result<Vec<Media>> {
    let query = format!("SELECT {MEDIA_COLUMNS} FROM media ORDER BY id");
    sqlx::query_as::<_, Media>(&query).fetch_all(pool).await
}

pub async fn create_media(
    pool: &SqlitePool,
    file_name: &str,
    alt: &str,
    mime_type: Option<&str>,
    file_size: i64,
) -> sqlx::Result<i64> {
    let id = sqlx::query(
        "INSERT INTO media (file_name, alt, mime_type, file_size) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(file_name)
    .bind(alt)
    .bind(mime_type)
    .bind(file_size)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn update_media_alt(pool: &SqlitePool, id: i64, alt: &str) -> sqlx::Result<()> {
    get_media_by_id(pool, id).await?;
    sqlx::query("UPDATE media SET alt = ?1 WHERE id = ?2")
        .bind(alt)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete_media(pool: &SqlitePool, id: i64) -> sqlx::Result<Media> {
    let media = get_media_by_id(pool, id).await?;
    sqlx::query("DELETE FROM media WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(media)
}
