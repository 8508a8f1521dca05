use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use crate::db::queries::{categories, questions};
use crate::db::{Reorder, StoreError};

/// A row of the questions-categories join collection. The association
/// itself carries data: a sort key and a display title derived from the
/// two referenced records.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuestionCategory {
    pub id: i64,
    pub question: Option<i64>,
    pub category: Option<i64>,
    pub ordering: i64,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewLink {
    pub question: Option<i64>,
    pub category: Option<i64>,
    #[serde(default)]
    pub ordering: i64,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkUpdate {
    pub question: Option<i64>,
    pub category: Option<i64>,
    #[serde(default)]
    pub ordering: i64,
    pub title: Option<String>,
}

const LINK_COLUMNS: &str = "id, question, category, ordering, title";

pub fn link_title(category_title: &str, question_title: &str) -> String {
    format!("Category: {category_title} - Question: {question_title}")
}

/// Pre-write step for link records. With both references present, both
/// rows are looked up flat (no expansion) and the display title is built
/// from their titles; a dangling reference aborts the whole write with
/// `NotFound`. With either reference absent no computation happens and the
/// caller falls back to whatever title was supplied or already stored.
///
/// Titles are only ever refreshed through this path. Renaming a question
/// or category later leaves existing link titles stale, and dropping a
/// reference does not clear the title.
pub async fn resolve_link_title(
    pool: &SqlitePool,
    question: Option<i64>,
    category: Option<i64>,
) -> Result<Option<String>, StoreError> {
    let (Some(question_id), Some(category_id)) = (question, category) else {
        return Ok(None);
    };

    let question = questions::get_question_by_id(pool, question_id)
        .await
        .map_err(StoreError::reference("question", question_id))?;
    let category = categories::get_category(pool, category_id)
        .await
        .map_err(StoreError::reference("category", category_id))?;

    Ok(Some(link_title(&category.title, &question.title)))
}

pub async fn get_link(pool: &SqlitePool, id: i64) -> sqlx::Result<QuestionCategory> {
    let query = format!("SELECT {LINK_COLUMNS} FROM question_categories WHERE id = ?1");
    sqlx::query_as::<_, QuestionCategory>(&query)
        .bind(id)
        .fetch_one(pool)
        .await
}

pub async fn get_all_links(pool: &SqlitePool) -> sqlx::Result<Vec<QuestionCategory>> {
    let query = format!("SELECT {LINK_COLUMNS} FROM question_categories ORDER BY id");
    sqlx::query_as::<_, QuestionCategory>(&query)
        .fetch_all(pool)
        .await
}

/// Reverse side of the join for one question, ordering ascending.
pub async fn get_links_for_question(
    pool: &SqlitePool,
    question_id: i64,
) -> sqlx::Result<Vec<QuestionCategory>> {
    let query = format!(
        "SELECT {LINK_COLUMNS} FROM question_categories \
         WHERE question = ?1 ORDER BY ordering ASC, id ASC"
    );
    sqlx::query_as::<_, QuestionCategory>(&query)
        .bind(question_id)
        .fetch_all(pool)
        .await
}

/// Reverse side of the join for one category, ordering ascending.
pub async fn get_links_for_category(
    pool: &SqlitePool,
    category_id: i64,
) -> sqlx::Result<Vec<QuestionCategory>> {
    let query = format!(
        "SELECT {LINK_COLUMNS} FROM question_categories \
         WHERE category = ?1 ORDER BY ordering ASC, id ASC"
    );
    sqlx::query_as::<_, QuestionCategory>(&query)
        .bind(category_id)
        .fetch_all(pool)
        .await
}

pub async fn create_link(pool: &SqlitePool, link: &NewLink) -> Result<i64, StoreError> {
    let derived = resolve_link_title(pool, link.question, link.category).await?;
    let title = derived.as_deref().or(link.title.as_deref());

    let id = sqlx::query(
        "INSERT INTO question_categories (question, category, ordering, title) \
         VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(link.question)
    .bind(link.category)
    .bind(link.ordering)
    .bind(title)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn update_link(pool: &SqlitePool, id: i64, link: &LinkUpdate) -> Result<(), StoreError> {
    get_link(pool, id)
        .await
        .map_err(StoreError::reference("link", id))?;

    let derived = resolve_link_title(pool, link.question, link.category).await?;
    // COALESCE keeps the stored title whenever neither the computation nor
    // the caller produced one.
    sqlx::query(
        "UPDATE question_categories \
         SET question = ?1, category = ?2, ordering = ?3, title = COALESCE(?4, ?5, title) \
         WHERE id = ?6",
    )
    .bind(link.question)
    .bind(link.category)
    .bind(link.ordering)
    .bind(derived)
    .bind(&link.title)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete_link(pool: &SqlitePool, id: i64) -> Result<(), StoreError> {
    get_link(pool, id)
        .await
        .map_err(StoreError::reference("link", id))?;
    sqlx::query("DELETE FROM question_categories WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn reorder_links(pool: &SqlitePool, ordering: Vec<Reorder>) -> sqlx::Result<()> {
    for row in ordering {
        sqlx::query("UPDATE question_categories SET ordering = ?1 WHERE id = ?2")
            .bind(row.ordering)
            .bind(row.id)
            .execute(pool)
            .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::link_title;

    #[test]
    fn title_puts_category_first() {
        assert_eq!(
            link_title("Geography", "Capital of France?"),
            "Category: Geography - Question: Capital of France?"
        );
    }
}
