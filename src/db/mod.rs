pub mod queries;

use sqlx::sqlite::SqlitePool;

pub use queries::categories::Category;
pub use queries::links::QuestionCategory;
pub use queries::media::Media;
pub use queries::questions::Question;
pub use queries::users::User;

pub struct Reorder {
    pub id: i64,
    pub ordering: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Maps a failed by-id lookup to `NotFound`, keeping which reference
    /// was dangling.
    pub(crate) fn reference(entity: &'static str, id: i64) -> impl FnOnce(sqlx::Error) -> Self {
        move |err| match err {
            sqlx::Error::RowNotFound => StoreError::NotFound { entity, id },
            other => StoreError::Database(other),
        }
    }
}

pub async fn establish_connection(url: &str) -> Result<SqlitePool, sqlx::Error> {
    SqlitePool::connect(url).await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
