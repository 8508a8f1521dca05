use qna_cms::db::queries::{categories, media, questions, users};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Cannot open in-memory database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Cannot run migrations");
    pool
}

#[tokio::test]
async fn question_crud_roundtrip() {
    let pool = test_pool().await;

    let id = questions::create_question(&pool, "Capital of France?")
        .await
        .unwrap();
    assert_eq!(
        questions::get_question_by_id(&pool, id).await.unwrap().title,
        "Capital of France?"
    );

    questions::update_question(&pool, id, "Capital of Spain?")
        .await
        .unwrap();
    assert_eq!(
        questions::get_question_by_id(&pool, id).await.unwrap().title,
        "Capital of Spain?"
    );

    questions::delete_question(&pool, id).await.unwrap();
    assert!(questions::get_all_questions(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn updating_missing_question_fails() {
    let pool = test_pool().await;
    let result = questions::update_question(&pool, 1, "anything").await;
    assert!(matches!(result, Err(sqlx::Error::RowNotFound)));
}

#[tokio::test]
async fn categories_list_in_id_order() {
    let pool = test_pool().await;

    let geography = categories::create_category(&pool, "Geography").await.unwrap();
    let history = categories::create_category(&pool, "History").await.unwrap();

    let all = categories::get_all_categories(&pool).await.unwrap();
    assert_eq!(
        all.iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![geography, history]
    );
}

#[tokio::test]
async fn user_crud_roundtrip() {
    let pool = test_pool().await;

    let id = users::create_user(&pool, "admin@example.com", Some("Ada"), None, true, true)
        .await
        .unwrap();

    let mut user = users::get_user(&pool, id).await.unwrap();
    assert_eq!(user.email, "admin@example.com");
    assert!(user.is_admin);
    assert!(user.active);

    user.active = false;
    users::update_user(&pool, user).await.unwrap();
    assert!(!users::get_user(&pool, id).await.unwrap().active);

    users::delete_user(&pool, id).await.unwrap();
    assert!(users::get_users(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_user_email_is_rejected() {
    let pool = test_pool().await;

    users::create_user(&pool, "admin@example.com", None, None, false, true)
        .await
        .unwrap();
    let duplicate = users::create_user(&pool, "admin@example.com", None, None, false, true).await;
    assert!(duplicate.is_err());
}

#[tokio::test]
async fn media_rows_track_file_metadata() {
    let pool = test_pool().await;

    let id = media::create_media(&pool, "map.png", "World map", Some("image/png"), 2048)
        .await
        .unwrap();

    let row = media::get_media_by_id(&pool, id).await.unwrap();
    assert_eq!(row.file_name, "map.png");
    assert_eq!(row.mime_type.as_deref(), Some("image/png"));
    assert_eq!(row.file_size, 2048);

    media::update_media_alt(&pool, id, "Political world map")
        .await
        .unwrap();
    assert_eq!(
        media::get_media_by_id(&pool, id).await.unwrap().alt,
        "Political world map"
    );

    let removed = media::delete_media(&pool, id).await.unwrap();
    assert_eq!(removed.file_name, "map.png");
    assert!(media::get_all_media(&pool).await.unwrap().is_empty());
}
