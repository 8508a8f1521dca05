use axum::body::Body;
use axum::http::header;
use axum::response::Response;
use axum::{extract::FromRef, http::StatusCode, routing::get, Router};
use prometheus::{Encoder, TextEncoder};
use sqlx::SqlitePool;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::routes::{
    category_router, links_router, media_router, questions_router, users_router,
};

#[derive(FromRef, Clone)]
pub struct AppState {
    pool: SqlitePool,
    media_dir: PathBuf,
}

impl AppState {
    pub fn new(pool: SqlitePool, media_dir: PathBuf) -> Self {
        Self { pool, media_dir }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .nest_service("/static", ServeDir::new(state.media_dir.clone()))
        .merge(users_router(state.clone()))
        .merge(media_router(state.clone()))
        .merge(category_router(state.clone()))
        .merge(questions_router(state.clone()))
        .merge(links_router(state))
        .fallback(|| async { StatusCode::NOT_FOUND })
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(
    pool: SqlitePool,
    media_dir: PathBuf,
    addr: String,
) -> anyhow::Result<()> {
    let state = AppState::new(pool, media_dir);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Serving on {addr}");
    axum::serve(listener, app(state)).await?;
    Ok(())
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn metrics() -> Response {
    let encoder = TextEncoder::new();
    let metrics = prometheus::gather();
    let mut buf = vec![];
    encoder.encode(&metrics, &mut buf).unwrap();
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, encoder.format_type())
        .body(Body::from(buf))
        .unwrap()
}
