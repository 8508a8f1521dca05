use std::fs::create_dir_all;

use anyhow::Context;
use secrecy::ExposeSecret;

use qna_cms::configuration::get_configuration;
use qna_cms::db;
use qna_cms::server::app::run_server;
use qna_cms::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let settings = get_configuration().context("Failed to read configuration")?;

    let pool = db::establish_connection(settings.database.url.expose_secret())
        .await
        .context("Failed to connect to the database")?;

    tracing::info!("Running db migrations...");
    db::run_migrations(&pool).await?;

    let media_dir = settings.application.media_dir.clone();
    if !media_dir.exists() {
        create_dir_all(&media_dir).context("Failed to create the media directory")?;
    }
    if !media_dir.is_dir() {
        anyhow::bail!("APP__APPLICATION__MEDIA_DIR should be a directory or not exist");
    }

    run_server(pool, media_dir, settings.application.address()).await
}
