use tracing_subscriber::EnvFilter;

use comic_catalog::config::AppConfig;
use comic_catalog::services::comic_service::ComicService;

#[rocket::main]
async fn main() -> Result<(), rocket::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();

    let comic_service = ComicService::new(config.comics_dir.clone())
        .await
        .expect("Failed to initialize comic service");

    comic_catalog::build(config, comic_service)
        .launch()
        .await?;

    Ok(())
}
