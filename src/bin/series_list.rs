//! Fetches the series catalog from a running server and prints the
//! rendered list markup.

use tracing_subscriber::EnvFilter;

use comic_catalog::loader::dom::SeriesList;
use comic_catalog::loader::SeriesListLoader;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("http://localhost:8000"));

    let loader = SeriesListLoader::new(base_url);
    let mut list = SeriesList::new();

    match loader.load_into(&mut list).await {
        Ok(n) => {
            tracing::info!("rendered {} series", n);
            println!("{}", list.to_html());
        }
        Err(e) => {
            tracing::error!("series list failed: {}", e);
            std::process::exit(1);
        }
    }
}
