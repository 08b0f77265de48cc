use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory scanned for comic archives.
    pub comics_dir: PathBuf,
    /// Directory served under `/static`; holds the reader page the
    /// rendered links point at.
    pub static_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        AppConfig {
            comics_dir: env::var("COMICS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/comics")),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static")),
        }
    }
}
