use std::collections::HashMap;
use std::future::Future;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::fs::{self, File};
use tokio::io::AsyncReadExt;
use tokio::sync::{mpsc, RwLock};
use zip::ZipArchive;

use crate::models::comic::{Comic, CoverImage, SeriesSummary};
use crate::models::error::ComicError;

const IMAGE_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// In-memory comic catalog backed by a directory of archives.
///
/// The directory is scanned once at startup and rescanned whenever the
/// watcher reports a change. All fields are shared so clones observe the
/// same catalog.
#[derive(Clone)]
pub struct ComicService {
    comics_dir: PathBuf,
    catalog: Arc<RwLock<HashMap<String, Comic>>>,
    covers: Arc<RwLock<HashMap<String, CoverImage>>>,
    watcher: Arc<Mutex<Option<RecommendedWatcher>>>,
}

impl ComicService {
    pub async fn new(comics_dir: PathBuf) -> Result<Self, ComicError> {
        let service = ComicService {
            comics_dir,
            catalog: Arc::new(RwLock::new(HashMap::new())),
            covers: Arc::new(RwLock::new(HashMap::new())),
            watcher: Arc::new(Mutex::new(None)),
        };

        service.scan_directory().await?;
        service.spawn_watcher()?;

        Ok(service)
    }

    /// Rebuilds the catalog and cover caches from a full directory walk.
    async fn scan_directory(&self) -> Result<(), ComicError> {
        tracing::info!("scanning comic directory {}", self.comics_dir.display());

        let mut new_catalog = HashMap::new();
        let mut new_covers = HashMap::new();
        self.scan_dir_recursive(&self.comics_dir, &mut new_catalog, &mut new_covers)
            .await?;

        tracing::info!("scan complete: {} comics found", new_catalog.len());

        let mut catalog = self.catalog.write().await;
        let mut covers = self.covers.write().await;
        *catalog = new_catalog;
        *covers = new_covers;

        Ok(())
    }

    fn scan_dir_recursive<'a>(
        &'a self,
        dir: &'a Path,
        catalog: &'a mut HashMap<String, Comic>,
        covers: &'a mut HashMap<String, CoverImage>,
    ) -> Pin<Box<dyn Future<Output = Result<(), ComicError>> + Send + 'a>> {
        Box::pin(async move {
            let mut entries = fs::read_dir(dir).await?;

            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();

                if path.is_dir() {
                    self.scan_dir_recursive(&path, catalog, covers).await?;
                } else if is_comic_archive(&path) {
                    if let Some(comic) = Comic::from_path(&self.comics_dir, &path) {
                        match self.extract_cover(&path).await {
                            Ok(cover) => {
                                covers.insert(comic.id.clone(), cover);
                            }
                            Err(e) => {
                                // A comic without a cover still appears in
                                // the catalog; the cover route returns 404.
                                tracing::debug!("no cover for {}: {}", comic.id, e);
                            }
                        }
                        catalog.insert(comic.id.clone(), comic);
                    }
                }
            }

            Ok(())
        })
    }

    /// Entries of the `/comics` payload, ordered by title so the rendered
    /// list is stable across rescans.
    pub async fn series_list(&self) -> Vec<SeriesSummary> {
        let catalog = self.catalog.read().await;
        let mut list: Vec<SeriesSummary> = catalog.values().map(Comic::summary).collect();
        list.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
        list
    }

    /// Looks up a comic by id, accepting both the raw and the
    /// percent-encoded form.
    pub async fn get_comic(&self, id: &str) -> Option<Comic> {
        let catalog = self.catalog.read().await;
        catalog
            .get(id)
            .or_else(|| {
                urlencoding::decode(id)
                    .ok()
                    .and_then(|decoded| catalog.get(decoded.as_ref()))
            })
            .cloned()
    }

    pub async fn get_cover(&self, id: &str) -> Option<CoverImage> {
        let covers = self.covers.read().await;
        covers
            .get(id)
            .or_else(|| {
                urlencoding::decode(id)
                    .ok()
                    .and_then(|decoded| covers.get(decoded.as_ref()))
            })
            .cloned()
    }

    /// Reads the full archive for download.
    pub async fn get_comic_data(&self, id: &str) -> Result<Vec<u8>, ComicError> {
        let comic = self
            .get_comic(id)
            .await
            .ok_or(ComicError::ComicNotFound)?;

        let path = comic.archive_path(&self.comics_dir);
        let mut file = File::open(&path).await.map_err(|e| {
            tracing::error!("failed to open {}: {}", path.display(), e);
            ComicError::Io(e)
        })?;

        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer).await?;
        Ok(buffer)
    }

    /// First image entry of the archive, by name order.
    async fn extract_cover(&self, path: &Path) -> Result<CoverImage, ComicError> {
        let mut file = File::open(path).await?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer).await?;

        let mut archive = ZipArchive::new(Cursor::new(buffer))?;

        let mut names: Vec<String> = archive
            .file_names()
            .filter(|name| is_image(name))
            .map(String::from)
            .collect();
        names.sort();

        let first = names.into_iter().next().ok_or(ComicError::NoCoverFound)?;
        let mut entry = archive.by_name(&first)?;
        let mut data = Vec::new();
        std::io::copy(&mut entry, &mut data)?;

        Ok(CoverImage { data })
    }

    /// Watches the comic directory and rescans on any create, modify or
    /// remove event. The watcher lives as long as the service.
    fn spawn_watcher(&self) -> Result<(), ComicError> {
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut watcher = notify::recommended_watcher(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    if matches!(
                        event.kind,
                        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                    ) {
                        let _ = tx.send(());
                    }
                }
            },
        )?;
        watcher.watch(&self.comics_dir, RecursiveMode::Recursive)?;

        let service = self.clone();
        tokio::spawn(async move {
            while rx.recv().await.is_some() {
                if let Err(e) = service.scan_directory().await {
                    tracing::error!("rescan failed: {}", e);
                }
            }
        });

        let mut slot = self.watcher.lock().unwrap();
        *slot = Some(watcher);

        Ok(())
    }
}

fn is_comic_archive(path: &Path) -> bool {
    match path.extension() {
        Some(ext) => {
            let ext = ext.to_string_lossy().to_lowercase();
            ext == "cbz" || ext == "zip"
        }
        None => false,
    }
}

fn is_image(name: &str) -> bool {
    let name = name.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_cbz(path: &Path, pages: &[(&str, &[u8])]) {
        let file = std::fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        for (name, data) in pages {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
    }

    async fn catalog_with(entries: &[(&str, &[(&str, &[u8])])]) -> (ComicService, TempDir) {
        let dir = TempDir::new().unwrap();
        for (name, pages) in entries {
            write_cbz(&dir.path().join(name), pages);
        }
        let service = ComicService::new(dir.path().to_path_buf()).await.unwrap();
        (service, dir)
    }

    #[tokio::test]
    async fn scan_finds_archives_and_sorts_series_by_title() {
        let (service, _dir) = catalog_with(&[
            ("Beta.cbz", &[("01.jpg", b"beta-page" as &[u8])]),
            ("Alpha.cbz", &[("01.jpg", b"alpha-page" as &[u8])]),
        ])
        .await;

        let series = service.series_list().await;
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].title, "Alpha");
        assert_eq!(series[1].title, "Beta");
        assert_eq!(series[0].id, "Alpha.cbz");
    }

    #[tokio::test]
    async fn nested_archives_are_catalogued_with_their_series() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("Seinen")).unwrap();
        write_cbz(
            &dir.path().join("Seinen").join("Vol 1.cbz"),
            &[("01.jpg", b"page" as &[u8])],
        );

        let service = ComicService::new(dir.path().to_path_buf()).await.unwrap();
        let comic = service.get_comic("Vol 1.cbz").await.unwrap();
        assert_eq!(comic.series.as_deref(), Some("Seinen"));
    }

    #[tokio::test]
    async fn cover_is_first_image_by_name_order() {
        let (service, _dir) = catalog_with(&[(
            "X.cbz",
            &[
                ("02.jpg", b"second" as &[u8]),
                ("01.jpg", b"first" as &[u8]),
                ("notes.txt", b"skip" as &[u8]),
            ],
        )])
        .await;

        let cover = service.get_cover("X.cbz").await.unwrap();
        assert_eq!(cover.data, b"first");
    }

    #[tokio::test]
    async fn archive_without_images_still_appears_without_cover() {
        let (service, _dir) =
            catalog_with(&[("Text.cbz", &[("readme.txt", b"hi" as &[u8])])]).await;

        assert!(service.get_comic("Text.cbz").await.is_some());
        assert!(service.get_cover("Text.cbz").await.is_none());
    }

    #[tokio::test]
    async fn comic_data_returns_archive_bytes() {
        let (service, dir) =
            catalog_with(&[("Akira.cbz", &[("01.jpg", b"page" as &[u8])])]).await;

        let data = service.get_comic_data("Akira.cbz").await.unwrap();
        let on_disk = std::fs::read(dir.path().join("Akira.cbz")).unwrap();
        assert_eq!(data, on_disk);
    }

    #[tokio::test]
    async fn lookup_accepts_percent_encoded_ids() {
        let (service, _dir) =
            catalog_with(&[("One Piece.cbz", &[("01.jpg", b"page" as &[u8])])]).await;

        assert!(service.get_comic("One%20Piece.cbz").await.is_some());
        assert!(service.get_cover("One%20Piece.cbz").await.is_some());
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let (service, _dir) = catalog_with(&[]).await;
        assert!(service.get_comic("nope.cbz").await.is_none());
        assert!(matches!(
            service.get_comic_data("nope.cbz").await,
            Err(ComicError::ComicNotFound)
        ));
    }

    #[tokio::test]
    async fn non_archive_files_are_ignored() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("cover.jpg"), b"img").unwrap();
        write_cbz(&dir.path().join("A.cbz"), &[("01.jpg", b"p" as &[u8])]);

        let service = ComicService::new(dir.path().to_path_buf()).await.unwrap();
        assert_eq!(service.series_list().await.len(), 1);
    }
}
