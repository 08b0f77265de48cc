use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One entry of the `/comics` payload: the shape the series list page
/// consumes. `id` is opaque to the client and only ever embedded
/// percent-encoded into the reader link; `title` is display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub id: String,
    pub title: String,
}

/// Body of `GET /comics`. The order of `comics` is part of the contract:
/// it determines the order of the rendered list items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPayload {
    pub comics: Vec<SeriesSummary>,
}

/// A comic archive known to the catalog. `id` is the archive file name.
#[derive(Debug, Clone)]
pub struct Comic {
    pub id: String,
    pub title: String,
    pub file_name: String,
    pub path: String,
    pub folder_path: Vec<String>,
    pub series: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CoverImage {
    pub data: Vec<u8>,
}

impl Comic {
    /// Builds a catalog entry from an archive path inside `base_dir`.
    /// Returns `None` for paths without a usable file name or outside
    /// the base directory.
    pub fn from_path(base_dir: &Path, full_path: &Path) -> Option<Self> {
        let file_name = full_path.file_name()?.to_string_lossy().into_owned();
        let title = full_path.file_stem()?.to_string_lossy().into_owned();

        let relative_path = full_path.strip_prefix(base_dir).ok()?;
        let folder_path: Vec<String> = match relative_path.parent() {
            Some(parent) => parent
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect(),
            None => vec![],
        };

        // The immediate parent folder names the series.
        let series = folder_path.last().cloned();

        let encoded_path = format!("/comics/{}", urlencoding::encode(&file_name));

        Some(Comic {
            id: file_name.clone(),
            title,
            file_name,
            path: encoded_path,
            folder_path,
            series,
        })
    }

    /// Projects the wire model served to the series list page.
    pub fn summary(&self) -> SeriesSummary {
        SeriesSummary {
            id: self.id.clone(),
            title: self.title.clone(),
        }
    }

    /// Absolute location of the archive under `base_dir`.
    pub fn archive_path(&self, base_dir: &Path) -> PathBuf {
        let mut path = base_dir.to_path_buf();
        for folder in &self.folder_path {
            path.push(folder);
        }
        path.push(&self.file_name);
        path
    }
}
