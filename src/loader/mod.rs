//! Client side of the series catalog: fetches `GET /comics` and renders
//! one reader link per series into a [`SeriesList`].
//!
//! An explicit two-stage pipeline. Stage one issues the request and decodes
//! the payload; stage two renders it into a caller-supplied container. The
//! top-level [`SeriesListLoader::load_into`] wires them together: a failed
//! request is logged and swallowed, a payload that cannot be decoded is not.

pub mod dom;

use std::fmt;

use crate::models::comic::SeriesPayload;
use dom::{ListItem, SeriesList};

/// Fixed resource path the loader fetches.
pub const COMICS_PATH: &str = "/comics";

/// Fixed destination template for rendered links; the query value is the
/// percent-encoded series id. Contract with the companion reader page.
pub const READER_PAGE: &str = "/static/comic_reader.html";

#[derive(Debug)]
pub enum LoadError {
    /// The response status did not indicate success. Carries no detail:
    /// every non-2xx status is treated uniformly.
    NetworkFailure,
    /// The request never produced a response (connection refused, DNS,
    /// transport shutdown). Handled on the same swallowed path as
    /// [`LoadError::NetworkFailure`].
    Transport(reqwest::Error),
    /// The body was not a valid series payload. Propagated to the caller.
    Decode(serde_json::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::NetworkFailure => write!(f, "network request failed"),
            LoadError::Transport(e) => write!(f, "network request failed: {}", e),
            LoadError::Decode(e) => write!(f, "invalid series payload: {}", e),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<reqwest::Error> for LoadError {
    fn from(error: reqwest::Error) -> Self {
        LoadError::Transport(error)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(error: serde_json::Error) -> Self {
        LoadError::Decode(error)
    }
}

/// Fetches the series catalog once and renders it as reader links.
pub struct SeriesListLoader {
    client: reqwest::Client,
    base_url: String,
}

impl SeriesListLoader {
    /// `base_url` is the catalog server origin, e.g. `http://localhost:8000`.
    /// No timeout is configured here; transport defaults apply.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        SeriesListLoader {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Stage one: a single GET of the catalog, no retries.
    ///
    /// Any non-2xx status is `NetworkFailure`; a 2xx body is decoded as
    /// JSON into the payload, preserving entry order.
    pub async fn fetch_series(&self) -> Result<SeriesPayload, LoadError> {
        let url = format!("{}{}", self.base_url, COMICS_PATH);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(LoadError::NetworkFailure);
        }

        let body = response.text().await?;
        let payload: SeriesPayload = serde_json::from_str(&body)?;
        tracing::debug!("received series payload: {:?}", payload);
        Ok(payload)
    }

    /// Stage two: appends one reader link per payload entry, in payload
    /// order. Pure with respect to everything but the container. Returns
    /// the number of items appended.
    pub fn render_into(payload: &SeriesPayload, list: &mut SeriesList) -> usize {
        for series in &payload.comics {
            let href = format!(
                "{}?comic={}",
                READER_PAGE,
                urlencoding::encode(&series.id)
            );
            list.append(ListItem::new(href, series.title.clone()));
        }
        payload.comics.len()
    }

    /// One-shot load-and-render, the page-ready entry point.
    ///
    /// Request failures (bad status or no response at all) are logged and
    /// swallowed, leaving the container untouched. Decode failures
    /// propagate. Calling this twice on the same container appends a
    /// second copy of every entry; the container is never cleared.
    pub async fn load_into(&self, list: &mut SeriesList) -> Result<usize, LoadError> {
        match self.fetch_series().await {
            Ok(payload) => Ok(Self::render_into(&payload, list)),
            Err(e @ (LoadError::NetworkFailure | LoadError::Transport(_))) => {
                tracing::error!("failed to fetch comic series: {}", e);
                Ok(0)
            }
            Err(e) => Err(e),
        }
    }
}
