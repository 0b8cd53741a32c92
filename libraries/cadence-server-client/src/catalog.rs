//! Catalog retrieval with offline fallback.

use crate::error::{Result, ServerClientError};
use async_trait::async_trait;
use cadence_core::{CatalogResponse, FetchError, Playlist, PlaylistSource};
use reqwest::Client;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Playlist bundled into the binary, same shape as the catalog response.
const BUNDLED_FALLBACK: &str = include_str!("../data/fallback-playlist.json");

/// Catalog client for `GET {base}/music`.
///
/// As a [`PlaylistSource`] it never fails: any catalog error is logged and the
/// fallback playlist is returned instead.
#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    url: String,
    fallback_path: Option<PathBuf>,
}

impl CatalogClient {
    pub(crate) fn new(http: Client, url: String) -> Self {
        Self {
            http,
            url,
            fallback_path: None,
        }
    }

    /// Use a JSON file of the catalog shape as the fallback playlist.
    ///
    /// The bundled playlist is still used if the file cannot be read.
    pub fn with_fallback_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.fallback_path = Some(path.into());
        self
    }

    /// Fetch the catalog from the server, without falling back.
    pub async fn fetch_catalog(&self) -> std::result::Result<Playlist, FetchError> {
        let response = self.request_catalog().await?;
        Ok(Playlist::from(response))
    }

    async fn request_catalog(&self) -> Result<CatalogResponse> {
        debug!(url = %self.url, "Requesting catalog");

        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(ServerClientError::from_send)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ServerClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            ServerClientError::ParseError(format!("Failed to parse catalog: {}", e))
        })
    }

    /// Playlist used when the catalog is unavailable.
    pub async fn fallback_playlist(&self) -> Playlist {
        if let Some(path) = &self.fallback_path {
            match read_catalog_file(path).await {
                Ok(playlist) => return playlist,
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "Fallback file unusable, using bundled playlist"
                    );
                }
            }
        }
        bundled_playlist()
    }
}

#[async_trait]
impl PlaylistSource for CatalogClient {
    async fn load(&self) -> Playlist {
        match self.fetch_catalog().await {
            Ok(playlist) => {
                info!(tracks = playlist.len(), "Catalog loaded");
                playlist
            }
            Err(e) => {
                warn!(error = %e, "Catalog unavailable, using fallback playlist");
                self.fallback_playlist().await
            }
        }
    }
}

async fn read_catalog_file(path: &Path) -> Result<Playlist> {
    let text = tokio::fs::read_to_string(path).await?;
    let response: CatalogResponse = serde_json::from_str(&text)
        .map_err(|e| ServerClientError::ParseError(e.to_string()))?;
    Ok(response.into())
}

/// The playlist compiled into the binary.
pub fn bundled_playlist() -> Playlist {
    match serde_json::from_str::<CatalogResponse>(BUNDLED_FALLBACK) {
        Ok(response) => response.into(),
        Err(e) => {
            warn!(error = %e, "Bundled playlist is malformed");
            Playlist::default()
        }
    }
}
