//! Main Cadence server client.

use crate::catalog::CatalogClient;
use crate::error::{Result, ServerClientError};
use crate::stream::TrackStreamClient;
use crate::types::ServerConfig;
use reqwest::Client;
use std::sync::Arc;
use tracing::debug;

/// Client for a Cadence music server.
///
/// Holds one pooled HTTP client and the normalized base URL. The catalog and
/// track sub-clients share both.
///
/// # Example
///
/// ```ignore
/// use cadence_core::PlaylistSource;
/// use cadence_server_client::{ServerClient, ServerConfig};
///
/// let client = ServerClient::new(ServerConfig::new("http://localhost:8080"))?;
/// let playlist = client.catalog().load().await;
/// println!("{} tracks", playlist.len());
/// ```
#[derive(Clone)]
pub struct ServerClient {
    http: Client,
    base_url: Arc<str>,
}

impl ServerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let base_url = normalize_url(&config.url)?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("Cadence/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ServerClientError::Request)?;

        debug!(url = %base_url, "Server client created");

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Get the normalized server URL.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Catalog client, usable as a `PlaylistSource`.
    pub fn catalog(&self) -> CatalogClient {
        CatalogClient::new(self.http.clone(), self.music_url())
    }

    /// Track streaming client, usable as a `TrackFetcher`.
    pub fn tracks(&self) -> TrackStreamClient {
        TrackStreamClient::new(self.http.clone(), self.music_url())
    }

    fn music_url(&self) -> String {
        format!("{}/music", self.base_url)
    }
}

fn normalize_url(url: &str) -> Result<String> {
    if url.is_empty() {
        return Err(ServerClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let url = url.trim_end_matches('/');
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ServerClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    Ok(url.to_string())
}
