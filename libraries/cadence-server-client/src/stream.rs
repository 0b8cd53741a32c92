//! Track audio streaming for the Cadence server.

use crate::error::{Result, ServerClientError};
use async_trait::async_trait;
use cadence_core::{AudioResource, FetchError, Track, TrackFetcher, TrackId};
use futures_util::StreamExt;
use reqwest::header::{CONTENT_TYPE, RANGE};
use reqwest::Client;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Track streaming client for `GET {base}/music?audio_id={id}`.
///
/// Requests are sent with `Range: bytes=0-` so the server may answer with
/// `206 Partial Content` and stream the file. Any 2xx status is accepted.
#[derive(Clone)]
pub struct TrackStreamClient {
    http: Client,
    url: String,
}

impl TrackStreamClient {
    pub(crate) fn new(http: Client, url: String) -> Self {
        Self { http, url }
    }

    /// Download a track into a temporary file.
    ///
    /// The body is written chunk by chunk as it arrives. If the transfer
    /// fails part way, the partial file is deleted.
    pub async fn fetch_track(&self, track_id: &TrackId) -> Result<AudioResource> {
        debug!(url = %self.url, track_id = %track_id, "Requesting track audio");

        let response = self
            .http
            .get(&self.url)
            .query(&[("audio_id", track_id.as_str())])
            .header(RANGE, "bytes=0-")
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

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let temp = tempfile::Builder::new()
            .prefix("cadence-")
            .suffix(".audio")
            .tempfile()?;
        let mut file = File::from_std(temp.reopen()?);

        let mut received: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result?;
            file.write_all(&chunk).await?;
            received += chunk.len() as u64;
        }
        file.flush().await?;
        drop(file);

        info!(
            track_id = %track_id,
            status = status.as_u16(),
            size = received,
            "Track downloaded"
        );

        Ok(AudioResource::from_file(
            track_id.clone(),
            temp,
            content_type,
        )?)
    }
}

#[async_trait]
impl TrackFetcher for TrackStreamClient {
    async fn fetch(&self, track: &Track) -> std::result::Result<AudioResource, FetchError> {
        Ok(self.fetch_track(&track.id).await?)
    }
}
