//! Cadence Server Client
//!
//! HTTP collaborators for the Cadence playback controller.
//!
//! # Features
//!
//! - **Catalog**: `GET {base}/music`, falling back to a bundled playlist when
//!   the server is unreachable or answers with garbage
//! - **Track streaming**: `GET {base}/music?audio_id={id}` with
//!   `Range: bytes=0-`, written to a temporary file as it arrives
//!
//! # Example
//!
//! ```ignore
//! use cadence_core::{PlaylistSource, TrackFetcher};
//! use cadence_server_client::{ServerClient, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ServerClient::new(ServerConfig::new("http://localhost:8080"))?;
//!
//!     // Never fails; degrades to the bundled playlist
//!     let playlist = client.catalog().load().await;
//!
//!     if let Some(track) = playlist.get(0) {
//!         let resource = client.tracks().fetch(track).await?;
//!         println!("{} bytes at {}", resource.len(), resource.path().display());
//!     }
//!
//!     Ok(())
//! }
//! ```

mod catalog;
mod client;
mod error;
mod stream;
mod types;

pub use catalog::{bundled_playlist, CatalogClient};
pub use client::ServerClient;
pub use error::{Result, ServerClientError};
pub use stream::TrackStreamClient;
pub use types::{ServerConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT};
