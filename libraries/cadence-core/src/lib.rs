//! Cadence Core
//!
//! Platform-agnostic types, traits, and error handling shared by the Cadence
//! playback controller and its collaborators.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`, `Playlist`, `AudioResource`
//! - **Collaborator Traits**: `PlaylistSource`, `TrackFetcher`, `AudioOutput`
//! - **Error Handling**: `FetchError` for everything that crosses the network boundary
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{Playlist, Track};
//!
//! let playlist = Playlist::new(vec![
//!     Track::new("1", "Blue in Green", "Miles Davis"),
//!     Track::new("2", "Naima", "John Coltrane"),
//! ]);
//!
//! assert_eq!(playlist.len(), 2);
//! assert_eq!(playlist.get(1).map(Track::display_text).as_deref(), Some("Naima - John Coltrane"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{FetchError, FetchErrorKind, Result};
pub use traits::{AudioOutput, PlaylistSource, TrackFetcher};
pub use types::{AudioResource, CatalogResponse, Playlist, Track, TrackId};
