//! Error types for playback management

use cadence_core::{FetchError, TrackId};
use thiserror::Error;

/// Playback errors
///
/// Guard conditions (`EmptyPlaylist`, `InvalidIndex`, `NoTrackLoaded`,
/// `DurationUnknown`) turn transport operations into no-ops; they are
/// logged, never returned from the transport surface.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Operation needs at least one track
    #[error("Playlist is empty")]
    EmptyPlaylist,

    /// Index outside the playlist bounds
    #[error("Index {index} out of bounds for playlist of {len}")]
    InvalidIndex { index: usize, len: usize },

    /// Fetching the track's audio failed
    #[error("Failed to fetch track {track_id}: {source}")]
    TrackFetchFailed {
        track_id: TrackId,
        #[source]
        source: FetchError,
    },

    /// No audio resource is bound to the output
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Track duration has not been reported yet
    #[error("Track duration unknown")]
    DurationUnknown,

    /// The player event loop is no longer running
    #[error("Player stopped")]
    PlayerStopped,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
