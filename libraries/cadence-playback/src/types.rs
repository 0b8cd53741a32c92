//! Core types for playback management

use serde::{Deserialize, Serialize};

/// Composite player state
///
/// Derived from the controller's fields rather than stored, so it can never
/// drift out of sync with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    /// No playlist loaded yet
    Empty,

    /// Playlist loaded, nothing bound to the output
    Idle,

    /// Track fetch in flight
    Loading,

    /// Bound resource is playing
    Playing,

    /// Bound resource is paused
    Paused,

    /// Last track fetch failed; the next transport operation retries
    Error,
}

/// Point-in-time view of the controller for rendering and diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub state: PlayerState,
    pub current_index: usize,
    pub is_playing: bool,
    /// Linear volume in `[0.0, 1.0]`
    pub volume: f32,
    /// Elapsed seconds
    pub current_time: f64,
    /// Total seconds, once the output has reported it
    pub duration: Option<f64>,
    pub playlist_len: usize,
}

/// Configuration for the playback controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial volume (0-100, default: 100)
    pub volume: u8,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { volume: 100 }
    }
}
