//! Playback Events
//!
//! Typed contract between the controller and whatever renders it. The
//! controller calls a [`PlaybackObserver`] at these points:
//! - Playlist published (initial load and reloads)
//! - Now-playing changed (immediately on navigation, before audio is ready)
//! - Progress updates (every position tick from the output)
//! - Play/pause changes
//!
//! UIs that prefer a queue can use an `UnboundedSender<PlaybackEvent>` or a
//! plain `Vec<PlaybackEvent>` as the observer.

use crate::error::PlaybackError;
use cadence_core::{Playlist, Track};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

/// Receiver of renderable state changes
pub trait PlaybackObserver: Send {
    /// A new playlist was published
    fn on_playlist_changed(&mut self, playlist: &Playlist);

    /// Now-playing text changed; `index` is the active playlist item
    fn on_now_playing_changed(&mut self, text: &str, index: usize);

    /// Progress moved
    ///
    /// `fraction` is in `[0.0, 1.0]`; the time strings are `M:SS`.
    fn on_progress_changed(&mut self, fraction: f64, elapsed: &str, total: &str);

    /// Playback started or paused
    fn on_play_state_changed(&mut self, is_playing: bool);

    /// Volume changed (0-100)
    fn on_volume_changed(&mut self, _level: u8) {}

    /// Fetching the track at `index` failed
    fn on_track_failed(&mut self, _index: usize, _error: &PlaybackError) {}
}

/// Events emitted by the playback system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playlist replaced
    PlaylistChanged {
        /// Tracks in navigation order
        tracks: Vec<Track>,
    },

    /// Now-playing text changed
    NowPlayingChanged {
        /// `"{title} - {artist}"`
        text: String,
        /// Active playlist index
        index: usize,
    },

    /// Progress update
    ProgressChanged {
        /// Fraction of the track played, 0.0 to 1.0
        fraction: f64,
        /// Elapsed time as `M:SS`
        elapsed: String,
        /// Total time as `M:SS`
        total: String,
    },

    /// Play/pause changed
    PlayStateChanged {
        /// Whether audio is playing
        is_playing: bool,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
    },

    /// Track fetch failed
    TrackFailed {
        /// Playlist index of the failed track
        index: usize,
        /// Error message
        message: String,
    },
}

impl PlaybackEvent {
    fn from_failure(index: usize, error: &PlaybackError) -> Self {
        Self::TrackFailed {
            index,
            message: error.to_string(),
        }
    }
}

impl PlaybackObserver for Vec<PlaybackEvent> {
    fn on_playlist_changed(&mut self, playlist: &Playlist) {
        self.push(PlaybackEvent::PlaylistChanged {
            tracks: playlist.tracks().to_vec(),
        });
    }

    fn on_now_playing_changed(&mut self, text: &str, index: usize) {
        self.push(PlaybackEvent::NowPlayingChanged {
            text: text.to_string(),
            index,
        });
    }

    fn on_progress_changed(&mut self, fraction: f64, elapsed: &str, total: &str) {
        self.push(PlaybackEvent::ProgressChanged {
            fraction,
            elapsed: elapsed.to_string(),
            total: total.to_string(),
        });
    }

    fn on_play_state_changed(&mut self, is_playing: bool) {
        self.push(PlaybackEvent::PlayStateChanged { is_playing });
    }

    fn on_volume_changed(&mut self, level: u8) {
        self.push(PlaybackEvent::VolumeChanged { level });
    }

    fn on_track_failed(&mut self, index: usize, error: &PlaybackError) {
        self.push(PlaybackEvent::from_failure(index, error));
    }
}

// A closed receiver means nobody is rendering; events are dropped.
impl PlaybackObserver for UnboundedSender<PlaybackEvent> {
    fn on_playlist_changed(&mut self, playlist: &Playlist) {
        self.send(PlaybackEvent::PlaylistChanged {
            tracks: playlist.tracks().to_vec(),
        })
        .ok();
    }

    fn on_now_playing_changed(&mut self, text: &str, index: usize) {
        self.send(PlaybackEvent::NowPlayingChanged {
            text: text.to_string(),
            index,
        })
        .ok();
    }

    fn on_progress_changed(&mut self, fraction: f64, elapsed: &str, total: &str) {
        self.send(PlaybackEvent::ProgressChanged {
            fraction,
            elapsed: elapsed.to_string(),
            total: total.to_string(),
        })
        .ok();
    }

    fn on_play_state_changed(&mut self, is_playing: bool) {
        self.send(PlaybackEvent::PlayStateChanged { is_playing }).ok();
    }

    fn on_volume_changed(&mut self, level: u8) {
        self.send(PlaybackEvent::VolumeChanged { level }).ok();
    }

    fn on_track_failed(&mut self, index: usize, error: &PlaybackError) {
        self.send(PlaybackEvent::from_failure(index, error)).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_observer_records_in_order() {
        let mut events: Vec<PlaybackEvent> = Vec::new();
        events.on_now_playing_changed("A - B", 3);
        events.on_play_state_changed(true);

        assert_eq!(
            events,
            vec![
                PlaybackEvent::NowPlayingChanged {
                    text: "A - B".into(),
                    index: 3
                },
                PlaybackEvent::PlayStateChanged { is_playing: true },
            ]
        );
    }

    #[test]
    fn channel_observer_survives_closed_receiver() {
        let (mut tx, rx) = tokio::sync::mpsc::unbounded_channel();
        drop(rx);
        tx.on_play_state_changed(false);
        tx.on_volume_changed(20);
    }

    #[test]
    fn failure_event_carries_message() {
        let mut events: Vec<PlaybackEvent> = Vec::new();
        events.on_track_failed(2, &PlaybackError::NoTrackLoaded);

        assert_eq!(
            events[0],
            PlaybackEvent::TrackFailed {
                index: 2,
                message: "No track loaded".into()
            }
        );
    }
}
