//! Playback controller - core state machine
//!
//! Owns the playlist, current index, play/pause state and volume. Network
//! work is not performed here: navigation hands back a [`FetchTicket`] that
//! the event loop resolves, and the result is fed back through
//! [`PlaybackController::complete_fetch`]. Every ticket carries a generation
//! number, so a completion that arrives after a newer navigation is
//! discarded instead of clobbering it.

use crate::{
    error::PlaybackError,
    events::PlaybackObserver,
    time::format_time,
    types::{PlaybackConfig, PlaybackSnapshot, PlayerState},
    volume::Volume,
};
use cadence_core::{AudioOutput, AudioResource, FetchError, Playlist, Track, TrackId};
use std::time::Duration;
use tracing::{debug, info, warn};

/// A track fetch the controller is waiting on
///
/// Returned by navigation operations; must be handed back to
/// [`PlaybackController::complete_fetch`] together with the fetch result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    index: usize,
    track: Track,
}

impl FetchTicket {
    /// Request generation; only the newest one is applied
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Playlist index being loaded
    pub fn index(&self) -> usize {
        self.index
    }

    /// Track to fetch
    pub fn track(&self) -> &Track {
        &self.track
    }
}

/// Central playback state machine
///
/// Generic over the output primitive and the UI observer so both can be
/// swapped for recording fakes in tests.
pub struct PlaybackController<O, U> {
    // Playlist (None until the first load completes)
    playlist: Option<Playlist>,
    current_index: usize,

    // Transport state
    is_playing: bool,
    volume: Volume,
    current_time: f64,
    duration: Option<f64>,

    // Track whose resource is bound to the output
    bound: Option<TrackId>,
    // Count of bind/release calls made on the output
    binding: u64,

    // Request identity
    generation: u64,
    pending: Option<u64>,
    last_fetch_failed: bool,

    // Collaborators
    output: O,
    observer: U,
}

impl<O: AudioOutput, U: PlaybackObserver> PlaybackController<O, U> {
    /// Create new controller
    ///
    /// Applies the configured volume to the output immediately.
    pub fn new(mut output: O, observer: U, config: PlaybackConfig) -> Self {
        let volume = Volume::new(config.volume);
        output.set_volume(volume.gain());

        Self {
            playlist: None,
            current_index: 0,
            is_playing: false,
            volume,
            current_time: 0.0,
            duration: None,
            bound: None,
            binding: 0,
            generation: 0,
            pending: None,
            last_fetch_failed: false,
            output,
            observer,
        }
    }

    // ===== Playlist =====

    /// Replace the playlist wholesale and publish it
    ///
    /// The current index is kept when it is still in bounds, otherwise reset
    /// to 0. The bound resource is left alone.
    pub fn set_playlist(&mut self, playlist: Playlist) {
        if self.current_index >= playlist.len() {
            self.current_index = 0;
        }

        info!(tracks = playlist.len(), "Playlist published");
        self.observer.on_playlist_changed(&playlist);
        self.playlist = Some(playlist);
    }

    /// Current playlist, if loaded
    pub fn playlist(&self) -> Option<&Playlist> {
        self.playlist.as_ref()
    }

    fn playlist_len(&self) -> usize {
        self.playlist.as_ref().map_or(0, Playlist::len)
    }

    fn track_at(&self, index: usize) -> Result<&Track, PlaybackError> {
        let playlist = self
            .playlist
            .as_ref()
            .filter(|p| !p.is_empty())
            .ok_or(PlaybackError::EmptyPlaylist)?;

        playlist.get(index).ok_or(PlaybackError::InvalidIndex {
            index,
            len: playlist.len(),
        })
    }

    // ===== Navigation =====

    /// Start loading the track at `index`
    ///
    /// Publishes now-playing text right away and returns the fetch the
    /// caller must perform. Returns `None` (and changes nothing) when the
    /// index is out of bounds or the playlist is empty.
    pub fn play_track(&mut self, index: usize) -> Option<FetchTicket> {
        let track = match self.track_at(index) {
            Ok(track) => track.clone(),
            Err(e) => {
                debug!(index, error = %e, "Ignoring play request");
                return None;
            }
        };

        self.current_index = index;
        self.generation += 1;
        self.pending = Some(self.generation);
        self.last_fetch_failed = false;

        self.observer
            .on_now_playing_changed(&track.display_text(), index);

        info!(
            index,
            track_id = %track.id,
            generation = self.generation,
            "Loading track"
        );

        Some(FetchTicket {
            generation: self.generation,
            index,
            track,
        })
    }

    /// Skip to the next track, wrapping to the first after the last
    pub fn play_next(&mut self) -> Option<FetchTicket> {
        let len = self.playlist_len();
        if len == 0 {
            debug!(error = %PlaybackError::EmptyPlaylist, "Ignoring next");
            return None;
        }
        self.play_track((self.current_index + 1) % len)
    }

    /// Go to the previous track, wrapping to the last before the first
    pub fn play_previous(&mut self) -> Option<FetchTicket> {
        let len = self.playlist_len();
        if len == 0 {
            debug!(error = %PlaybackError::EmptyPlaylist, "Ignoring previous");
            return None;
        }
        self.play_track((self.current_index + len - 1) % len)
    }

    /// Pause or resume the bound resource
    ///
    /// The bound resource can be paused even while the next track loads.
    /// With nothing bound, starts the first track instead, unless a fetch is
    /// already in flight.
    pub fn toggle_play(&mut self) -> Option<FetchTicket> {
        if self.bound.is_some() {
            if self.is_playing {
                self.output.pause();
            } else {
                self.output.play();
            }
            self.is_playing = !self.is_playing;
            self.observer.on_play_state_changed(self.is_playing);
            return None;
        }

        if self.pending.is_some() {
            debug!("Ignoring toggle while a track is loading");
            return None;
        }

        self.play_track(0)
    }

    /// Apply the outcome of a track fetch
    ///
    /// Returns `false` when the ticket was superseded by a newer navigation;
    /// the stale resource is dropped (and thereby revoked) without touching
    /// any state.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<AudioResource, FetchError>,
    ) -> bool {
        if self.pending != Some(ticket.generation) {
            debug!(
                generation = ticket.generation,
                current = self.generation,
                track_id = %ticket.track.id,
                "Discarding stale fetch result"
            );
            return false;
        }
        self.pending = None;

        match result {
            Ok(resource) => {
                self.output.bind(resource);
                self.binding += 1;
                self.bound = Some(ticket.track.id.clone());
                self.current_time = 0.0;
                self.duration = None;

                self.output.play();
                self.is_playing = true;

                info!(index = ticket.index, track_id = %ticket.track.id, "Playing track");
                self.observer.on_play_state_changed(true);
                self.publish_progress();
            }
            Err(source) => {
                let error = PlaybackError::TrackFetchFailed {
                    track_id: ticket.track.id.clone(),
                    source,
                };
                warn!(index = ticket.index, error = %error, "Track fetch failed");

                // Now-playing already names the failed track; don't leave a
                // different track's audio running behind it.
                self.output.release();
                self.binding += 1;
                self.bound = None;
                self.current_time = 0.0;
                self.duration = None;
                self.last_fetch_failed = true;
                self.is_playing = false;

                self.observer.on_play_state_changed(false);
                self.observer.on_track_failed(ticket.index, &error);
            }
        }

        true
    }

    // ===== Output callbacks =====

    /// Position tick from the output primitive
    ///
    /// A non-finite or non-positive `duration` counts as unknown, in which
    /// case progress is reported as 0.
    pub fn on_position_update(&mut self, current_time: f64, duration: Option<f64>) {
        self.duration = duration.filter(|d| d.is_finite() && *d > 0.0);

        let current_time = if current_time.is_finite() {
            current_time.max(0.0)
        } else {
            0.0
        };
        self.current_time = match self.duration {
            Some(d) => current_time.min(d),
            None => current_time,
        };

        self.publish_progress();
    }

    /// Duration became known before the first position tick
    pub fn on_duration_changed(&mut self, duration: f64) {
        self.on_position_update(self.current_time, Some(duration));
    }

    /// The bound resource played to its end; continue with the next track
    pub fn on_track_ended(&mut self) -> Option<FetchTicket> {
        debug!(index = self.current_index, "Track ended");
        self.play_next()
    }

    fn publish_progress(&mut self) {
        let fraction = self.progress();
        let elapsed = format_time(self.current_time);
        let total = format_time(self.duration.unwrap_or(0.0));
        self.observer
            .on_progress_changed(fraction, &elapsed, &total);
    }

    // ===== Seek =====

    /// Jump to `fraction` (0.0-1.0) of the bound track
    ///
    /// No-op until a resource is bound and its duration is known.
    pub fn seek(&mut self, fraction: f64) {
        if self.bound.is_none() {
            debug!(error = %PlaybackError::NoTrackLoaded, "Ignoring seek");
            return;
        }
        let Some(duration) = self.duration else {
            debug!(error = %PlaybackError::DurationUnknown, "Ignoring seek");
            return;
        };
        if !fraction.is_finite() {
            debug!(fraction, "Ignoring seek to non-finite position");
            return;
        }

        let target = fraction.clamp(0.0, 1.0) * duration;
        match Duration::try_from_secs_f64(target) {
            Ok(position) => {
                debug!(target, "Seeking");
                self.output.seek(position);
            }
            Err(e) => warn!(target, error = %e, "Ignoring seek to unrepresentable position"),
        }
    }

    // ===== Volume =====

    /// Set volume (0-100)
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        self.output.set_volume(self.volume.gain());
        self.observer.on_volume_changed(self.volume.level());
    }

    /// Current volume level (0-100)
    pub fn volume_level(&self) -> u8 {
        self.volume.level()
    }

    /// Current linear volume (0.0-1.0)
    pub fn volume(&self) -> f32 {
        self.volume.gain()
    }

    // ===== State queries =====

    /// Derived composite state
    pub fn state(&self) -> PlayerState {
        if self.playlist.is_none() {
            PlayerState::Empty
        } else if self.pending.is_some() {
            PlayerState::Loading
        } else if self.last_fetch_failed {
            PlayerState::Error
        } else if self.bound.is_none() {
            PlayerState::Idle
        } else if self.is_playing {
            PlayerState::Playing
        } else {
            PlayerState::Paused
        }
    }

    /// Snapshot of everything a renderer needs
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            state: self.state(),
            current_index: self.current_index,
            is_playing: self.is_playing,
            volume: self.volume.gain(),
            current_time: self.current_time,
            duration: self.duration,
            playlist_len: self.playlist_len(),
        }
    }

    /// Active playlist index
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Whether audio is playing
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Elapsed seconds of the bound track
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Total seconds of the bound track, once known
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Progress fraction in `[0.0, 1.0]`; 0 while duration is unknown
    pub fn progress(&self) -> f64 {
        match self.duration {
            Some(d) if d > 0.0 => (self.current_time / d).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    /// Track whose resource is bound to the output
    pub fn bound_track(&self) -> Option<&TrackId> {
        self.bound.as_ref()
    }

    /// Number of `bind`/`release` calls made on the output so far
    ///
    /// Output notifications stamped with an older number concern a resource
    /// that has since been replaced.
    pub fn binding(&self) -> u64 {
        self.binding
    }

    /// Now-playing text for the current index
    pub fn now_playing(&self) -> Option<String> {
        self.track_at(self.current_index)
            .ok()
            .map(Track::display_text)
    }

    /// Output primitive
    pub fn output(&self) -> &O {
        &self.output
    }

    /// UI observer
    pub fn observer(&self) -> &U {
        &self.observer
    }

    /// Mutable UI observer
    pub fn observer_mut(&mut self) -> &mut U {
        &mut self.observer
    }
}
