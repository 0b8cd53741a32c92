/// Collaborator traits for the playback controller
use crate::error::Result;
use crate::types::{AudioResource, Playlist, Track};
use async_trait::async_trait;
use std::time::Duration;

/// Resolves the playlist the controller navigates.
///
/// Implementations must degrade instead of failing: when the remote catalog
/// is unreachable they return a local fallback.
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    /// Load the current playlist
    async fn load(&self) -> Playlist;
}

/// Retrieves a single track's audio bytes.
///
/// Implementations do not fall back; recovery is the caller's decision.
#[async_trait]
pub trait TrackFetcher: Send + Sync {
    /// Fetch the audio for `track` and materialize it as a local resource
    ///
    /// # Errors
    /// Returns an error if the transport fails or the server rejects the request
    async fn fetch(&self, track: &Track) -> Result<AudioResource>;
}

/// Audio output primitive
///
/// Owns the bound [`AudioResource`] and performs the actual playback. At most
/// one resource is bound at a time; binding a new one drops the previous.
/// Position, duration and end-of-track notifications flow back to the
/// controller out of band.
///
/// Every `bind` and `release` call starts a new binding, numbered from 1 in
/// call order. Notifications may quote that number so a late one about a
/// replaced resource can be dropped.
pub trait AudioOutput: Send {
    /// Bind a resource, releasing any previously bound one
    fn bind(&mut self, resource: AudioResource);

    /// Release the bound resource, if any
    fn release(&mut self);

    /// Start or resume playback of the bound resource
    fn play(&mut self);

    /// Pause playback, keeping the position
    fn pause(&mut self);

    /// Jump to `position` from the start of the bound resource
    fn seek(&mut self, position: Duration);

    /// Apply a linear volume level in `[0.0, 1.0]`
    fn set_volume(&mut self, level: f32);
}
