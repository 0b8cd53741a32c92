//! Cadence - Playback Management
//!
//! Playlist navigation and transport control for a client that streams
//! tracks from a remote catalog server.
//!
//! This crate provides:
//! - Playback state machine (`Empty`, `Idle`, `Loading`, `Playing`, `Paused`, `Error`)
//! - Circular next/previous navigation and auto-advance on track end
//! - Progress and `M:SS` time reporting from output position ticks
//! - Seek by fraction and linear volume (0-100%)
//! - Request generations so late fetch results never override newer navigation
//! - A single-task event loop ([`Player`]) that runs fetches concurrently
//!
//! # Architecture
//!
//! `cadence-playback` performs no I/O of its own:
//! - The playlist comes from a [`PlaylistSource`](cadence_core::PlaylistSource)
//! - Track bytes come from a [`TrackFetcher`](cadence_core::TrackFetcher)
//! - Audio is played by an [`AudioOutput`](cadence_core::AudioOutput)
//! - Renderable changes go to a [`PlaybackObserver`]
//!
//! # Example: Driving the state machine directly
//!
//! ```rust
//! use cadence_core::{AudioOutput, AudioResource, Playlist, Track};
//! use cadence_playback::{PlaybackConfig, PlaybackController, PlaybackEvent, PlayerState};
//! use std::time::Duration;
//!
//! struct NullOutput;
//!
//! impl AudioOutput for NullOutput {
//!     fn bind(&mut self, _resource: AudioResource) {}
//!     fn release(&mut self) {}
//!     fn play(&mut self) {}
//!     fn pause(&mut self) {}
//!     fn seek(&mut self, _position: Duration) {}
//!     fn set_volume(&mut self, _level: f32) {}
//! }
//!
//! let mut controller =
//!     PlaybackController::new(NullOutput, Vec::<PlaybackEvent>::new(), PlaybackConfig::default());
//! controller.set_playlist(Playlist::new(vec![Track::new("1", "Intro", "Band")]));
//!
//! // Navigation hands back the fetch to perform
//! let ticket = controller.play_track(0).unwrap();
//! let resource = AudioResource::from_bytes(ticket.track().id.clone(), b"...", None).unwrap();
//! controller.complete_fetch(ticket, Ok(resource));
//!
//! assert_eq!(controller.state(), PlayerState::Playing);
//! ```

mod controller;
mod error;
mod events;
pub mod player;
mod time;
pub mod types;
mod volume;

// Public exports
pub use controller::{FetchTicket, PlaybackController};
pub use error::{PlaybackError, Result};
pub use events::{PlaybackEvent, PlaybackObserver};
pub use player::{OutputEvent, Player, PlayerCommand, PlayerHandle};
pub use time::format_time;
pub use types::{PlaybackConfig, PlaybackSnapshot, PlayerState};
pub use volume::Volume;
