//! Player event loop
//!
//! Runs a [`PlaybackController`] on a single task. UI commands, output
//! callbacks and network completions all arrive as messages on one channel
//! and are applied strictly one at a time, so the controller needs no locks.
//! Playlist loads and track fetches run as separate tasks and post their
//! results back to the same channel.

use crate::{
    controller::{FetchTicket, PlaybackController},
    error::{PlaybackError, Result},
    events::PlaybackObserver,
};
use cadence_core::{AudioOutput, AudioResource, FetchError, Playlist, PlaylistSource, TrackFetcher};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, WeakUnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Commands accepted by the player loop
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    /// Load (or reload) the playlist from the source
    LoadPlaylist,

    /// Pause/resume, or start the first track if nothing is bound
    TogglePlay,

    /// Go to previous track (wrapping)
    Previous,

    /// Skip to next track (wrapping)
    Next,

    /// Play the track at this playlist index
    PlayTrack(usize),

    /// Seek to a fraction (0.0-1.0) of the current track
    Seek(f64),

    /// Set volume (0-100)
    SetVolume(u8),

    /// Notification from the output primitive about a specific binding
    ///
    /// Dropped when that binding has since been replaced by another
    /// `bind`/`release`.
    Output { binding: u64, event: OutputEvent },

    /// Stop after in-flight fetches have completed
    Shutdown,
}

/// Notifications from the output primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputEvent {
    /// Playback position (seconds), with the duration if known
    Position {
        current_time: f64,
        duration: Option<f64>,
    },

    /// Track duration became known (seconds)
    Duration(f64),

    /// Bound track played to its end
    Ended,
}

enum Message {
    Command(PlayerCommand),
    PlaylistLoaded(Playlist),
    FetchCompleted(FetchTicket, std::result::Result<AudioResource, FetchError>),
}

/// Cloneable sender side of the player loop
///
/// Handed to the UI collaborator and to the output primitive.
#[derive(Clone)]
pub struct PlayerHandle {
    tx: UnboundedSender<Message>,
}

/// Receiving side of the player loop, consumed by [`Player::new`]
pub struct Mailbox {
    rx: UnboundedReceiver<Message>,
    tx: WeakUnboundedSender<Message>,
}

/// Create a connected handle/mailbox pair
///
/// Split from [`Player::new`] so the output primitive can be given a handle
/// before the controller that owns it is built.
pub fn channel() -> (PlayerHandle, Mailbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    let weak = tx.downgrade();
    (PlayerHandle { tx }, Mailbox { rx, tx: weak })
}

impl PlayerHandle {
    /// Send a raw command
    pub fn send(&self, command: PlayerCommand) -> Result<()> {
        self.tx
            .send(Message::Command(command))
            .map_err(|_| PlaybackError::PlayerStopped)
    }

    /// Start loading the playlist; returns without waiting for it
    pub fn initialize(&self) -> Result<()> {
        self.send(PlayerCommand::LoadPlaylist)
    }

    /// Reload the playlist, replacing it wholesale
    pub fn reload(&self) -> Result<()> {
        self.send(PlayerCommand::LoadPlaylist)
    }

    pub fn toggle_play(&self) -> Result<()> {
        self.send(PlayerCommand::TogglePlay)
    }

    pub fn play_previous(&self) -> Result<()> {
        self.send(PlayerCommand::Previous)
    }

    pub fn play_next(&self) -> Result<()> {
        self.send(PlayerCommand::Next)
    }

    pub fn play_track(&self, index: usize) -> Result<()> {
        self.send(PlayerCommand::PlayTrack(index))
    }

    pub fn seek(&self, fraction: f64) -> Result<()> {
        self.send(PlayerCommand::Seek(fraction))
    }

    pub fn set_volume(&self, level: u8) -> Result<()> {
        self.send(PlayerCommand::SetVolume(level))
    }

    /// Report an output event for the resource bound as `binding`
    pub fn output_event(&self, binding: u64, event: OutputEvent) -> Result<()> {
        self.send(PlayerCommand::Output { binding, event })
    }

    /// Ask the loop to stop once in-flight fetches have landed
    pub fn shutdown(&self) -> Result<()> {
        self.send(PlayerCommand::Shutdown)
    }
}

/// Event loop driving a [`PlaybackController`]
pub struct Player<O, U> {
    controller: PlaybackController<O, U>,
    source: Arc<dyn PlaylistSource>,
    fetcher: Arc<dyn TrackFetcher>,
    mailbox: Mailbox,
    in_flight: usize,
    closing: bool,
}

impl<O, U> Player<O, U>
where
    O: AudioOutput + 'static,
    U: PlaybackObserver + 'static,
{
    /// Create a player around an existing controller
    pub fn new(
        controller: PlaybackController<O, U>,
        source: Arc<dyn PlaylistSource>,
        fetcher: Arc<dyn TrackFetcher>,
        mailbox: Mailbox,
    ) -> Self {
        Self {
            controller,
            source,
            fetcher,
            mailbox,
            in_flight: 0,
            closing: false,
        }
    }

    /// Run the loop on a new task
    ///
    /// The task yields the controller back once the loop stops.
    pub fn spawn(self) -> JoinHandle<PlaybackController<O, U>> {
        tokio::spawn(self.run())
    }

    /// Process messages until shutdown (or until every handle is dropped)
    pub async fn run(mut self) -> PlaybackController<O, U> {
        info!("Player started");

        while !(self.closing && self.in_flight == 0) {
            let Some(message) = self.mailbox.rx.recv().await else {
                break;
            };
            self.handle(message);
        }

        info!("Player stopped");
        self.controller
    }

    fn handle(&mut self, message: Message) {
        match message {
            Message::Command(command) => self.handle_command(command),
            Message::PlaylistLoaded(playlist) => {
                self.in_flight -= 1;
                self.controller.set_playlist(playlist);
            }
            Message::FetchCompleted(ticket, result) => {
                self.in_flight -= 1;
                self.controller.complete_fetch(ticket, result);
            }
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        if self.closing {
            debug!(?command, "Ignoring command during shutdown");
            return;
        }

        let ticket = match command {
            PlayerCommand::LoadPlaylist => {
                self.load_playlist();
                None
            }
            PlayerCommand::TogglePlay => self.controller.toggle_play(),
            PlayerCommand::Previous => self.controller.play_previous(),
            PlayerCommand::Next => self.controller.play_next(),
            PlayerCommand::PlayTrack(index) => self.controller.play_track(index),
            PlayerCommand::Seek(fraction) => {
                self.controller.seek(fraction);
                None
            }
            PlayerCommand::SetVolume(level) => {
                self.controller.set_volume(level);
                None
            }
            PlayerCommand::Output { binding, event } => self.handle_output(binding, event),
            PlayerCommand::Shutdown => {
                info!(in_flight = self.in_flight, "Shutdown requested");
                self.closing = true;
                None
            }
        };

        if let Some(ticket) = ticket {
            self.fetch(ticket);
        }
    }

    fn handle_output(&mut self, binding: u64, event: OutputEvent) -> Option<FetchTicket> {
        if binding != self.controller.binding() {
            debug!(
                binding,
                current = self.controller.binding(),
                ?event,
                "Dropping output event for replaced resource"
            );
            return None;
        }

        match event {
            OutputEvent::Position {
                current_time,
                duration,
            } => {
                self.controller.on_position_update(current_time, duration);
                None
            }
            OutputEvent::Duration(duration) => {
                self.controller.on_duration_changed(duration);
                None
            }
            OutputEvent::Ended => self.controller.on_track_ended(),
        }
    }

    fn load_playlist(&mut self) {
        let Some(tx) = self.mailbox.tx.upgrade() else {
            warn!("No handles left, skipping playlist load");
            return;
        };

        let source = Arc::clone(&self.source);
        self.in_flight += 1;
        tokio::spawn(async move {
            let playlist = source.load().await;
            tx.send(Message::PlaylistLoaded(playlist)).ok();
        });
    }

    fn fetch(&mut self, ticket: FetchTicket) {
        let Some(tx) = self.mailbox.tx.upgrade() else {
            warn!(track_id = %ticket.track().id, "No handles left, skipping track fetch");
            return;
        };

        let fetcher = Arc::clone(&self.fetcher);
        self.in_flight += 1;
        tokio::spawn(async move {
            let result = fetcher.fetch(ticket.track()).await;
            tx.send(Message::FetchCompleted(ticket, result)).ok();
        });
    }
}
