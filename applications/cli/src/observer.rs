//! Terminal rendering of playback events

use cadence_core::Playlist;
use cadence_playback::{PlaybackError, PlaybackObserver};
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Last published playlist and active index, shared with the prompt
#[derive(Debug, Default)]
pub struct View {
    pub playlist: Playlist,
    pub current: Option<usize>,
}

pub type SharedView = Arc<Mutex<View>>;

/// Observer printing state changes as plain text lines
pub struct TerminalObserver<W> {
    out: W,
    view: SharedView,
    last_elapsed: String,
}

impl<W: Write + Send> TerminalObserver<W> {
    pub fn new(out: W, view: SharedView) -> Self {
        Self {
            out,
            view,
            last_elapsed: String::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Render the playlist, marking the active entry
pub fn write_playlist(out: &mut impl Write, view: &View) -> std::io::Result<()> {
    if view.playlist.is_empty() {
        return writeln!(out, "(playlist is empty)");
    }
    for (index, track) in view.playlist.iter().enumerate() {
        let marker = if view.current == Some(index) { '>' } else { ' ' };
        writeln!(out, "{} {:>3}. {}", marker, index + 1, track.display_text())?;
    }
    Ok(())
}

// Output failures are ignored; stdout going away must not stop playback.
impl<W: Write + Send> PlaybackObserver for TerminalObserver<W> {
    fn on_playlist_changed(&mut self, playlist: &Playlist) {
        if let Ok(mut view) = self.view.lock() {
            view.playlist = playlist.clone();
            // Same clamping as the controller: out of range falls back to 0
            view.current = if playlist.is_empty() {
                None
            } else {
                Some(view.current.filter(|&i| i < playlist.len()).unwrap_or(0))
            };
            writeln!(self.out, "Playlist: {} tracks", playlist.len()).ok();
            write_playlist(&mut self.out, &view).ok();
        }
    }

    fn on_now_playing_changed(&mut self, text: &str, index: usize) {
        if let Ok(mut view) = self.view.lock() {
            view.current = Some(index);
        }
        self.last_elapsed.clear();
        writeln!(self.out, "Now playing: {}", text).ok();
    }

    fn on_progress_changed(&mut self, fraction: f64, elapsed: &str, total: &str) {
        // Ticks arrive several times a second; print once per displayed second
        if elapsed == self.last_elapsed {
            return;
        }
        self.last_elapsed = elapsed.to_string();
        writeln!(
            self.out,
            "  {} / {} ({:.0}%)",
            elapsed,
            total,
            fraction * 100.0
        )
        .ok();
    }

    fn on_play_state_changed(&mut self, is_playing: bool) {
        let label = if is_playing { "Playing" } else { "Paused" };
        writeln!(self.out, "[{}]", label).ok();
    }

    fn on_volume_changed(&mut self, level: u8) {
        writeln!(self.out, "Volume: {}%", level).ok();
    }

    fn on_track_failed(&mut self, index: usize, error: &PlaybackError) {
        writeln!(self.out, "Could not play track {}: {}", index + 1, error).ok();
    }
}
