//! Headless audio output
//!
//! Keeps the bound resource and runs a simulated playback clock instead of
//! decoding. Track length is estimated from the file size at a nominal
//! bitrate. A ticker task reports duration, position and end-of-track to
//! the player through its handle, the way a real device callback would.
//! Each report carries the binding it was produced under, so the player can
//! drop one that was already in flight when the track changed.

use cadence_core::{AudioOutput, AudioResource};
use cadence_playback::{OutputEvent, PlayerHandle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

/// Estimated seconds of audio in `len` bytes at `bitrate_kbps`
fn estimate_duration(len: u64, bitrate_kbps: u32) -> Option<f64> {
    if len == 0 || bitrate_kbps == 0 {
        return None;
    }
    Some(len as f64 * 8.0 / (f64::from(bitrate_kbps) * 1000.0))
}

#[derive(Debug, Default)]
struct Clock {
    resource: Option<AudioResource>,
    position: f64,
    duration: Option<f64>,
    duration_reported: bool,
    playing: bool,
    volume: f32,
    // Bumped on every load and unload, in step with the controller
    binding: u64,
}

impl Clock {
    fn load(&mut self, resource: AudioResource, duration: Option<f64>) {
        self.resource = Some(resource);
        self.position = 0.0;
        self.duration = duration;
        self.duration_reported = false;
        self.playing = false;
        self.binding += 1;
    }

    fn unload(&mut self) {
        self.resource = None;
        self.position = 0.0;
        self.duration = None;
        self.playing = false;
        self.binding += 1;
    }

    fn advance(&mut self, elapsed: f64) -> Option<OutputEvent> {
        self.resource.as_ref()?;

        if !self.duration_reported {
            if let Some(duration) = self.duration {
                self.duration_reported = true;
                return Some(OutputEvent::Duration(duration));
            }
        }

        if !self.playing {
            return None;
        }

        self.position += elapsed;
        match self.duration {
            Some(duration) if self.position >= duration => {
                self.position = duration;
                self.playing = false;
                Some(OutputEvent::Ended)
            }
            duration => Some(OutputEvent::Position {
                current_time: self.position,
                duration,
            }),
        }
    }

    fn seek(&mut self, position: f64) {
        self.position = match self.duration {
            Some(duration) => position.min(duration),
            None => position,
        };
    }
}

/// [`AudioOutput`] with a simulated clock and no audio device
pub struct HeadlessOutput {
    clock: Arc<Mutex<Clock>>,
    bitrate_kbps: u32,
    ticker: JoinHandle<()>,
}

impl HeadlessOutput {
    /// Create the output and start its ticker
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(handle: PlayerHandle, bitrate_kbps: u32, tick: Duration) -> Self {
        let clock = Arc::new(Mutex::new(Clock {
            volume: 1.0,
            ..Clock::default()
        }));
        let ticker = tokio::spawn(run_ticker(Arc::clone(&clock), handle, tick));

        Self {
            clock,
            bitrate_kbps,
            ticker,
        }
    }

    fn with_clock(&self, f: impl FnOnce(&mut Clock)) {
        if let Ok(mut clock) = self.clock.lock() {
            f(&mut clock);
        }
    }
}

impl Drop for HeadlessOutput {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}

async fn run_ticker(clock: Arc<Mutex<Clock>>, handle: PlayerHandle, tick: Duration) {
    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let step = tick.as_secs_f64();

    loop {
        interval.tick().await;

        let (binding, event) = match clock.lock() {
            Ok(mut clock) => match clock.advance(step) {
                Some(event) => (clock.binding, event),
                None => continue,
            },
            Err(_) => break,
        };

        match event {
            OutputEvent::Ended => debug!(binding, "Simulated track ended"),
            _ => trace!(binding, ?event, "Clock tick"),
        }

        if handle.output_event(binding, event).is_err() {
            debug!("Player stopped, ending output clock");
            break;
        }
    }
}

impl AudioOutput for HeadlessOutput {
    fn bind(&mut self, resource: AudioResource) {
        let duration = estimate_duration(resource.len(), self.bitrate_kbps);
        debug!(
            track_id = %resource.track_id(),
            bytes = resource.len(),
            path = %resource.path().display(),
            duration = ?duration,
            "Resource bound"
        );
        self.with_clock(|clock| clock.load(resource, duration));
    }

    fn release(&mut self) {
        self.with_clock(Clock::unload);
    }

    fn play(&mut self) {
        self.with_clock(|clock| clock.playing = clock.resource.is_some());
    }

    fn pause(&mut self) {
        self.with_clock(|clock| clock.playing = false);
    }

    fn seek(&mut self, position: Duration) {
        self.with_clock(|clock| clock.seek(position.as_secs_f64()));
    }

    fn set_volume(&mut self, level: f32) {
        self.with_clock(|clock| clock.volume = level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(len: usize) -> Clock {
        let resource = AudioResource::from_bytes("1".into(), vec![0u8; len], None).unwrap();
        let mut clock = Clock::default();
        clock.load(resource, estimate_duration(len as u64, 128));
        clock
    }

    #[test]
    fn duration_from_size_and_bitrate() {
        // 128 kbps = 16000 bytes per second
        assert_eq!(estimate_duration(160_000, 128), Some(10.0));
        assert_eq!(estimate_duration(0, 128), None);
        assert_eq!(estimate_duration(1000, 0), None);
    }

    #[test]
    fn idle_clock_is_silent() {
        let mut clock = Clock::default();
        assert_eq!(clock.advance(0.5), None);
    }

    #[test]
    fn duration_reported_before_position() {
        let mut clock = loaded(32_000);
        clock.playing = true;

        assert_eq!(clock.advance(0.5), Some(OutputEvent::Duration(2.0)));
        assert_eq!(
            clock.advance(0.5),
            Some(OutputEvent::Position {
                current_time: 0.5,
                duration: Some(2.0)
            })
        );
    }

    #[test]
    fn paused_clock_holds_position() {
        let mut clock = loaded(32_000);
        clock.advance(0.5);
        assert_eq!(clock.advance(0.5), None);
        assert_eq!(clock.position, 0.0);
    }

    #[test]
    fn reaching_duration_ends_once() {
        let mut clock = loaded(16_000);
        clock.playing = true;
        clock.advance(0.5);

        assert!(matches!(
            clock.advance(0.5),
            Some(OutputEvent::Position { .. })
        ));
        assert_eq!(clock.advance(0.5), Some(OutputEvent::Ended));
        assert_eq!(clock.position, 1.0);
        assert_eq!(clock.advance(0.5), None);
    }

    #[test]
    fn seek_clamps_to_duration() {
        let mut clock = loaded(32_000);
        clock.seek(10.0);
        assert_eq!(clock.position, 2.0);
        clock.seek(1.5);
        assert_eq!(clock.position, 1.5);
    }

    #[test]
    fn binding_counts_loads_and_unloads() {
        let mut clock = loaded(32_000);
        assert_eq!(clock.binding, 1);

        clock.unload();
        assert_eq!(clock.binding, 2);
        assert_eq!(clock.advance(0.5), None);

        let resource = AudioResource::from_bytes("2".into(), vec![0u8; 16_000], None).unwrap();
        clock.load(resource, Some(1.0));
        assert_eq!(clock.binding, 3);
        assert_eq!(clock.advance(0.5), Some(OutputEvent::Duration(1.0)));
    }
}
