//! Controller tests against a mocked output primitive
//!
//! Verifies the exact calls the controller makes on the output: volume
//! levels, a single bind per applied fetch, and pause/resume pairing.

use cadence_core::{AudioOutput, AudioResource, FetchError, Playlist, Track};
use cadence_playback::{PlaybackConfig, PlaybackController, PlaybackEvent, PlayerState};
use mockall::{mock, predicate::eq, Sequence};
use std::time::Duration;

mock! {
    pub Output {}

    impl AudioOutput for Output {
        fn bind(&mut self, resource: AudioResource);
        fn release(&mut self);
        fn play(&mut self);
        fn pause(&mut self);
        fn seek(&mut self, position: Duration);
        fn set_volume(&mut self, level: f32);
    }
}

fn two_tracks() -> Playlist {
    Playlist::new(vec![
        Track::new("a", "First", "Alpha"),
        Track::new("b", "Second", "Beta"),
    ])
}

fn resource(id: &str) -> AudioResource {
    AudioResource::from_bytes(id.into(), id.as_bytes(), None).unwrap()
}

#[test]
fn volume_levels_reach_output_exactly() {
    let mut output = MockOutput::new();
    let mut seq = Sequence::new();

    for level in [1.0f32, 0.5, 0.0, 1.0] {
        output
            .expect_set_volume()
            .with(eq(level))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
    }

    let mut controller =
        PlaybackController::new(output, Vec::<PlaybackEvent>::new(), PlaybackConfig::default());
    controller.set_volume(50);
    controller.set_volume(0);
    controller.set_volume(100);

    assert_eq!(
        controller.observer().last(),
        Some(&PlaybackEvent::VolumeChanged { level: 100 })
    );
}

#[test]
fn stale_fetch_never_reaches_output() {
    let mut output = MockOutput::new();
    output.expect_set_volume().return_const(());
    output
        .expect_bind()
        .withf(|r: &AudioResource| r.track_id().as_str() == "b")
        .times(1)
        .return_const(());
    output.expect_play().times(1).return_const(());
    output.expect_release().never();

    let mut controller =
        PlaybackController::new(output, Vec::<PlaybackEvent>::new(), PlaybackConfig::default());
    controller.set_playlist(two_tracks());

    let first = controller.play_track(0).unwrap();
    let second = controller.play_track(1).unwrap();

    assert!(controller.complete_fetch(second, Ok(resource("b"))));
    assert!(!controller.complete_fetch(first, Ok(resource("a"))));

    assert_eq!(controller.now_playing().as_deref(), Some("Second - Beta"));
    assert!(controller.is_playing());
}

#[test]
fn toggle_alternates_pause_and_play() {
    let mut output = MockOutput::new();
    let mut seq = Sequence::new();
    output.expect_set_volume().return_const(());
    output.expect_bind().times(1).return_const(());
    output
        .expect_play()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    output
        .expect_pause()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    output
        .expect_play()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());

    let mut controller =
        PlaybackController::new(output, Vec::<PlaybackEvent>::new(), PlaybackConfig::default());
    controller.set_playlist(two_tracks());

    let ticket = controller.toggle_play().unwrap();
    controller.complete_fetch(ticket, Ok(resource("a")));
    assert!(controller.toggle_play().is_none());
    assert_eq!(controller.state(), PlayerState::Paused);
    assert!(controller.toggle_play().is_none());
    assert_eq!(controller.state(), PlayerState::Playing);

    let play_states: Vec<bool> = controller
        .observer()
        .iter()
        .filter_map(|e| match e {
            PlaybackEvent::PlayStateChanged { is_playing } => Some(*is_playing),
            _ => None,
        })
        .collect();
    assert_eq!(play_states, vec![true, false, true]);
}

#[test]
fn fetch_failure_releases_output_without_playing() {
    let mut output = MockOutput::new();
    output.expect_set_volume().return_const(());
    output.expect_bind().never();
    output.expect_play().never();
    output.expect_release().times(1).return_const(());

    let mut controller =
        PlaybackController::new(output, Vec::<PlaybackEvent>::new(), PlaybackConfig::default());
    controller.set_playlist(two_tracks());

    let ticket = controller.play_track(1).unwrap();
    controller.complete_fetch(ticket, Err(FetchError::network("connection refused")));

    assert_eq!(controller.state(), PlayerState::Error);
    assert!(!controller.is_playing());
}

#[test]
fn seek_targets_fraction_of_duration() {
    let mut output = MockOutput::new();
    output.expect_set_volume().return_const(());
    output.expect_bind().return_const(());
    output.expect_play().return_const(());
    output
        .expect_seek()
        .with(eq(Duration::from_secs(90)))
        .times(1)
        .return_const(());

    let mut controller =
        PlaybackController::new(output, Vec::<PlaybackEvent>::new(), PlaybackConfig::default());
    controller.set_playlist(two_tracks());
    let ticket = controller.play_track(0).unwrap();
    controller.complete_fetch(ticket, Ok(resource("a")));

    controller.on_position_update(10.0, Some(120.0));
    controller.seek(0.75);
}

#[test]
fn toggle_reaches_output_while_next_track_loads() {
    let mut output = MockOutput::new();
    output.expect_set_volume().return_const(());
    output.expect_bind().times(1).return_const(());
    output.expect_play().times(1).return_const(());
    output.expect_pause().times(1).return_const(());

    let mut controller =
        PlaybackController::new(output, Vec::<PlaybackEvent>::new(), PlaybackConfig::default());
    controller.set_playlist(two_tracks());

    let ticket = controller.play_track(0).unwrap();
    controller.complete_fetch(ticket, Ok(resource("a")));
    let _pending = controller.play_track(1).unwrap();

    assert!(controller.toggle_play().is_none());
    assert!(!controller.is_playing());
    assert_eq!(controller.state(), PlayerState::Loading);
}
