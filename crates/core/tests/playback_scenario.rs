//! End-to-end playback over real PNG files on disk.

use std::path::Path;

use frameplay_core::{
    render::BLACK, Anchor, AudioEngine, Canvas, FileLoader, MutedAudio, PlaybackController,
    PlaybackState, PlayerConfig,
};
use image::{Rgba, RgbaImage};

const COLORS: [Rgba<u8>; 3] = [
    Rgba([255, 0, 0, 255]),
    Rgba([0, 255, 0, 255]),
    Rgba([0, 0, 255, 255]),
];

fn write_fixture(dir: &Path) -> PlayerConfig {
    for (index, color) in COLORS.iter().enumerate() {
        RgbaImage::from_pixel(480, 360, *color)
            .save(dir.join(format!("frame{index}.png")))
            .unwrap();
    }
    let audio = dir.join("music.mp3");
    std::fs::write(&audio, b"not really audio").unwrap();

    let mut config = PlayerConfig::default();
    config.sequence.pattern = format!("{}/frame{{}}.png", dir.display());
    config.sequence.frame_count = COLORS.len();
    config.audio.path = audio;
    config
}

#[test]
fn renders_rescaled_frames_then_the_end_message() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path());
    let mut player =
        PlaybackController::from_config(&config, FileLoader, MutedAudio::new()).unwrap();
    let mut canvas = Canvas::new(960, 720);

    for (index, color) in COLORS.iter().enumerate() {
        canvas.clear(BLACK);
        player.tick(&mut canvas).unwrap();

        assert!(player.audio().is_playing());
        assert_eq!(canvas.image().get_pixel(0, 0), color);
        assert_eq!(canvas.image().get_pixel(959, 719), color);
        assert_eq!(canvas.labels().len(), 1);
        assert_eq!(canvas.labels()[0].text, format!("Frame {index}"));
        assert_eq!(canvas.labels()[0].anchor, Anchor::TopLeft(10, 10));
    }

    for _ in 0..3 {
        canvas.clear(BLACK);
        player.tick(&mut canvas).unwrap();

        assert_eq!(player.state(), PlaybackState::Ended);
        assert!(!player.audio().is_playing());
        assert!(canvas.image().pixels().all(|p| *p == BLACK));
        assert_eq!(canvas.labels().len(), 1);
        assert_eq!(canvas.labels()[0].text, "Pitanja?");
        assert_eq!(canvas.labels()[0].anchor, Anchor::Center);
    }
}

#[test]
fn missing_frames_abort_construction() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = write_fixture(dir.path());
    config.sequence.pattern = format!("{}/absent{{}}.png", dir.path().display());

    let err = PlaybackController::from_config(&config, FileLoader, MutedAudio::new()).unwrap_err();
    assert!(err.is_decode());
}

#[test]
fn missing_audio_aborts_construction() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = write_fixture(dir.path());
    config.audio.path = dir.path().join("silence.ogg");

    let err = PlaybackController::from_config(&config, FileLoader, MutedAudio::new()).unwrap_err();
    assert!(format!("{err}").contains("silence.ogg"));
}
