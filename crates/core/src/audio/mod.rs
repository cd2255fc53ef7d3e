use std::path::{Path, PathBuf};

use crate::{FrameplayError, Result};

#[cfg(feature = "rodio")]
mod rodio_backend;

#[cfg(feature = "rodio")]
pub use rodio_backend::RodioAudio;

/// Audio output handed to the playback controller, already initialised by
/// the host.
pub trait AudioEngine {
    /// Prepares the track at `path` without starting it.
    fn load(&mut self, path: &Path) -> Result<()>;

    /// Starts playback from the beginning of the loaded track. Calling it
    /// while already playing must not corrupt the engine's state.
    fn play(&mut self) -> Result<()>;

    /// Stops playback. Safe to call when nothing is playing.
    fn stop(&mut self);

    fn is_playing(&self) -> bool;
}

/// Audio engine that validates the track but never produces sound.
///
/// Offline export and tests use it where no output device exists.
#[derive(Debug, Default)]
pub struct MutedAudio {
    track: Option<PathBuf>,
    playing: bool,
}

impl MutedAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&self) -> Option<&Path> {
        self.track.as_deref()
    }
}

impl AudioEngine for MutedAudio {
    fn load(&mut self, path: &Path) -> Result<()> {
        let load_error = |err: std::io::Error| FrameplayError::AudioLoad {
            path: path.to_path_buf(),
            reason: err.to_string(),
        };

        // Opening proves the track is readable, not just present.
        let file = std::fs::File::open(path).map_err(load_error)?;
        if !file.metadata().map_err(load_error)?.is_file() {
            return Err(FrameplayError::AudioLoad {
                path: path.to_path_buf(),
                reason: "not a file".to_string(),
            });
        }

        self.track = Some(path.to_path_buf());
        self.playing = false;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        if self.track.is_none() {
            return Err(FrameplayError::msg("no audio track loaded"));
        }
        self.playing = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}
