use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::{AudioEngine, FrameplayError, Result};

/// Audio engine backed by the default `rodio` output device.
///
/// The whole track is kept in memory so each `play` can start a fresh sink
/// from the beginning.
pub struct RodioAudio {
    /// Must stay alive for audio to be heard.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
    track: Option<Arc<[u8]>>,
}

impl RodioAudio {
    /// Opens the default output device.
    pub fn new() -> Result<Self> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|err| FrameplayError::AudioDevice(err.to_string()))?;

        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
            track: None,
        })
    }

    fn decoder(track: &Arc<[u8]>) -> std::result::Result<Decoder<Cursor<Vec<u8>>>, String> {
        Decoder::new(Cursor::new(track.to_vec())).map_err(|err| err.to_string())
    }
}

impl AudioEngine for RodioAudio {
    fn load(&mut self, path: &Path) -> Result<()> {
        let load_error = |reason: String| FrameplayError::AudioLoad {
            path: path.to_path_buf(),
            reason,
        };

        let data: Arc<[u8]> = std::fs::read(path)
            .map_err(|err| load_error(err.to_string()))?
            .into();
        // Decode once up front so unsupported tracks fail at load time.
        Self::decoder(&data).map_err(load_error)?;

        self.stop();
        self.track = Some(data);
        tracing::debug!(path = %path.display(), "audio track loaded");
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        if self.is_playing() {
            return Ok(());
        }

        let track = self
            .track
            .as_ref()
            .ok_or_else(|| FrameplayError::msg("no audio track loaded"))?;
        let source = Self::decoder(track).map_err(FrameplayError::AudioDevice)?;
        let sink = Sink::try_new(&self.handle)
            .map_err(|err| FrameplayError::AudioDevice(err.to_string()))?;
        sink.append(source);
        sink.play();

        self.sink = Some(sink);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn is_playing(&self) -> bool {
        self.sink
            .as_ref()
            .map(|sink| !sink.empty() && !sink.is_paused())
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for RodioAudio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioAudio")
            .field("loaded", &self.track.is_some())
            .field("playing", &self.is_playing())
            .finish()
    }
}
