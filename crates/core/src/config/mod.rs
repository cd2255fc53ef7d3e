use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{FrameplayError, Result, ScaleFilter, TargetRect};

/// Top-level configuration structure for the player.
///
/// Every field has a default, so a configuration file only needs to name the
/// values it overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub sequence: SequenceConfig,
    pub audio: AudioConfig,
    pub display: DisplayConfig,
    pub overlay: OverlayConfig,
}

impl PlayerConfig {
    /// Parses a configuration from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.target_rect().validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            FrameplayError::Config(format!("cannot read `{}`: {err}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// The display rectangle every frame is scaled to.
    pub fn target_rect(&self) -> TargetRect {
        TargetRect::new(self.display.width, self.display.height)
    }
}

/// Where the frames live and how many of them there are.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    pub pattern: String,
    pub frame_count: usize,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            pattern: "assets/frame{}.png".to_string(),
            frame_count: 6571,
        }
    }
}

/// Configuration specific to the audio track.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub path: PathBuf,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("assets/music.mp3"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub filter: ScaleFilter,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 720,
            fps: 31,
            filter: ScaleFilter::default(),
        }
    }
}

/// Text drawn on top of the frames and in the terminal state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub show_frame_label: bool,
    pub end_message: String,
    pub label_size: f32,
    pub end_size: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            show_frame_label: true,
            end_message: "Pitanja?".to_string(),
            label_size: 36.0,
            end_size: 144.0,
        }
    }
}
