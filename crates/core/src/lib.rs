//! Core library for Frameplay.
//!
//! Plays a pre-rendered image sequence in step with an audio track. The host
//! owns the window, the fixed-rate loop and the audio device; this crate
//! supplies the pieces it drives once per tick:
//!
//! - [`FrameResolver`] decodes one source image and fits it to the display
//!   rectangle.
//! - [`FrameSequencer`] walks the sequence forward, one frame at a time.
//! - [`PlaybackController`] starts the audio, presents frames and switches to
//!   the end message once the sequence is exhausted.

pub mod assets;
pub mod audio;
pub mod config;
pub mod error;
pub mod frame;
pub mod playback;
pub mod render;
pub mod sequence;
pub mod timeline;

pub use assets::{FileLoader, FramePattern, ImageLoader, SequenceDescriptor};
#[cfg(feature = "rodio")]
pub use audio::RodioAudio;
pub use audio::{AudioEngine, MutedAudio};
pub use config::{AudioConfig, DisplayConfig, OverlayConfig, PlayerConfig, SequenceConfig};
pub use error::{FrameplayError, Result};
pub use frame::{Frame, FrameResolver, ScaleFilter, TargetRect};
pub use playback::{OverlayStyle, PlaybackController, PlaybackState};
pub use render::{Anchor, Canvas, Label, Surface};
pub use sequence::{FrameSequencer, Step};
pub use timeline::{Pacer, PlaybackClock};
