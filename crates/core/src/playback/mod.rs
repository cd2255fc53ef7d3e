//! Playback controller: the tick-driven state machine that presents one frame
//! per tick, starts the audio track once, and switches to a terminal message
//! when the sequence runs out.

use std::path::Path;

use image::Rgba;

use crate::{
    render::{RED, WHITE},
    Anchor, AudioEngine, Frame, FrameResolver, FrameSequencer, FrameplayError, ImageLoader,
    Label, OverlayConfig, PlayerConfig, Result, SequenceDescriptor, Step, Surface,
};

/// Observable playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    /// Terminal. Entered once, when the sequence is exhausted.
    Ended,
}

/// Text drawn by the controller.
#[derive(Debug, Clone)]
pub struct OverlayStyle {
    pub show_frame_label: bool,
    pub label_position: (i64, i64),
    pub label_size: f32,
    pub label_color: Rgba<u8>,
    pub end_message: String,
    pub end_size: f32,
    pub end_color: Rgba<u8>,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self::from(&OverlayConfig::default())
    }
}

impl From<&OverlayConfig> for OverlayStyle {
    fn from(config: &OverlayConfig) -> Self {
        Self {
            show_frame_label: config.show_frame_label,
            label_position: (10, 10),
            label_size: config.label_size,
            label_color: RED,
            end_message: config.end_message.clone(),
            end_size: config.end_size,
            end_color: WHITE,
        }
    }
}

enum Phase {
    /// The frame the next tick draws.
    Playing(Frame),
    /// The last frame has been drawn and the sequencer reported the end; the
    /// next tick ends playback.
    Exhausted,
    Ended,
}

/// Drives a [`FrameSequencer`] and an [`AudioEngine`] from host ticks.
///
/// Tick `k` (1-based) draws frame `k - 1` and then pulls its successor. The
/// tick after the last frame has been drawn stops the audio and enters
/// [`PlaybackState::Ended`]; from then on every tick only draws the end
/// message.
pub struct PlaybackController<A, L> {
    sequencer: FrameSequencer<L>,
    audio: A,
    audio_started: bool,
    phase: Phase,
    style: OverlayStyle,
    ticks: u64,
    last_presented: Option<usize>,
}

impl<A: AudioEngine, L: ImageLoader> PlaybackController<A, L> {
    /// Loads the audio track and resolves the first frame.
    ///
    /// Fails if the track cannot be loaded or the first frame cannot be
    /// decoded; no partially constructed controller is ever returned.
    pub fn new(
        mut sequencer: FrameSequencer<L>,
        audio_path: &Path,
        mut audio: A,
        style: OverlayStyle,
    ) -> Result<Self> {
        audio.load(audio_path)?;

        let current = match sequencer.next_frame()? {
            Step::Frame(frame) => frame,
            Step::End => return Err(FrameplayError::EmptySequence),
        };

        tracing::info!(
            frames = sequencer.descriptor().frame_count(),
            audio = %audio_path.display(),
            "playback ready"
        );

        Ok(Self {
            sequencer,
            audio,
            audio_started: false,
            phase: Phase::Playing(current),
            style,
            ticks: 0,
            last_presented: None,
        })
    }

    /// Builds the sequencer and overlay from a [`PlayerConfig`].
    pub fn from_config(config: &PlayerConfig, loader: L, audio: A) -> Result<Self> {
        let descriptor = SequenceDescriptor::from_template(
            &config.sequence.pattern,
            config.sequence.frame_count,
        )?;
        let resolver = FrameResolver::with_filter(loader, config.display.filter);
        let sequencer = FrameSequencer::new(descriptor, resolver, config.target_rect());

        Self::new(
            sequencer,
            &config.audio.path,
            audio,
            OverlayStyle::from(&config.overlay),
        )
    }

    /// Advances playback by one host tick and draws onto `surface`.
    ///
    /// Exhaustion is handled here and never surfaces as an error. Decode
    /// failures of later frames are returned to the host.
    pub fn tick(&mut self, surface: &mut dyn Surface) -> Result<()> {
        self.ticks += 1;
        self.last_presented = None;

        match self.phase {
            Phase::Playing(_) => {}
            Phase::Exhausted => {
                self.audio.stop();
                self.phase = Phase::Ended;
                tracing::info!(ticks = self.ticks, "sequence exhausted, playback ended");
                draw_end_message(&self.style, surface);
                return Ok(());
            }
            Phase::Ended => {
                self.audio.stop();
                draw_end_message(&self.style, surface);
                return Ok(());
            }
        }

        if let Phase::Playing(current) = &self.phase {
            if !self.audio.is_playing() && !self.audio_started {
                self.audio.play()?;
                self.audio_started = true;
                tracing::debug!(tick = self.ticks, "audio started");
            }

            surface.blit(current.image(), current.rect());
            if self.style.show_frame_label {
                let (x, y) = self.style.label_position;
                surface.draw_label(&Label {
                    text: format!("Frame {}", current.index()),
                    anchor: Anchor::TopLeft(x, y),
                    size: self.style.label_size,
                    color: self.style.label_color,
                });
            }
            self.last_presented = Some(current.index());
            tracing::trace!(frame = current.index(), "frame presented");
        }

        self.phase = match self.sequencer.next_frame()? {
            Step::Frame(frame) => Phase::Playing(frame),
            Step::End => Phase::Exhausted,
        };
        Ok(())
    }

    pub fn state(&self) -> PlaybackState {
        match self.phase {
            Phase::Playing(_) | Phase::Exhausted => PlaybackState::Playing,
            Phase::Ended => PlaybackState::Ended,
        }
    }

    pub fn is_ended(&self) -> bool {
        self.state() == PlaybackState::Ended
    }

    /// The frame the next tick will draw. `None` once the sequence has run
    /// out.
    pub fn current_frame(&self) -> Option<&Frame> {
        match &self.phase {
            Phase::Playing(current) => Some(current),
            Phase::Exhausted | Phase::Ended => None,
        }
    }

    /// Index of the frame drawn by the latest tick, if it drew one.
    pub fn last_presented(&self) -> Option<usize> {
        self.last_presented
    }

    /// Number of ticks processed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn audio_started(&self) -> bool {
        self.audio_started
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn sequencer(&self) -> &FrameSequencer<L> {
        &self.sequencer
    }
}

fn draw_end_message(style: &OverlayStyle, surface: &mut dyn Surface) {
    surface.draw_label(&Label {
        text: style.end_message.clone(),
        anchor: Anchor::Center,
        size: style.end_size,
        color: style.end_color,
    });
}

impl<A, L> std::fmt::Debug for PlaybackController<A, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (state, frame) = match &self.phase {
            Phase::Playing(current) => ("Playing", Some(current.index())),
            Phase::Exhausted => ("Exhausted", None),
            Phase::Ended => ("Ended", None),
        };
        f.debug_struct("PlaybackController")
            .field("state", &state)
            .field("frame", &frame)
            .field("audio_started", &self.audio_started)
            .field("ticks", &self.ticks)
            .finish()
    }
}
