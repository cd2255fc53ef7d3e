use std::path::PathBuf;

/// Result alias that carries the custom [`FrameplayError`] type.
pub type Result<T> = std::result::Result<T, FrameplayError>;

/// Common error type for the core crate.
///
/// Reaching the end of a frame sequence is not represented here: the
/// sequencer reports it through [`crate::Step::End`].
#[derive(Debug, thiserror::Error)]
pub enum FrameplayError {
    /// A required frame image could not be read or decoded. Fatal: there is
    /// no degraded rendering for a missing frame.
    #[error("failed to decode frame {index} from `{}`", .path.display())]
    Decode {
        index: usize,
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// The audio track could not be loaded.
    #[error("failed to load audio `{}`: {reason}", .path.display())]
    AudioLoad { path: PathBuf, reason: String },
    /// No audio output could be opened.
    #[error("audio device error: {0}")]
    AudioDevice(String),
    /// A sequence must contain at least one frame.
    #[error("frame sequence is empty")]
    EmptySequence,
    /// The frame locator template is malformed.
    #[error("invalid frame pattern `{pattern}`: {reason}")]
    InvalidPattern {
        pattern: String,
        reason: &'static str,
    },
    /// The player configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl FrameplayError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    /// Whether this error was caused by a frame that failed to decode.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

impl From<&str> for FrameplayError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for FrameplayError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

impl From<serde_json::Error> for FrameplayError {
    fn from(value: serde_json::Error) -> Self {
        Self::Config(value.to_string())
    }
}
