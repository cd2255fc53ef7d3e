use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageResult};

use crate::{FrameplayError, Result};

/// Widest zero padding a placeholder may request.
const MAX_PAD_WIDTH: usize = 32;

/// A locator template producing one path per frame index.
///
/// The template carries exactly one placeholder: `{}`, `{index}`, or a
/// zero-padded form such as `{:04}` / `{index:04}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePattern {
    prefix: String,
    suffix: String,
    width: usize,
}

impl FramePattern {
    pub fn parse(template: &str) -> Result<Self> {
        let invalid = |reason| FrameplayError::InvalidPattern {
            pattern: template.to_string(),
            reason,
        };

        let open = template.find('{').ok_or_else(|| invalid("missing placeholder"))?;
        let close = template[open..]
            .find('}')
            .map(|offset| open + offset)
            .ok_or_else(|| invalid("unterminated placeholder"))?;

        let prefix = &template[..open];
        let suffix = &template[close + 1..];
        if prefix.contains('}') || suffix.contains('{') || suffix.contains('}') {
            return Err(invalid("more than one placeholder"));
        }

        let width = parse_placeholder(&template[open + 1..close])
            .ok_or_else(|| invalid("unsupported placeholder"))?;

        Ok(Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            width,
        })
    }

    /// Resolves the path of the frame at `index`.
    pub fn locate(&self, index: usize) -> PathBuf {
        PathBuf::from(format!(
            "{}{:0width$}{}",
            self.prefix,
            index,
            self.suffix,
            width = self.width
        ))
    }
}

/// Returns the zero-pad width for a placeholder body, or `None` if the body
/// is not recognised.
fn parse_placeholder(body: &str) -> Option<usize> {
    let spec = match body.split_once(':') {
        Some((name, spec)) if name.is_empty() || name == "index" => spec,
        Some(_) => return None,
        None if body.is_empty() || body == "index" => return Some(0),
        None => return None,
    };

    let digits = spec.strip_prefix('0')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits
        .parse()
        .ok()
        .filter(|width| *width <= MAX_PAD_WIDTH)
}

/// Describes a finite image sequence: how to find frame `i` and how many
/// frames exist.
#[derive(Debug, Clone)]
pub struct SequenceDescriptor {
    pattern: FramePattern,
    frame_count: usize,
}

impl SequenceDescriptor {
    pub fn new(pattern: FramePattern, frame_count: usize) -> Result<Self> {
        if frame_count == 0 {
            return Err(FrameplayError::EmptySequence);
        }
        Ok(Self {
            pattern,
            frame_count,
        })
    }

    /// Convenience constructor parsing the template in one go.
    pub fn from_template(template: &str, frame_count: usize) -> Result<Self> {
        Self::new(FramePattern::parse(template)?, frame_count)
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn locate(&self, index: usize) -> PathBuf {
        self.pattern.locate(index)
    }
}

/// Asset loading facility used to fetch source images.
pub trait ImageLoader {
    fn load(&self, path: &Path) -> ImageResult<DynamicImage>;
}

/// Loads images from the local filesystem, guessing the format from the
/// file contents and extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileLoader;

impl ImageLoader for FileLoader {
    fn load(&self, path: &Path) -> ImageResult<DynamicImage> {
        image::open(path)
    }
}
