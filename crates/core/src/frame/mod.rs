use std::path::Path;

use image::{imageops, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::{FrameplayError, ImageLoader, Result};

/// Fixed display rectangle, in pixels, with a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl TargetRect {
    /// A rectangle of the given size anchored at the origin.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Frames can only be fitted to a rectangle with a non-zero area.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(FrameplayError::Config(format!(
                "display size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for TargetRect {
    fn default() -> Self {
        Self::new(960, 720)
    }
}

/// Interpolating kernels used when a source image must be rescaled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleFilter {
    #[default]
    Bilinear,
    CatmullRom,
    Lanczos3,
}

impl From<ScaleFilter> for imageops::FilterType {
    fn from(filter: ScaleFilter) -> Self {
        match filter {
            ScaleFilter::Bilinear => imageops::FilterType::Triangle,
            ScaleFilter::CatmullRom => imageops::FilterType::CatmullRom,
            ScaleFilter::Lanczos3 => imageops::FilterType::Lanczos3,
        }
    }
}

/// One decoded, correctly sized image and its position in the sequence.
#[derive(Debug, Clone)]
pub struct Frame {
    index: usize,
    image: RgbaImage,
    rect: TargetRect,
    rescaled: bool,
}

impl Frame {
    pub fn index(&self) -> usize {
        self.index
    }

    /// The pixel buffer; its dimensions always equal [`Frame::rect`]'s.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn rect(&self) -> TargetRect {
        self.rect
    }

    /// Whether the source had to be resized to fit the target rectangle.
    pub fn was_rescaled(&self) -> bool {
        self.rescaled
    }
}

/// Decodes source images and fits them to the target rectangle.
#[derive(Debug, Clone)]
pub struct FrameResolver<L> {
    loader: L,
    filter: ScaleFilter,
}

impl<L: ImageLoader> FrameResolver<L> {
    pub fn new(loader: L) -> Self {
        Self::with_filter(loader, ScaleFilter::default())
    }

    pub fn with_filter(loader: L, filter: ScaleFilter) -> Self {
        Self { loader, filter }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Builds the frame at `index` from the image at `path`.
    pub fn build(&self, index: usize, path: &Path, rect: TargetRect) -> Result<Frame> {
        rect.validate()?;
        let decoded = self
            .loader
            .load(path)
            .map_err(|source| FrameplayError::Decode {
                index,
                path: path.to_path_buf(),
                source,
            })?;

        let image = decoded.into_rgba8();
        let rescaled = image.dimensions() != rect.size();
        let image = if rescaled {
            imageops::resize(&image, rect.width, rect.height, self.filter.into())
        } else {
            image
        };

        Ok(Frame {
            index,
            image,
            rect,
            rescaled,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use image::{DynamicImage, ImageError, ImageResult, Rgba};

    use super::*;

    struct SolidLoader {
        width: u32,
        height: u32,
    }

    impl ImageLoader for SolidLoader {
        fn load(&self, _path: &Path) -> ImageResult<DynamicImage> {
            Ok(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
                self.width,
                self.height,
                Rgba([200, 10, 10, 255]),
            )))
        }
    }

    struct BrokenLoader;

    impl ImageLoader for BrokenLoader {
        fn load(&self, _path: &Path) -> ImageResult<DynamicImage> {
            Err(ImageError::IoError(io::Error::new(
                io::ErrorKind::NotFound,
                "no such frame",
            )))
        }
    }

    #[test]
    fn rescales_mismatched_sources_to_the_target() {
        let resolver = FrameResolver::new(SolidLoader {
            width: 480,
            height: 360,
        });
        let frame = resolver
            .build(3, Path::new("frame3.png"), TargetRect::default())
            .unwrap();

        assert_eq!(frame.index(), 3);
        assert_eq!(frame.image().dimensions(), (960, 720));
        assert!(frame.was_rescaled());
        // Smooth scaling of a flat colour keeps the colour.
        assert_eq!(frame.image().get_pixel(500, 400), &Rgba([200, 10, 10, 255]));
    }

    #[test]
    fn leaves_matching_sources_untouched() {
        let resolver = FrameResolver::new(SolidLoader {
            width: 64,
            height: 48,
        });
        let frame = resolver
            .build(0, Path::new("frame0.png"), TargetRect::new(64, 48))
            .unwrap();

        assert_eq!(frame.image().dimensions(), (64, 48));
        assert!(!frame.was_rescaled());
    }

    #[test]
    fn upscales_and_downscales_non_proportional_sources() {
        let resolver = FrameResolver::with_filter(
            SolidLoader {
                width: 1920,
                height: 100,
            },
            ScaleFilter::Lanczos3,
        );
        let frame = resolver
            .build(1, Path::new("frame1.png"), TargetRect::new(320, 240))
            .unwrap();
        assert_eq!(frame.image().dimensions(), (320, 240));
    }

    #[test]
    fn rejects_empty_target_rects() {
        let resolver = FrameResolver::new(SolidLoader {
            width: 4,
            height: 4,
        });

        for rect in [TargetRect::new(0, 0), TargetRect::new(0, 720), TargetRect::new(960, 0)] {
            let err = resolver.build(0, Path::new("frame0.png"), rect).unwrap_err();
            assert!(matches!(err, FrameplayError::Config(_)));
        }
    }

    #[test]
    fn decode_failures_carry_index_and_path() {
        let resolver = FrameResolver::new(BrokenLoader);
        let err = resolver
            .build(9, Path::new("assets/frame9.png"), TargetRect::default())
            .unwrap_err();

        assert!(err.is_decode());
        let message = format!("{err}");
        assert!(message.contains("frame 9"));
        assert!(message.contains("assets/frame9.png"));
    }
}
