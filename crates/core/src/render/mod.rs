use std::path::Path;

use image::{imageops, Rgba, RgbaImage};

use crate::{Result, TargetRect};

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Where a label is placed on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    /// Top-left corner of the text at the given pixel position.
    TopLeft(i64, i64),
    /// Text centred on the surface.
    Center,
}

/// A run of text to be rasterised by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub anchor: Anchor,
    pub size: f32,
    pub color: Rgba<u8>,
}

/// Host-supplied drawing target. Origin is top-left, units are pixels.
pub trait Surface {
    fn blit(&mut self, image: &RgbaImage, rect: TargetRect);

    fn draw_label(&mut self, label: &Label);
}

/// Software RGBA surface.
///
/// Images are composited into the pixel buffer. Labels are recorded rather
/// than rasterised, so the caller can hand them to whatever text renderer
/// it owns.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
    labels: Vec<Label>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, BLACK),
            labels: Vec::new(),
        }
    }

    /// Fills the surface and forgets previously drawn labels.
    pub fn clear(&mut self, color: Rgba<u8>) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
        self.labels.clear();
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Labels drawn since the last [`Canvas::clear`].
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.image
            .save_with_format(path.as_ref(), image::ImageFormat::Png)
            .map_err(|err| {
                crate::FrameplayError::msg(format!(
                    "failed to write `{}`: {err}",
                    path.as_ref().display()
                ))
            })
    }
}

impl Surface for Canvas {
    fn blit(&mut self, image: &RgbaImage, rect: TargetRect) {
        // Pixels outside the canvas are clipped.
        imageops::replace(&mut self.image, image, rect.x, rect.y);
    }

    fn draw_label(&mut self, label: &Label) {
        self.labels.push(label.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blit_places_image_at_rect_origin() {
        let mut canvas = Canvas::new(8, 8);
        let tile = RgbaImage::from_pixel(2, 2, RED);
        canvas.blit(
            &tile,
            TargetRect {
                x: 3,
                y: 4,
                width: 2,
                height: 2,
            },
        );

        assert_eq!(canvas.image().get_pixel(3, 4), &RED);
        assert_eq!(canvas.image().get_pixel(4, 5), &RED);
        assert_eq!(canvas.image().get_pixel(2, 4), &BLACK);
        assert_eq!(canvas.image().get_pixel(5, 5), &BLACK);
    }

    #[test]
    fn blit_clips_at_the_edges() {
        let mut canvas = Canvas::new(4, 4);
        let tile = RgbaImage::from_pixel(6, 6, WHITE);
        canvas.blit(
            &tile,
            TargetRect {
                x: 2,
                y: 2,
                width: 6,
                height: 6,
            },
        );

        assert_eq!(canvas.image().get_pixel(3, 3), &WHITE);
        assert_eq!(canvas.image().get_pixel(1, 1), &BLACK);
    }

    #[test]
    fn clear_resets_pixels_and_labels() {
        let mut canvas = Canvas::new(2, 2);
        canvas.blit(&RgbaImage::from_pixel(2, 2, WHITE), TargetRect::new(2, 2));
        canvas.draw_label(&Label {
            text: "hello".to_string(),
            anchor: Anchor::Center,
            size: 12.0,
            color: WHITE,
        });

        canvas.clear(BLACK);
        assert!(canvas.labels().is_empty());
        assert!(canvas.image().pixels().all(|p| *p == BLACK));
    }

    #[test]
    fn saves_png_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.png");
        Canvas::new(3, 2).save_png(&path).unwrap();

        let reloaded = image::open(&path).unwrap().into_rgba8();
        assert_eq!(reloaded.dimensions(), (3, 2));
    }
}
