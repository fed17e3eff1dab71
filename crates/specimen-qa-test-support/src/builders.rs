//! Synthetic frame builders for testing.

use image::{DynamicImage, Rgba, RgbaImage};
use specimen_qa_core::Frame;

/// Builder for frames with known quality characteristics.
///
/// Each method constructs a frame that drives a specific metric toward a
/// known rating (sharp, dark, high-contrast, ...).
pub struct SyntheticFrameBuilder;

impl SyntheticFrameBuilder {
    /// Frame from a per-pixel grayscale function.
    #[must_use]
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> Frame {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            let v = f(x, y);
            Rgba([v, v, v, 255])
        });
        Frame::new(width, height, img.into_raw())
    }

    /// Uniform gray frame (no edges, reads as severely blurred).
    #[must_use]
    pub fn uniform(width: u32, height: u32, value: u8) -> Frame {
        Self::from_fn(width, height, |_, _| value)
    }

    /// Completely black frame (severely underlit).
    #[must_use]
    pub fn black(width: u32, height: u32) -> Frame {
        Self::uniform(width, height, 0)
    }

    /// Completely white frame (maximal lighting).
    #[must_use]
    pub fn white(width: u32, height: u32) -> Frame {
        Self::uniform(width, height, 255)
    }

    /// Fine checkerboard across the whole frame (very sharp edges).
    #[must_use]
    pub fn checkerboard(width: u32, height: u32, cell_size: u32) -> Frame {
        Self::from_fn(width, height, |x, y| {
            if (x / cell_size + y / cell_size) % 2 == 0 {
                255
            } else {
                0
            }
        })
    }

    /// Checkerboard confined to the central 50% window, uniform elsewhere.
    ///
    /// Exercises the center weighting of the sharpness extractor.
    #[must_use]
    pub fn center_checkerboard(width: u32, height: u32, cell_size: u32) -> Frame {
        let x0 = width / 4;
        let x1 = 3 * width / 4;
        let y0 = height / 4;
        let y1 = 3 * height / 4;
        Self::from_fn(width, height, |x, y| {
            if (x0..x1).contains(&x) && (y0..y1).contains(&y) {
                if (x / cell_size + y / cell_size) % 2 == 0 {
                    255
                } else {
                    0
                }
            } else {
                128
            }
        })
    }

    /// Smooth horizontal gradient (low second-derivative response).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn horizontal_gradient(width: u32, height: u32) -> Frame {
        Self::from_fn(width, height, |x, _| {
            ((u32::from(u8::MAX) * x) / width.max(1)) as u8
        })
    }

    /// Bright disk of radius `0.3 * min(w, h)` centered on a dark ground.
    ///
    /// Produces a contrast separation of `|foreground - background|`.
    #[must_use]
    pub fn centered_disk(width: u32, height: u32, foreground: u8, background: u8) -> Frame {
        let cx = f64::from(width) / 2.0;
        let cy = f64::from(height) / 2.0;
        let radius = 0.3 * f64::from(width.min(height));
        Self::from_fn(width, height, |x, y| {
            let dx = f64::from(x) - cx;
            let dy = f64::from(y) - cy;
            if (dx * dx + dy * dy).sqrt() < radius {
                foreground
            } else {
                background
            }
        })
    }

    /// A 1x1 frame (fails the sharpness extractor).
    #[must_use]
    pub fn single_pixel(value: u8) -> Frame {
        Self::uniform(1, 1, value)
    }

    /// A well-lit, sharp, high-contrast capture: bright fine-grained disk
    /// detail on a dark ground.
    #[must_use]
    pub fn good_capture(width: u32, height: u32) -> Frame {
        let cx = f64::from(width) / 2.0;
        let cy = f64::from(height) / 2.0;
        let radius = 0.3 * f64::from(width.min(height));
        Self::from_fn(width, height, |x, y| {
            let dx = f64::from(x) - cx;
            let dy = f64::from(y) - cy;
            if (dx * dx + dy * dy).sqrt() < radius {
                // Specimen texture: bright with strong single-pixel detail.
                if (x + y) % 2 == 0 {
                    255
                } else {
                    160
                }
            } else {
                100
            }
        })
    }

    /// Saves a frame as a PNG image, for CLI tests operating on files.
    ///
    /// # Panics
    ///
    /// Panics when the frame buffer does not match its dimensions.
    #[must_use]
    pub fn to_image(frame: &Frame) -> DynamicImage {
        let img = RgbaImage::from_raw(frame.width, frame.height, frame.data.clone())
            .expect("frame buffer matches dimensions");
        DynamicImage::ImageRgba8(img)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_frame() {
        let frame = SyntheticFrameBuilder::uniform(8, 8, 100);
        assert_eq!(frame.width, 8);
        assert_eq!(frame.data.len(), 8 * 8 * 4);
        assert!(frame
            .data
            .chunks_exact(4)
            .all(|px| px == [100, 100, 100, 255]));
    }

    #[test]
    fn test_checkerboard_alternates() {
        let frame = SyntheticFrameBuilder::checkerboard(8, 8, 1);
        assert_eq!(&frame.data[..4], &[255, 255, 255, 255]);
        assert_eq!(&frame.data[4..8], &[0, 0, 0, 255]);
    }

    #[test]
    fn test_center_checkerboard_border_is_flat() {
        let frame = SyntheticFrameBuilder::center_checkerboard(64, 64, 1);
        // Top-left corner lies outside the central window.
        assert_eq!(&frame.data[..4], &[128, 128, 128, 255]);
    }

    #[test]
    fn test_centered_disk_values() {
        let frame = SyntheticFrameBuilder::centered_disk(100, 100, 220, 20);
        // Frame center is inside the disk.
        let center = (50 * 100 + 50) * 4;
        assert_eq!(frame.data[center], 220);
        // Corner is on the ground.
        assert_eq!(frame.data[0], 20);
    }

    #[test]
    fn test_gradient_spans_range() {
        let frame = SyntheticFrameBuilder::horizontal_gradient(256, 4);
        assert!(frame.data[0] < 5);
        let last = (255u32 * 4) as usize;
        assert!(frame.data[last] > 250);
    }

    #[test]
    fn test_to_image_round_trip() {
        let frame = SyntheticFrameBuilder::uniform(6, 3, 77);
        let img = SyntheticFrameBuilder::to_image(&frame);
        assert_eq!(img.width(), 6);
        assert_eq!(img.height(), 3);
    }
}
