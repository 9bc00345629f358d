//! Synthetic image builders for testing.

use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};

/// Builder for creating synthetic test images.
///
/// Images are generated in memory; [`SyntheticImageBuilder::write`] puts
/// one on disk so adapters can pick and crop it.
pub struct SyntheticImageBuilder;

impl SyntheticImageBuilder {
    /// Creates a high-contrast checkerboard pattern.
    #[must_use]
    pub fn checkerboard(width: u32, height: u32, cell_size: u32) -> DynamicImage {
        let cell = cell_size.max(1);
        let img = GrayImage::from_fn(width, height, |x, y| {
            if (x / cell + y / cell) % 2 == 0 {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });
        DynamicImage::ImageLuma8(img)
    }

    /// Creates a smooth horizontal gradient.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn horizontal_gradient(width: u32, height: u32) -> DynamicImage {
        let img = GrayImage::from_fn(width, height, |x, _| {
            let val = ((u32::from(u8::MAX) * x) / width.max(1)) as u8;
            Luma([val])
        });
        DynamicImage::ImageLuma8(img)
    }

    /// Creates a uniformly colored RGB image.
    #[must_use]
    pub fn rgb_uniform(width: u32, height: u32, r: u8, g: u8, b: u8) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |_, _| Rgb([r, g, b])))
    }

    /// Creates an image whose left third is red, middle third green and
    /// right third blue.
    ///
    /// A centered square crop of a landscape image keeps only green pixels
    /// in its middle column, which makes crop placement easy to assert.
    #[must_use]
    pub fn vertical_thirds(width: u32, height: u32) -> DynamicImage {
        let third = (width / 3).max(1);
        let img = RgbImage::from_fn(width, height, |x, _| match x / third {
            0 => Rgb([255, 0, 0]),
            1 => Rgb([0, 255, 0]),
            _ => Rgb([0, 0, 255]),
        });
        DynamicImage::ImageRgb8(img)
    }

    /// Saves `image` as `name` under `dir` and returns the full path.
    ///
    /// The format follows the file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be encoded or written.
    pub fn write(dir: &Path, name: &str, image: &DynamicImage) -> anyhow::Result<PathBuf> {
        let path = dir.join(name);
        image.save(&path)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkerboard_pattern() {
        let img = SyntheticImageBuilder::checkerboard(16, 16, 8).to_luma8();
        assert_eq!(img.get_pixel(0, 0).0[0], 255);
        assert_eq!(img.get_pixel(8, 0).0[0], 0);
    }

    #[test]
    fn test_gradient_range() {
        let img = SyntheticImageBuilder::horizontal_gradient(256, 10).to_luma8();
        assert!(img.get_pixel(0, 0).0[0] < 5);
        assert!(img.get_pixel(255, 0).0[0] > 250);
    }

    #[test]
    fn test_rgb_uniform() {
        let img = SyntheticImageBuilder::rgb_uniform(10, 10, 255, 0, 128).to_rgb8();
        assert_eq!(img.get_pixel(5, 5).0, [255, 0, 128]);
    }

    #[test]
    fn test_vertical_thirds() {
        let img = SyntheticImageBuilder::vertical_thirds(90, 30).to_rgb8();
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(img.get_pixel(45, 0).0, [0, 255, 0]);
        assert_eq!(img.get_pixel(89, 0).0, [0, 0, 255]);
    }
}
