//! Synthetic face and frame builders for testing.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use veriface_core::FaceSample;

/// Small deterministic xorshift generator for reproducible noise.
struct Noise(u32);

impl Noise {
    fn next(&mut self) -> u32 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 17;
        self.0 ^= self.0 << 5;
        self.0
    }
}

/// Builder for creating synthetic face crops.
///
/// Provides convenience methods for generating faces with specific
/// characteristics (flat, over-sharp, dark, undersized, etc.).
pub struct SyntheticFaceBuilder;

impl SyntheticFaceBuilder {
    // === Flat / Smoothed Faces ===

    /// Creates a uniform gray face (no texture at all).
    ///
    /// Flagged as blurry and low-contrast, with over-smoothing artifacts.
    #[must_use]
    pub fn uniform_gray(width: u32, height: u32, value: u8) -> FaceSample {
        let img = GrayImage::from_pixel(width, height, Luma([value]));
        FaceSample::new(0, DynamicImage::ImageLuma8(img))
    }

    /// Creates a uniform skin-toned face.
    #[must_use]
    pub fn flat_skin(width: u32, height: u32) -> FaceSample {
        Self::rgb_uniform(width, height, 196, 150, 120)
    }

    /// Creates a uniform RGB face.
    #[must_use]
    pub fn rgb_uniform(width: u32, height: u32, r: u8, g: u8, b: u8) -> FaceSample {
        let img = RgbImage::from_pixel(width, height, Rgb([r, g, b]));
        FaceSample::new(0, DynamicImage::ImageRgb8(img))
    }

    // === Sharp / Noisy Faces ===

    /// Creates a high-contrast checkerboard (very sharp edges).
    #[must_use]
    pub fn checkerboard(width: u32, height: u32, cell_size: u32) -> FaceSample {
        let cell = cell_size.max(1);
        let img = GrayImage::from_fn(width, height, |x, y| {
            if (x / cell + y / cell) % 2 == 0 {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });
        FaceSample::new(0, DynamicImage::ImageLuma8(img))
    }

    /// Creates gray noise around `base` with values spread over `base..base+spread`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn noisy(width: u32, height: u32, base: u8, spread: u8, seed: u32) -> FaceSample {
        let mut noise = Noise(seed.max(1));
        let span = u32::from(spread.max(1));
        let img = GrayImage::from_fn(width, height, |_, _| {
            Luma([base.saturating_add((noise.next() % span) as u8)])
        });
        FaceSample::new(0, DynamicImage::ImageLuma8(img))
    }

    /// Creates a skin-toned face with mild texture and shading.
    ///
    /// Moderate brightness, contrast and sharpness; not blurry, not dark.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn textured_skin(width: u32, height: u32, seed: u32) -> FaceSample {
        let mut noise = Noise(seed.max(1));
        let img = RgbImage::from_fn(width, height, |x, y| {
            let shade = (x + y) * 60 / (width + height).max(1);
            let grain = noise.next() % 50;
            let r = (150 + shade + grain).min(255) as u8;
            let g = (110 + shade + grain).min(255) as u8;
            let b = (90 + shade + grain).min(255) as u8;
            Rgb([r, g, b])
        });
        FaceSample::new(0, DynamicImage::ImageRgb8(img))
    }

    // === Exposure ===

    /// Creates a very dark face with slight variation.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn dark(width: u32, height: u32) -> FaceSample {
        let img = GrayImage::from_fn(width, height, |x, y| Luma([((x + y) % 20) as u8]));
        FaceSample::new(0, DynamicImage::ImageLuma8(img))
    }

    /// Creates a very bright face with slight variation.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn bright(width: u32, height: u32) -> FaceSample {
        let img = GrayImage::from_fn(width, height, |x, y| Luma([235 + ((x + y) % 20) as u8]));
        FaceSample::new(0, DynamicImage::ImageLuma8(img))
    }

    // === Edge Cases ===

    /// Creates a 2x2 face, too small to measure.
    #[must_use]
    pub fn tiny() -> FaceSample {
        Self::uniform_gray(2, 2, 128)
    }

    // === Sequences and Frames ===

    /// Builds `count` faces and numbers them as consecutive frames.
    #[must_use]
    pub fn sequence(count: usize, make: impl Fn(usize) -> FaceSample) -> Vec<FaceSample> {
        (0..count)
            .map(|i| {
                let mut face = make(i);
                face.frame_index = i;
                face
            })
            .collect()
    }

    /// Creates a raw frame of uniform color, as the content fallback sees it.
    #[must_use]
    pub fn flat_frame(width: u32, height: u32, r: u8, g: u8, b: u8) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([r, g, b])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkerboard_pattern() {
        let face = SyntheticFaceBuilder::checkerboard(16, 16, 8);
        let luma = face.to_luma8();
        assert_eq!(luma.get_pixel(0, 0).0[0], 255);
        assert_eq!(luma.get_pixel(8, 0).0[0], 0);
        assert_eq!(face.width, 16);
    }

    #[test]
    fn test_uniform_gray() {
        let face = SyntheticFaceBuilder::uniform_gray(50, 40, 100);
        assert!(face.to_luma8().pixels().all(|p| p.0[0] == 100));
        assert_eq!(face.area(), 2000);
    }

    #[test]
    fn test_noisy_is_deterministic() {
        let a = SyntheticFaceBuilder::noisy(16, 16, 80, 60, 7);
        let b = SyntheticFaceBuilder::noisy(16, 16, 80, 60, 7);
        assert_eq!(a.to_luma8(), b.to_luma8());
        assert!(a.to_luma8().pixels().all(|p| (80..140).contains(&p.0[0])));
    }

    #[test]
    fn test_sequence_numbers_frames() {
        let faces = SyntheticFaceBuilder::sequence(3, |_| SyntheticFaceBuilder::tiny());
        let indices: Vec<_> = faces.iter().map(|f| f.frame_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_exposure_faces() {
        assert!(SyntheticFaceBuilder::dark(10, 10)
            .to_luma8()
            .pixels()
            .all(|p| p.0[0] < 20));
        assert!(SyntheticFaceBuilder::bright(10, 10)
            .to_luma8()
            .pixels()
            .all(|p| p.0[0] >= 235));
    }
}
