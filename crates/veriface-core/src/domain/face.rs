//! Face samples handed over by the extraction collaborator.

use std::ops::Deref;

use image::GenericImageView;

/// A normalized face region taken from one sampled video frame.
#[derive(Debug, Clone)]
pub struct FaceSample {
    /// Index of the source frame within the video.
    pub frame_index: usize,
    /// Crop width in pixels.
    pub width: u32,
    /// Crop height in pixels.
    pub height: u32,
    /// Decoded face crop.
    pub image: image::DynamicImage,
}

impl FaceSample {
    /// Wraps a decoded face crop, reading its dimensions from the image.
    #[must_use]
    pub fn new(frame_index: usize, image: image::DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            frame_index,
            width,
            height,
            image,
        }
    }

    /// Face area in square pixels.
    #[must_use]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl Deref for FaceSample {
    type Target = image::DynamicImage;

    fn deref(&self) -> &Self::Target {
        &self.image
    }
}
