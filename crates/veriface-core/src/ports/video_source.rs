//! Video source port for face and frame extraction.

use crate::domain::FaceSample;

/// Port for obtaining faces and raw frames from one video.
pub trait VideoSource: Send + Sync {
    /// Returns the face crops found in the sampled frames, in frame order.
    ///
    /// An empty sequence means no face was detected.
    ///
    /// # Errors
    ///
    /// Returns an error if the video cannot be read.
    fn extract_faces(&self) -> anyhow::Result<Vec<FaceSample>>;

    /// Returns up to `max_frames` evenly spaced raw frames.
    ///
    /// # Errors
    ///
    /// Returns an error if the video cannot be read.
    fn sample_frames(&self, max_frames: usize) -> anyhow::Result<Vec<image::DynamicImage>>;
}
