//! Artifact probe trait for pluggable heuristic checks.

use image::{GrayImage, RgbImage};

use super::{ArtifactTag, FaceSample};

/// Pre-decoded views and shared statistics of one face.
///
/// Built once per face so probes do not repeat color conversions.
#[derive(Debug)]
pub struct FaceView<'a> {
    /// Face being assessed.
    pub face: &'a FaceSample,
    /// Luminance plane.
    pub luma: GrayImage,
    /// RGB plane.
    pub rgb: RgbImage,
    /// Mean luminance.
    pub brightness: f64,
    /// Population standard deviation of luminance.
    pub contrast: f64,
    /// Variance of the Laplacian response.
    pub sharpness: f64,
}

/// Result of a single probe on a single face.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeFinding {
    /// Metric name recorded in the quality report.
    pub metric: &'static str,
    /// Measured value.
    pub value: f64,
    /// Artifact signature, if the value is out of the natural range.
    pub tag: Option<ArtifactTag>,
}

/// Trait for heuristic artifact detectors.
///
/// Each probe measures one property of a face and flags it when the
/// measurement falls outside the range seen in natural footage.
pub trait ArtifactProbe: Send + Sync {
    /// Returns the name of this probe.
    fn name(&self) -> &'static str;

    /// Measures a face.
    ///
    /// # Errors
    ///
    /// Returns an error if the measurement cannot be computed.
    fn probe(&self, view: &FaceView<'_>) -> anyhow::Result<ProbeFinding>;
}
