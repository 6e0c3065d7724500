//! Classifier port for the pretrained deepfake ensemble.

use crate::domain::{FaceSample, ScoreMatrix};

/// Port for an opaque classifier ensemble.
///
/// Implementations may run models locally, call a remote service, or replay
/// stored scores; the core only sees the probability matrix.
pub trait ClassifierOracle: Send + Sync {
    /// Scores every face with every ensemble member.
    ///
    /// # Arguments
    ///
    /// * `faces` - The face batch, in frame order
    ///
    /// # Returns
    ///
    /// One probability column per model, one entry per face, each in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns an error if scoring fails.
    fn score(&self, faces: &[FaceSample]) -> anyhow::Result<ScoreMatrix>;
}
