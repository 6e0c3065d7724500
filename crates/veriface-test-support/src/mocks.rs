//! Mock implementations of core port traits.

use std::sync::{Arc, Mutex, PoisonError};

use veriface_core::domain::{FaceSample, ScoreMatrix, VerificationRecord};
use veriface_core::ports::{ClassifierOracle, RecordOutput, VideoSource};

/// Mock implementation of `VideoSource` for testing.
///
/// Yields pre-built faces and frames and tracks calls for assertions.
pub struct MockVideoSource {
    faces: Vec<FaceSample>,
    frames: Vec<image::DynamicImage>,
    frame_requests: Arc<Mutex<Vec<usize>>>,
}

impl MockVideoSource {
    /// Creates a new mock source with the given faces.
    #[must_use]
    pub fn new(faces: Vec<FaceSample>) -> Self {
        Self {
            faces,
            frames: Vec::new(),
            frame_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a source without faces that offers raw frames.
    #[must_use]
    pub fn faceless(frames: Vec<image::DynamicImage>) -> Self {
        Self {
            frames,
            ..Self::new(Vec::new())
        }
    }

    /// Returns the `max_frames` argument of every `sample_frames` call.
    #[must_use]
    pub fn frame_requests(&self) -> Vec<usize> {
        self.frame_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl VideoSource for MockVideoSource {
    fn extract_faces(&self) -> anyhow::Result<Vec<FaceSample>> {
        Ok(self.faces.clone())
    }

    fn sample_frames(&self, max_frames: usize) -> anyhow::Result<Vec<image::DynamicImage>> {
        self.frame_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(max_frames);
        Ok(self.frames.iter().take(max_frames).cloned().collect())
    }
}

/// Mock implementation of `ClassifierOracle` for testing.
///
/// Gives every face the same probability per model, or fails on demand.
pub struct MockClassifierOracle {
    probabilities: Vec<(String, f64)>,
    failure: Option<String>,
    batches: Arc<Mutex<Vec<usize>>>,
}

impl MockClassifierOracle {
    /// Creates an oracle with one constant probability per model.
    #[must_use]
    pub fn constant(probabilities: &[f64]) -> Self {
        Self {
            probabilities: probabilities
                .iter()
                .enumerate()
                .map(|(i, p)| (format!("mock_{i}"), *p))
                .collect(),
            failure: None,
            batches: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates an oracle whose every call fails with `message`.
    #[must_use]
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::constant(&[])
        }
    }

    /// Returns the batch size of every `score` call.
    #[must_use]
    pub fn batches(&self) -> Vec<usize> {
        self.batches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ClassifierOracle for MockClassifierOracle {
    fn score(&self, faces: &[FaceSample]) -> anyhow::Result<ScoreMatrix> {
        self.batches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(faces.len());
        if let Some(message) = &self.failure {
            anyhow::bail!("{message}");
        }
        Ok(self
            .probabilities
            .iter()
            .fold(ScoreMatrix::default(), |matrix, (name, p)| {
                matrix.with_model(name.clone(), vec![*p; faces.len()])
            }))
    }
}

/// Mock implementation of `RecordOutput` for testing.
///
/// Captures records for later assertions.
pub struct MockRecordOutput {
    records: Arc<Mutex<Vec<VerificationRecord>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockRecordOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured records.
    #[must_use]
    pub fn records(&self) -> Vec<VerificationRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockRecordOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordOutput for MockRecordOutput {
    fn write(&self, record: &VerificationRecord) -> anyhow::Result<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}
