//! Classifier adapter replaying a stored score matrix.
//!
//! The file is JSON in the shape `{"models": [{"name": "...", "scores": [...]}]}`,
//! one score per face. The `n`-th score belongs to the `n`-th face in ascending
//! frame-index order, where a face file's frame index is the first run of digits
//! in its file stem (`face_2.png` comes before `face_10.png`, unlike name order).
//! Files with equal indices are ordered by path; a file without digits takes its
//! position in the sorted directory listing as its index.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;
use veriface_core::{ClassifierOracle, FaceSample, ScoreMatrix};

/// Oracle returning probabilities recorded by an external classifier run.
#[derive(Debug, Clone)]
pub struct JsonScoreOracle {
    matrix: ScoreMatrix,
}

impl JsonScoreOracle {
    /// Wraps an in-memory matrix.
    #[must_use]
    pub const fn new(matrix: ScoreMatrix) -> Self {
        Self { matrix }
    }

    /// Parses a score matrix from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid score matrix.
    pub fn from_json(text: &str) -> Result<Self> {
        let matrix: ScoreMatrix = serde_json::from_str(text).context("Invalid score matrix")?;
        Ok(Self::new(matrix))
    }

    /// Loads a score matrix from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scores: {}", path.display()))?;
        let oracle = Self::from_json(&text)
            .with_context(|| format!("Failed to parse scores: {}", path.display()))?;
        debug!(
            "Loaded {} model columns from {}",
            oracle.matrix.model_count(),
            path.display()
        );
        Ok(oracle)
    }
}

impl ClassifierOracle for JsonScoreOracle {
    fn score(&self, faces: &[FaceSample]) -> Result<ScoreMatrix> {
        for model in &self.matrix.models {
            anyhow::ensure!(
                model.scores.len() == faces.len(),
                "model {} has {} scores but {} faces were extracted",
                model.name,
                model.scores.len(),
                faces.len()
            );
        }
        Ok(self.matrix.clone())
    }
}
