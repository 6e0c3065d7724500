//! Classifier ensemble output.

use serde::{Deserialize, Serialize};

/// One ensemble member's per-face probabilities that a face is synthetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPredictions {
    /// Model identifier.
    pub name: String,
    /// Probability (0.0-1.0) for each face, in face order.
    pub scores: Vec<f64>,
}

/// One ensemble member's mean probability over all analyzed faces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelScore {
    /// Model identifier.
    pub model: String,
    /// Mean probability that the faces are synthetic.
    pub score: f64,
}

/// Per-model, per-face probability matrix returned by the classifier oracle.
///
/// Model order is insertion order and is preserved everywhere it is reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreMatrix {
    /// Ensemble members in insertion order.
    pub models: Vec<ModelPredictions>,
}

impl ScoreMatrix {
    /// Creates a matrix from ensemble members.
    #[must_use]
    pub const fn new(models: Vec<ModelPredictions>) -> Self {
        Self { models }
    }

    /// Appends a model column.
    #[must_use]
    pub fn with_model(mut self, name: impl Into<String>, scores: Vec<f64>) -> Self {
        self.models.push(ModelPredictions {
            name: name.into(),
            scores,
        });
        self
    }

    /// Number of ensemble members.
    #[must_use]
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Mean probability per model, in insertion order.
    ///
    /// A model without scores yields `NaN`, which the fusion engine treats as unusable.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn model_scores(&self) -> Vec<ModelScore> {
        self.models
            .iter()
            .map(|m| ModelScore {
                model: m.name.clone(),
                score: m.scores.iter().sum::<f64>() / m.scores.len() as f64,
            })
            .collect()
    }

    /// Flattens probabilities frame-major: every model's score for face 0, then face 1, ...
    ///
    /// Contiguous runs of `model_count()` values therefore belong to one sampled frame.
    #[must_use]
    pub fn frame_major(&self, face_count: usize) -> Vec<f64> {
        (0..face_count)
            .flat_map(|face| {
                self.models
                    .iter()
                    .filter_map(move |m| m.scores.get(face).copied())
            })
            .collect()
    }

    /// Checks that every model scored exactly `face_count` faces with probabilities in range.
    pub fn validate(&self, face_count: usize) -> anyhow::Result<()> {
        anyhow::ensure!(!self.models.is_empty(), "score matrix has no models");
        for model in &self.models {
            anyhow::ensure!(
                model.scores.len() == face_count,
                "model {} scored {} faces, expected {face_count}",
                model.name,
                model.scores.len()
            );
            if let Some(bad) = model
                .scores
                .iter()
                .find(|p| !(0.0..=1.0).contains(*p))
            {
                anyhow::bail!("model {} produced out-of-range probability {bad}", model.name);
            }
        }
        Ok(())
    }
}
