//! Verdict and its factor breakdown.

use serde::{Deserialize, Serialize};

/// Which branch of the fusion algorithm produced the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionPath {
    /// Strong artifact evidence forced a deepfake verdict.
    HeuristicOverride,
    /// Moderate artifact evidence blended with the model mean.
    WeightedBlend,
    /// Classifier mean alone.
    ModelOnly,
    /// Classifier mean after an internal failure.
    ModelOnlyFallback,
    /// Holistic frame statistics, no faces available.
    ContentFallback,
}

/// Disagreement between the verdict and the artifact evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Contradiction {
    /// Deepfake verdict with almost no artifacts.
    DeepfakeWithoutArtifacts,
    /// Authentic verdict despite strong artifacts; manual review advised.
    AuthenticWithStrongArtifacts,
    /// Authentic verdict with moderate artifacts.
    AuthenticWithArtifacts,
}

/// Every intermediate value that went into a verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionFactors {
    /// Mean of the model scores.
    pub base_prediction: f64,
    /// Vote agreement across the ensemble (0.0-1.0).
    pub model_agreement: f64,
    /// Temporal consistency score used.
    pub temporal_consistency: f64,
    /// Face quality score used.
    pub face_quality: f64,
    /// Artifact suspicion used.
    pub deepfake_suspicion: f64,
    /// Count of distinct artifact tags.
    pub heuristic_evidence: usize,
    /// Branch that produced the verdict.
    pub decision_path: DecisionPath,
    /// Confidence before adjustments.
    pub base_confidence: f64,
    /// Net additive adjustment.
    pub confidence_boost: f64,
    /// Upper clamp applied.
    pub confidence_cap: f64,
    /// Confidence after clamping.
    pub final_confidence: f64,
    /// Verdict/evidence contradictions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Contradiction>,
    /// Internal failure that forced a fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Set when the verdict came from a fallback formula.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
}

/// Final verdict for one analysis. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    /// Whether the video is judged synthetic.
    pub is_deepfake: bool,
    /// Confidence in the verdict, within [0.1, 0.99].
    pub confidence: f64,
    /// Factor breakdown for audit.
    pub factors: DecisionFactors,
}

impl DecisionResult {
    /// Human-readable verdict label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        if self.is_deepfake {
            "deepfake"
        } else {
            "authentic"
        }
    }
}
