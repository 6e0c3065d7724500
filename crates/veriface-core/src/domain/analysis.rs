//! Analysis outcome: the verdict plus the evidence that backs it.

use serde::{Deserialize, Serialize};

use super::{DecisionResult, EvidenceSummary, ModelScore, TemporalProfile};

/// How the verdict was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMethod {
    /// Classifier ensemble fused with face evidence.
    Ensemble,
    /// Frame-level heuristic, used when no faces were extracted.
    ContentFallback,
}

/// Spread of the per-model scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionStats {
    /// Lowest model score.
    pub min: f64,
    /// Highest model score.
    pub max: f64,
    /// Population standard deviation of model scores.
    pub std_dev: f64,
}

impl PredictionStats {
    /// Computes spread statistics, or `None` for an empty ensemble.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_scores(scores: &[ModelScore]) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }
        let n = scores.len() as f64;
        let mean = scores.iter().map(|s| s.score).sum::<f64>() / n;
        let variance = scores
            .iter()
            .map(|s| (s.score - mean).powi(2))
            .sum::<f64>()
            / n;
        Some(Self {
            min: scores.iter().map(|s| s.score).fold(f64::INFINITY, f64::min),
            max: scores.iter().map(|s| s.score).fold(f64::NEG_INFINITY, f64::max),
            std_dev: variance.sqrt(),
        })
    }
}

/// Complete result of analyzing one video.
///
/// Serialized, this is the `analysis_details` blob of a verification record and the
/// detection payload that gets sealed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    /// Verdict, confidence and factors.
    #[serde(flatten)]
    pub decision: DecisionResult,
    /// Path taken.
    pub method: AnalysisMethod,
    /// Faces assessed and scored.
    pub faces_analyzed: usize,
    /// Raw frames examined by the content fallback.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub frames_sampled: usize,
    /// Ensemble members that contributed.
    pub models_used: usize,
    /// Mean score per model, in ensemble order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub model_predictions: Vec<ModelScore>,
    /// Spread of the model scores.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction_stats: Option<PredictionStats>,
    /// Ensemble weights (equal weighting).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ensemble_weights: Vec<f64>,
    /// Temporal stability profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporal: Option<TemporalProfile>,
    /// Face quality and artifact evidence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<EvidenceSummary>,
    /// Per-frame indicators from the content fallback.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fallback_indicators: Vec<f64>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_zero(n: &usize) -> bool {
    *n == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(model: &str, score: f64) -> ModelScore {
        ModelScore {
            model: model.to_string(),
            score,
        }
    }

    #[test]
    fn test_prediction_stats() {
        let stats = PredictionStats::from_scores(&[score("a", 0.2), score("b", 0.6)])
            .unwrap_or_else(|| panic!("stats for non-empty scores"));
        assert!((stats.min - 0.2).abs() < 1e-12);
        assert!((stats.max - 0.6).abs() < 1e-12);
        assert!((stats.std_dev - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_prediction_stats_empty() {
        assert!(PredictionStats::from_scores(&[]).is_none());
    }
}
