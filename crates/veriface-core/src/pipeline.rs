//! End-to-end analysis of one video.
//!
//! Faces go through evidence extraction, the classifier scores them, the
//! per-frame scores feed the temporal analyzer, and the fusion engine turns
//! it all into a verdict. Videos without faces take the content fallback.

use anyhow::Context;
use tracing::{info, warn};

use crate::domain::{
    AnalysisMethod, AnalysisOutcome, EvidenceSummary, FaceSample, PredictionStats, ScoreMatrix,
};
use crate::modules::{
    ContentHeuristic, EvidenceConfig, EvidenceExtractor, FallbackConfig, FusionEngine,
    FusionPolicy, TemporalAnalyzer, TemporalConfig,
};
use crate::ports::{ClassifierOracle, VideoSource};

/// Configuration of every analysis stage.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    /// Evidence extraction thresholds.
    pub evidence: EvidenceConfig,
    /// Temporal analysis thresholds.
    pub temporal: TemporalConfig,
    /// Fusion policy.
    pub fusion: FusionPolicy,
    /// No-face fallback thresholds.
    pub fallback: FallbackConfig,
}

/// Runs the full analysis for one video.
#[derive(Debug)]
pub struct Analyzer {
    extractor: EvidenceExtractor,
    temporal: TemporalAnalyzer,
    fusion: FusionEngine,
    fallback: ContentHeuristic,
}

impl Analyzer {
    /// Creates an analyzer from stage configurations.
    #[must_use]
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            extractor: EvidenceExtractor::new(config.evidence),
            temporal: TemporalAnalyzer::new(config.temporal),
            fusion: FusionEngine::new(config.fusion),
            fallback: ContentHeuristic::new(config.fallback),
        }
    }

    /// Pulls faces from the source and produces an outcome.
    ///
    /// When the source yields no faces, raw frames are sampled and judged by
    /// the content fallback; the classifier is not consulted.
    ///
    /// # Errors
    ///
    /// Returns an error if the source or the classifier fails.
    pub fn run(
        &self,
        source: &dyn VideoSource,
        oracle: &dyn ClassifierOracle,
    ) -> anyhow::Result<AnalysisOutcome> {
        let faces = source.extract_faces().context("face extraction failed")?;
        if faces.is_empty() {
            info!("no faces extracted, using content fallback");
            let frames = source
                .sample_frames(self.fallback.config().max_frames)
                .context("frame sampling failed")?;
            return Ok(self.analyze_frames(&frames));
        }

        info!(faces = faces.len(), "scoring faces");
        let matrix = oracle.score(&faces).context("classifier scoring failed")?;
        Ok(self.analyze_faces(&faces, &matrix))
    }

    /// Fuses face evidence with classifier scores.
    #[must_use]
    pub fn analyze_faces(&self, faces: &[FaceSample], matrix: &ScoreMatrix) -> AnalysisOutcome {
        if let Err(e) = matrix.validate(faces.len()) {
            warn!(error = %e, "classifier output is irregular");
        }

        let evidence = self.extractor.summarize(faces);
        let model_scores = matrix.model_scores();
        let temporal = self
            .temporal
            .analyze(&matrix.frame_major(faces.len()), faces.len());
        let decision = self.fusion.decide(&model_scores, &temporal, &evidence);

        let usable: Vec<_> = model_scores
            .iter()
            .filter(|m| m.score.is_finite())
            .cloned()
            .collect();
        #[allow(clippy::cast_precision_loss)]
        let ensemble_weights = vec![1.0 / model_scores.len().max(1) as f64; model_scores.len()];

        info!(
            verdict = decision.label(),
            confidence = decision.confidence,
            path = ?decision.factors.decision_path,
            "analysis complete"
        );

        AnalysisOutcome {
            decision,
            method: AnalysisMethod::Ensemble,
            faces_analyzed: faces.len(),
            frames_sampled: 0,
            models_used: matrix.model_count(),
            prediction_stats: PredictionStats::from_scores(&usable),
            model_predictions: model_scores,
            ensemble_weights,
            temporal: Some(temporal),
            evidence: Some(evidence),
            fallback_indicators: Vec::new(),
        }
    }

    /// Judges raw frames with the content fallback.
    #[must_use]
    pub fn analyze_frames(&self, frames: &[image::DynamicImage]) -> AnalysisOutcome {
        let (decision, indicators) = self.fallback.decide(frames);

        info!(
            verdict = decision.label(),
            confidence = decision.confidence,
            frames = indicators.len(),
            "content fallback complete"
        );

        AnalysisOutcome {
            decision,
            method: AnalysisMethod::ContentFallback,
            faces_analyzed: 0,
            frames_sampled: frames.len().min(self.fallback.config().max_frames),
            models_used: 0,
            model_predictions: Vec::new(),
            prediction_stats: None,
            ensemble_weights: Vec::new(),
            temporal: None,
            evidence: Some(EvidenceSummary::no_faces()),
            fallback_indicators: indicators,
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}
