//! Content-level heuristic for videos without detectable faces.

use tracing::{debug, warn};

use super::imaging;
use crate::domain::{DecisionFactors, DecisionPath, DecisionResult, EvidenceSummary};

/// Configuration for the no-face content heuristic.
#[derive(Debug, Clone)]
pub struct FallbackConfig {
    /// Frames examined at most.
    pub max_frames: usize,
    /// Laplacian variance below this votes "synthetic".
    pub sharpness_limit: f64,
    /// Canny hysteresis thresholds (low, high).
    pub canny_thresholds: (f64, f64),
    /// Edge density above this votes "synthetic".
    pub edge_density_limit: f64,
    /// Saturation variance below this votes "synthetic".
    pub saturation_variance_limit: f64,
    /// Indicator above this is a deepfake verdict.
    pub verdict_threshold: f64,
    /// Indicator reported when no frame could be read.
    pub neutral_indicator: f64,
    /// Lowest reportable confidence.
    pub confidence_floor: f64,
    /// Highest reportable confidence.
    pub confidence_cap: f64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            max_frames: 5,
            sharpness_limit: 100.0,
            canny_thresholds: (50.0, 150.0),
            edge_density_limit: 0.1,
            saturation_variance_limit: 500.0,
            verdict_threshold: 0.4,
            neutral_indicator: 0.5,
            confidence_floor: 0.1,
            confidence_cap: 0.99,
        }
    }
}

/// Holistic frame heuristic.
#[derive(Debug, Clone, Default)]
pub struct ContentHeuristic {
    config: FallbackConfig,
}

impl ContentHeuristic {
    /// Creates a heuristic with the given configuration.
    #[must_use]
    pub const fn new(config: FallbackConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    #[must_use]
    pub const fn config(&self) -> &FallbackConfig {
        &self.config
    }

    /// Scores one frame as the share of synthetic votes (0.0, 1/3, 2/3 or 1.0).
    ///
    /// Returns `None` for frames too small to measure.
    #[must_use]
    pub fn frame_indicator(&self, frame: &image::DynamicImage) -> Option<f64> {
        let cfg = &self.config;
        let rgb = frame.to_rgb8();
        let gray = imaging::luma_plane(&rgb);
        let sharpness = imaging::laplacian_variance(&gray)?;
        let density = imaging::edge_density(&gray, cfg.canny_thresholds.0, cfg.canny_thresholds.1);
        let saturation_variance = imaging::saturation_variance(&rgb);

        let votes = [
            sharpness < cfg.sharpness_limit,
            density > cfg.edge_density_limit,
            saturation_variance < cfg.saturation_variance_limit,
        ];
        let cast = votes.iter().filter(|v| **v).count();
        debug!(
            sharpness,
            density, saturation_variance, votes = cast, "frame heuristic"
        );
        #[allow(clippy::cast_precision_loss)]
        Some(cast as f64 / votes.len() as f64)
    }

    /// Per-frame indicators over at most `max_frames` frames; unreadable frames are skipped.
    #[must_use]
    pub fn indicators(&self, frames: &[image::DynamicImage]) -> Vec<f64> {
        frames
            .iter()
            .take(self.config.max_frames)
            .enumerate()
            .filter_map(|(i, frame)| {
                let indicator = self.frame_indicator(frame);
                if indicator.is_none() {
                    warn!(frame = i, "frame too small for content heuristic, skipped");
                }
                indicator
            })
            .collect()
    }

    /// Produces a verdict from raw frames. Never fails.
    #[must_use]
    pub fn decide(&self, frames: &[image::DynamicImage]) -> (DecisionResult, Vec<f64>) {
        let indicators = self.indicators(frames);
        (self.decide_from_indicators(&indicators), indicators)
    }

    /// Turns per-frame indicators into a verdict.
    #[must_use]
    pub fn decide_from_indicators(&self, indicators: &[f64]) -> DecisionResult {
        let cfg = &self.config;
        let indicator = if indicators.is_empty() {
            cfg.neutral_indicator
        } else {
            imaging::mean_variance(indicators).0
        };
        let is_deepfake = indicator > cfg.verdict_threshold;
        let confidence = indicator.min(cfg.confidence_cap).max(cfg.confidence_floor);
        let evidence = EvidenceSummary::no_faces();

        debug!(
            frames = indicators.len(),
            indicator, is_deepfake, "content fallback decision"
        );

        DecisionResult {
            is_deepfake,
            confidence,
            factors: DecisionFactors {
                base_prediction: indicator,
                model_agreement: 0.0,
                temporal_consistency: 0.0,
                face_quality: evidence.quality_score,
                deepfake_suspicion: evidence.suspicion,
                heuristic_evidence: 0,
                decision_path: DecisionPath::ContentFallback,
                base_confidence: indicator,
                confidence_boost: 0.0,
                confidence_cap: cfg.confidence_cap,
                final_confidence: confidence,
                warnings: Vec::new(),
                error: None,
                fallback: true,
            },
        }
    }
}
