//! Temporal consistency analysis.
//!
//! Buckets the flat per-face probability sequence by sampled frame and measures
//! how much the classifier's opinion moves between frames.

use tracing::debug;

use super::imaging::mean_variance;
use crate::domain::{TemporalProfile, Trend};

/// Configuration for temporal analysis.
#[derive(Debug, Clone)]
pub struct TemporalConfig {
    /// Half-to-half mean shift that counts as a trend.
    pub trend_delta: f64,
    /// Buckets required before a trend is reported.
    pub min_trend_buckets: usize,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            trend_delta: 0.1,
            min_trend_buckets: 3,
        }
    }
}

/// Stability analyzer for per-frame classifier opinion.
#[derive(Debug, Clone, Default)]
pub struct TemporalAnalyzer {
    config: TemporalConfig,
}

impl TemporalAnalyzer {
    /// Creates an analyzer with the given configuration.
    #[must_use]
    pub const fn new(config: TemporalConfig) -> Self {
        Self { config }
    }

    /// Profiles a flat probability sequence split into `face_count` frame buckets.
    ///
    /// Never fails; degenerate input produces [`TemporalProfile::neutral`].
    #[must_use]
    pub fn analyze(&self, probabilities: &[f64], face_count: usize) -> TemporalProfile {
        match self.try_analyze(probabilities, face_count) {
            Some(profile) => profile,
            None => {
                debug!(
                    len = probabilities.len(),
                    face_count, "insufficient temporal signal, using neutral profile"
                );
                TemporalProfile::neutral()
            }
        }
    }

    fn try_analyze(&self, probabilities: &[f64], face_count: usize) -> Option<TemporalProfile> {
        if face_count == 0 {
            return None;
        }
        let bucket = probabilities.len() / face_count;
        if bucket == 0 || probabilities.iter().any(|p| !p.is_finite()) {
            return None;
        }

        let frame_means: Vec<f64> = probabilities
            .chunks(bucket)
            .map(|chunk| mean_variance(chunk).0)
            .collect();
        if frame_means.len() < 2 {
            return None;
        }

        let (_, variance) = mean_variance(&frame_means);
        let consistency_score = (1.0 - variance).max(0.0);
        let trend = self.trend(&frame_means);

        debug!(
            buckets = frame_means.len(),
            variance,
            consistency = consistency_score,
            ?trend,
            "temporal profile computed"
        );

        Some(TemporalProfile {
            consistency_score,
            variance,
            trend,
            frame_means,
        })
    }

    fn trend(&self, means: &[f64]) -> Trend {
        if means.len() < self.config.min_trend_buckets {
            return Trend::Stable;
        }
        let (first, second) = means.split_at(means.len() / 2);
        let delta = mean_variance(second).0 - mean_variance(first).0;
        if delta > self.config.trend_delta {
            Trend::Increasing
        } else if delta < -self.config.trend_delta {
            Trend::Decreasing
        } else {
            Trend::Stable
        }
    }
}
