//! Temporal stability of classifier opinion across sampled frames.

use serde::{Deserialize, Serialize};

/// Direction of classifier opinion over the course of the video.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// Later frames look more synthetic.
    Increasing,
    /// Later frames look less synthetic.
    Decreasing,
    /// No meaningful drift.
    #[default]
    Stable,
}

/// Stability summary of per-frame classifier scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalProfile {
    /// 0.0-1.0, higher means more stable.
    pub consistency_score: f64,
    /// Population variance of per-frame means.
    pub variance: f64,
    /// Drift between first and second half of the frames.
    pub trend: Trend,
    /// Mean probability per sampled frame.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frame_means: Vec<f64>,
}

impl TemporalProfile {
    /// Profile reported when there is not enough signal.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            consistency_score: 0.5,
            variance: 0.0,
            trend: Trend::Stable,
            frame_means: Vec::new(),
        }
    }

    /// Profile with the given consistency and no frame detail.
    #[must_use]
    pub const fn with_consistency(consistency_score: f64) -> Self {
        Self {
            consistency_score,
            variance: 0.0,
            trend: Trend::Stable,
            frame_means: Vec::new(),
        }
    }
}

impl Default for TemporalProfile {
    fn default() -> Self {
        Self::neutral()
    }
}
