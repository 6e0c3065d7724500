//! Quality and artifact findings produced by the evidence extractors.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A capture-quality problem found on a face region.
///
/// Quality issues lower trust in the classifier but are not deepfake evidence.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityIssue {
    /// Mean luminance below the dark limit.
    LowBrightness,
    /// Mean luminance above the bright limit.
    HighBrightness,
    /// Luminance standard deviation below the contrast limit.
    LowContrast,
    /// Laplacian variance below the sharpness limit.
    Blurry,
    /// Face crop smaller than the minimum area.
    SmallFace,
    /// The face could not be assessed.
    AssessmentError,
    /// No faces were available to assess.
    NoFaces,
}

/// A heuristic signature commonly left behind by face synthesis.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactTag {
    /// Edge response variance far above natural footage.
    UnnaturalSharpness,
    /// Saturation or chroma spread too wide.
    ColorInconsistency,
    /// Edge pixel density too high.
    UnnaturalEdges,
    /// Edge pixel density too low.
    OverSmoothed,
    /// Spectral energy concentrated in the central band.
    FrequencyArtifacts,
    /// Luminance variance too low.
    UniformTexture,
    /// Luminance variance too high.
    InconsistentTexture,
}

impl ArtifactTag {
    /// Stable snake_case name, matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnnaturalSharpness => "unnatural_sharpness",
            Self::ColorInconsistency => "color_inconsistency",
            Self::UnnaturalEdges => "unnatural_edges",
            Self::OverSmoothed => "over_smoothed",
            Self::FrequencyArtifacts => "frequency_artifacts",
            Self::UniformTexture => "uniform_texture",
            Self::InconsistentTexture => "inconsistent_texture",
        }
    }
}

/// Findings for a single face sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// Source frame of the assessed face.
    pub frame_index: usize,
    /// Quality score (0.0-1.0) after the artifact penalty.
    pub quality_score: f64,
    /// Capture-quality issues.
    pub issues: BTreeSet<QualityIssue>,
    /// Distinct artifact signatures on this face.
    pub artifacts: BTreeSet<ArtifactTag>,
    /// Raw measurements keyed by metric name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metrics: BTreeMap<String, f64>,
}

impl QualityReport {
    /// Neutral report used when a face cannot be processed.
    #[must_use]
    pub fn assessment_error(frame_index: usize) -> Self {
        Self {
            frame_index,
            quality_score: 0.5,
            issues: BTreeSet::from([QualityIssue::AssessmentError]),
            artifacts: BTreeSet::new(),
            metrics: BTreeMap::new(),
        }
    }

    /// Whether this report is the neutral error placeholder.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.issues.contains(&QualityIssue::AssessmentError)
    }
}

/// Evidence aggregated over every face of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceSummary {
    /// Mean per-face quality score.
    pub quality_score: f64,
    /// Union of quality issues.
    pub issues: BTreeSet<QualityIssue>,
    /// Union of artifact tags.
    pub artifacts: BTreeSet<ArtifactTag>,
    /// Artifact suspicion (0.0-1.0).
    pub suspicion: f64,
    /// Number of faces assessed.
    pub face_count: usize,
    /// Per-face reports in input order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reports: Vec<QualityReport>,
}

impl EvidenceSummary {
    /// Summary for an analysis without faces.
    #[must_use]
    pub fn no_faces() -> Self {
        Self {
            quality_score: 0.0,
            issues: BTreeSet::from([QualityIssue::NoFaces]),
            artifacts: BTreeSet::new(),
            suspicion: 0.0,
            face_count: 0,
            reports: Vec::new(),
        }
    }

    /// Builds a summary straight from aggregate values, without per-face reports.
    #[must_use]
    pub fn from_parts(
        quality_score: f64,
        artifacts: impl IntoIterator<Item = ArtifactTag>,
        suspicion: f64,
    ) -> Self {
        Self {
            quality_score,
            issues: BTreeSet::new(),
            artifacts: artifacts.into_iter().collect(),
            suspicion,
            face_count: 0,
            reports: Vec::new(),
        }
    }

    /// Count of distinct artifact signatures across all faces.
    #[must_use]
    pub fn heuristic_evidence(&self) -> usize {
        self.artifacts.len()
    }
}
