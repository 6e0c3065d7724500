//! Evidence extraction module.
//!
//! Measures capture quality of each face and runs artifact probes that look
//! for signatures commonly left behind by face synthesis. Per-face findings
//! are aggregated into an artifact suspicion score.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::Context;
use tracing::{debug, warn};

use super::imaging::{self, Histogram, MIN_DIMENSION};
use crate::domain::{
    ArtifactProbe, ArtifactTag, EvidenceSummary, FaceSample, FaceView, ProbeFinding, QualityIssue,
    QualityReport,
};

/// Configuration for evidence extraction.
#[derive(Debug, Clone)]
pub struct EvidenceConfig {
    /// Mean luminance below this is `low_brightness`.
    pub dark_limit: f64,
    /// Mean luminance above this is `high_brightness`.
    pub bright_limit: f64,
    /// Luminance standard deviation below this is `low_contrast`.
    pub contrast_limit: f64,
    /// Laplacian variance below this is `blurry`.
    pub blur_limit: f64,
    /// Face area (square pixels) below this is `small_face`.
    pub min_face_area: u64,
    /// Brightness giving a unit quality factor.
    pub brightness_reference: f64,
    /// Contrast giving a unit quality factor.
    pub contrast_reference: f64,
    /// Sharpness giving a unit quality factor.
    pub sharpness_reference: f64,
    /// Laplacian variance above this is `unnatural_sharpness`.
    pub sharpness_artifact_limit: f64,
    /// Saturation or Lab `a` standard deviation above this is `color_inconsistency`.
    pub color_spread_limit: f64,
    /// Canny hysteresis thresholds (low, high).
    pub canny_thresholds: (f64, f64),
    /// Edge density above this is `unnatural_edges`.
    pub edge_density_high: f64,
    /// Edge density below this is `over_smoothed`.
    pub edge_density_low: f64,
    /// Central spectral energy share above this is `frequency_artifacts`.
    pub spectral_ratio_limit: f64,
    /// Luminance variance below this is `uniform_texture`.
    pub texture_variance_low: f64,
    /// Luminance variance above this is `inconsistent_texture`.
    pub texture_variance_high: f64,
    /// Quality deducted per distinct artifact on a face.
    pub artifact_penalty: f64,
    /// Distinct artifact count that saturates suspicion.
    pub suspicion_scale: f64,
}

impl Default for EvidenceConfig {
    fn default() -> Self {
        Self {
            dark_limit: 50.0,
            bright_limit: 200.0,
            contrast_limit: 20.0,
            blur_limit: 100.0,
            min_face_area: 10_000,
            brightness_reference: 128.0,
            contrast_reference: 50.0,
            sharpness_reference: 500.0,
            sharpness_artifact_limit: 2000.0,
            color_spread_limit: 80.0,
            canny_thresholds: (50.0, 150.0),
            edge_density_high: 0.3,
            edge_density_low: 0.05,
            spectral_ratio_limit: 0.4,
            texture_variance_low: 200.0,
            texture_variance_high: 2000.0,
            artifact_penalty: 0.1,
            suspicion_scale: 5.0,
        }
    }
}

/// Flags edge response variance far above natural footage.
#[derive(Debug, Clone)]
pub struct SharpnessProbe {
    limit: f64,
}

impl ArtifactProbe for SharpnessProbe {
    fn name(&self) -> &'static str {
        "sharpness"
    }

    fn probe(&self, view: &FaceView<'_>) -> anyhow::Result<ProbeFinding> {
        Ok(ProbeFinding {
            metric: "laplacian_variance",
            value: view.sharpness,
            tag: (view.sharpness > self.limit).then_some(ArtifactTag::UnnaturalSharpness),
        })
    }
}

/// Flags saturation or chroma spread that is too wide.
#[derive(Debug, Clone)]
pub struct ColorProbe {
    limit: f64,
}

impl ArtifactProbe for ColorProbe {
    fn name(&self) -> &'static str {
        "color"
    }

    fn probe(&self, view: &FaceView<'_>) -> anyhow::Result<ProbeFinding> {
        let (_, sat_var) = imaging::mean_variance(&imaging::saturation_values(&view.rgb));
        let (_, a_var) = imaging::mean_variance(&imaging::lab_a_values(&view.rgb));
        let spread = sat_var.sqrt().max(a_var.sqrt());
        anyhow::ensure!(spread.is_finite(), "color spread is not finite");
        Ok(ProbeFinding {
            metric: "color_spread",
            value: spread,
            tag: (spread > self.limit).then_some(ArtifactTag::ColorInconsistency),
        })
    }
}

/// Flags edge pixel density outside the natural band.
#[derive(Debug, Clone)]
pub struct EdgeProbe {
    thresholds: (f64, f64),
    low: f64,
    high: f64,
}

impl ArtifactProbe for EdgeProbe {
    fn name(&self) -> &'static str {
        "edges"
    }

    fn probe(&self, view: &FaceView<'_>) -> anyhow::Result<ProbeFinding> {
        let density = imaging::edge_density(&view.luma, self.thresholds.0, self.thresholds.1);
        let tag = if density > self.high {
            Some(ArtifactTag::UnnaturalEdges)
        } else if density < self.low {
            Some(ArtifactTag::OverSmoothed)
        } else {
            None
        };
        Ok(ProbeFinding {
            metric: "edge_density",
            value: density,
            tag,
        })
    }
}

/// Flags spectra whose energy piles up in the central band.
#[derive(Debug, Clone)]
pub struct SpectralProbe {
    limit: f64,
}

impl ArtifactProbe for SpectralProbe {
    fn name(&self) -> &'static str {
        "spectral"
    }

    fn probe(&self, view: &FaceView<'_>) -> anyhow::Result<ProbeFinding> {
        let ratio = imaging::central_energy_ratio(&view.luma);
        anyhow::ensure!(ratio.is_finite(), "spectral ratio is not finite");
        Ok(ProbeFinding {
            metric: "spectral_ratio",
            value: ratio,
            tag: (ratio > self.limit).then_some(ArtifactTag::FrequencyArtifacts),
        })
    }
}

/// Flags luminance variance that is too flat or too noisy.
#[derive(Debug, Clone)]
pub struct TextureProbe {
    low: f64,
    high: f64,
}

impl ArtifactProbe for TextureProbe {
    fn name(&self) -> &'static str {
        "texture"
    }

    fn probe(&self, view: &FaceView<'_>) -> anyhow::Result<ProbeFinding> {
        let variance = view.contrast * view.contrast;
        let tag = if variance < self.low {
            Some(ArtifactTag::UniformTexture)
        } else if variance > self.high {
            Some(ArtifactTag::InconsistentTexture)
        } else {
            None
        };
        Ok(ProbeFinding {
            metric: "texture_variance",
            value: variance,
            tag,
        })
    }
}

/// Per-face quality assessment and artifact aggregation.
pub struct EvidenceExtractor {
    config: EvidenceConfig,
    probes: Vec<Box<dyn ArtifactProbe>>,
}

impl EvidenceExtractor {
    /// Creates an extractor with the standard artifact probes.
    #[must_use]
    pub fn new(config: EvidenceConfig) -> Self {
        let probes: Vec<Box<dyn ArtifactProbe>> = vec![
            Box::new(SharpnessProbe {
                limit: config.sharpness_artifact_limit,
            }),
            Box::new(ColorProbe {
                limit: config.color_spread_limit,
            }),
            Box::new(EdgeProbe {
                thresholds: config.canny_thresholds,
                low: config.edge_density_low,
                high: config.edge_density_high,
            }),
            Box::new(SpectralProbe {
                limit: config.spectral_ratio_limit,
            }),
            Box::new(TextureProbe {
                low: config.texture_variance_low,
                high: config.texture_variance_high,
            }),
        ];
        Self { config, probes }
    }

    /// Adds another probe after the standard ones.
    #[must_use]
    pub fn with_probe(mut self, probe: Box<dyn ArtifactProbe>) -> Self {
        self.probes.push(probe);
        self
    }

    /// Returns the configuration in use.
    #[must_use]
    pub const fn config(&self) -> &EvidenceConfig {
        &self.config
    }

    /// Names of the registered probes, in run order.
    #[must_use]
    pub fn probe_names(&self) -> Vec<&'static str> {
        self.probes.iter().map(|p| p.name()).collect()
    }

    /// Assesses one face. A face that cannot be measured yields a neutral error report.
    #[must_use]
    pub fn assess(&self, face: &FaceSample) -> QualityReport {
        match self.try_assess(face) {
            Ok(report) => report,
            Err(e) => {
                warn!(frame = face.frame_index, error = %e, "face assessment failed");
                QualityReport::assessment_error(face.frame_index)
            }
        }
    }

    /// Assesses every face in order.
    #[must_use]
    pub fn assess_all(&self, faces: &[FaceSample]) -> Vec<QualityReport> {
        faces.iter().map(|face| self.assess(face)).collect()
    }

    /// Folds per-face reports into one summary.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn aggregate(&self, reports: Vec<QualityReport>) -> EvidenceSummary {
        if reports.is_empty() {
            return EvidenceSummary::no_faces();
        }

        let quality_score =
            reports.iter().map(|r| r.quality_score).sum::<f64>() / reports.len() as f64;
        let issues: BTreeSet<QualityIssue> =
            reports.iter().flat_map(|r| r.issues.iter().copied()).collect();
        let artifacts: BTreeSet<ArtifactTag> = reports
            .iter()
            .flat_map(|r| r.artifacts.iter().copied())
            .collect();
        let suspicion = (artifacts.len() as f64 / self.config.suspicion_scale).clamp(0.0, 1.0);

        debug!(
            faces = reports.len(),
            quality = quality_score,
            artifacts = artifacts.len(),
            suspicion,
            "evidence aggregated"
        );

        EvidenceSummary {
            quality_score,
            issues,
            artifacts,
            suspicion,
            face_count: reports.len(),
            reports,
        }
    }

    /// Assesses and aggregates in one step.
    #[must_use]
    pub fn summarize(&self, faces: &[FaceSample]) -> EvidenceSummary {
        self.aggregate(self.assess_all(faces))
    }

    fn try_assess(&self, face: &FaceSample) -> anyhow::Result<QualityReport> {
        let cfg = &self.config;
        let rgb = face.image.to_rgb8();
        anyhow::ensure!(
            rgb.width() >= MIN_DIMENSION && rgb.height() >= MIN_DIMENSION,
            "face crop {}x{} is too small to measure",
            rgb.width(),
            rgb.height()
        );

        let luma = imaging::luma_plane(&rgb);
        let histogram = Histogram::from_luma(&luma);
        let brightness = histogram.mean();
        let contrast = histogram.std_dev();
        let sharpness = imaging::laplacian_variance(&luma)
            .context("laplacian response unavailable")?;

        let mut issues = BTreeSet::new();
        if brightness < cfg.dark_limit {
            issues.insert(QualityIssue::LowBrightness);
        } else if brightness > cfg.bright_limit {
            issues.insert(QualityIssue::HighBrightness);
        }
        if contrast < cfg.contrast_limit {
            issues.insert(QualityIssue::LowContrast);
        }
        if sharpness < cfg.blur_limit {
            issues.insert(QualityIssue::Blurry);
        }
        if face.area() < cfg.min_face_area {
            issues.insert(QualityIssue::SmallFace);
        }

        let base_quality = ((brightness / cfg.brightness_reference)
            * (contrast / cfg.contrast_reference)
            * (sharpness / cfg.sharpness_reference))
            .clamp(0.0, 1.0);

        #[allow(clippy::cast_precision_loss)]
        let mut metrics = BTreeMap::from([
            ("brightness".to_string(), brightness),
            ("contrast".to_string(), contrast),
            ("area".to_string(), face.area() as f64),
            ("base_quality".to_string(), base_quality),
        ]);

        let view = FaceView {
            face,
            luma,
            rgb,
            brightness,
            contrast,
            sharpness,
        };
        let mut artifacts = BTreeSet::new();
        for probe in &self.probes {
            let finding = probe
                .probe(&view)
                .with_context(|| format!("{} probe failed", probe.name()))?;
            metrics.insert(finding.metric.to_string(), finding.value);
            artifacts.extend(finding.tag);
        }

        #[allow(clippy::cast_precision_loss)]
        let penalty = cfg.artifact_penalty * artifacts.len() as f64;
        let quality_score = (base_quality - penalty).max(0.0);

        debug!(
            frame = face.frame_index,
            quality = quality_score,
            issues = issues.len(),
            artifacts = artifacts.len(),
            "face assessed"
        );

        Ok(QualityReport {
            frame_index: face.frame_index,
            quality_score,
            issues,
            artifacts,
            metrics,
        })
    }
}

impl Default for EvidenceExtractor {
    fn default() -> Self {
        Self::new(EvidenceConfig::default())
    }
}

impl std::fmt::Debug for EvidenceExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvidenceExtractor")
            .field("config", &self.config)
            .field("probes", &self.probe_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};

    fn flat_face(value: u8, size: u32) -> FaceSample {
        FaceSample::new(
            0,
            DynamicImage::ImageRgb8(RgbImage::from_pixel(size, size, Rgb([value; 3]))),
        )
    }

    /// Deterministic pseudo-random gray texture with moderate spread.
    fn textured_face(size: u32) -> FaceSample {
        let mut state: u32 = 0x9e37_79b9;
        let img = RgbImage::from_fn(size, size, |_, _| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            #[allow(clippy::cast_possible_truncation)]
            let v = 88 + (state % 80) as u8;
            Rgb([v, v, v])
        });
        FaceSample::new(1, DynamicImage::ImageRgb8(img))
    }

    /// Full-range gray noise.
    fn noise_face(size: u32) -> FaceSample {
        let mut state: u32 = 0x2545_f491;
        let img = RgbImage::from_fn(size, size, |_, _| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let v = state.to_le_bytes()[0];
            Rgb([v, v, v])
        });
        FaceSample::new(2, DynamicImage::ImageRgb8(img))
    }

    fn block_face(size: u32, cell: u32) -> FaceSample {
        let img = RgbImage::from_fn(size, size, |x, y| {
            Rgb([if (x / cell + y / cell) % 2 == 0 { 0 } else { 255 }; 3])
        });
        FaceSample::new(3, DynamicImage::ImageRgb8(img))
    }

    /// Left half pure red, right half pure green.
    fn split_face(size: u32) -> FaceSample {
        let img = RgbImage::from_fn(size, size, |x, _| {
            if x < size / 2 {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 255, 0])
            }
        });
        FaceSample::new(4, DynamicImage::ImageRgb8(img))
    }

    struct FailingProbe;

    impl ArtifactProbe for FailingProbe {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn probe(&self, _view: &FaceView<'_>) -> anyhow::Result<ProbeFinding> {
            anyhow::bail!("sensor offline")
        }
    }

    #[test]
    fn test_default_config() {
        let config = EvidenceConfig::default();
        assert!((config.dark_limit - 50.0).abs() < f64::EPSILON);
        assert_eq!(config.min_face_area, 10_000);
        assert!((config.suspicion_scale - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_probe_names() {
        let extractor = EvidenceExtractor::default();
        assert_eq!(
            extractor.probe_names(),
            vec!["sharpness", "color", "edges", "spectral", "texture"]
        );
    }

    #[test]
    fn test_flat_face_issues_and_artifacts() {
        let report = EvidenceExtractor::default().assess(&flat_face(128, 120));
        assert!(report.issues.contains(&QualityIssue::LowContrast));
        assert!(report.issues.contains(&QualityIssue::Blurry));
        assert!(!report.issues.contains(&QualityIssue::SmallFace));
        assert!(report.artifacts.contains(&ArtifactTag::UniformTexture));
        assert!(report.artifacts.contains(&ArtifactTag::OverSmoothed));
        assert!(report.artifacts.contains(&ArtifactTag::FrequencyArtifacts));
        assert!(!report.artifacts.contains(&ArtifactTag::ColorInconsistency));
        assert!(report.quality_score.abs() < f64::EPSILON);
    }

    #[test]
    fn test_brightness_issues() {
        let extractor = EvidenceExtractor::default();
        let dark = extractor.assess(&flat_face(10, 120));
        assert!(dark.issues.contains(&QualityIssue::LowBrightness));
        let bright = extractor.assess(&flat_face(240, 120));
        assert!(bright.issues.contains(&QualityIssue::HighBrightness));
    }

    #[test]
    fn test_small_face() {
        let report = EvidenceExtractor::default().assess(&flat_face(128, 50));
        assert!(report.issues.contains(&QualityIssue::SmallFace));
    }

    #[test]
    fn test_textured_face_is_sharp() {
        let report = EvidenceExtractor::default().assess(&textured_face(120));
        assert!(!report.issues.contains(&QualityIssue::Blurry));
        assert!(!report.issues.contains(&QualityIssue::LowContrast));
        assert!(report.metrics.contains_key("edge_density"));
        assert!((0.0..=1.0).contains(&report.quality_score));
    }

    #[test]
    fn test_noise_is_sharp_and_inconsistent() {
        let report = EvidenceExtractor::default().assess(&noise_face(64));
        assert!(!report.is_error());
        assert!(report.artifacts.contains(&ArtifactTag::UnnaturalSharpness));
        assert!(report.artifacts.contains(&ArtifactTag::InconsistentTexture));
        assert!(!report.artifacts.contains(&ArtifactTag::OverSmoothed));
        assert!(report.metrics["laplacian_variance"] > 2000.0);
        assert!(report.metrics["texture_variance"] > 2000.0);
    }

    #[test]
    fn test_block_pattern_has_unnatural_edges() {
        let report = EvidenceExtractor::default().assess(&block_face(128, 4));
        assert!(report.artifacts.contains(&ArtifactTag::UnnaturalEdges));
        assert!(report.metrics["edge_density"] > 0.3);
    }

    #[test]
    fn test_red_green_split_is_color_inconsistent() {
        let report = EvidenceExtractor::default().assess(&split_face(64));
        assert!(report.artifacts.contains(&ArtifactTag::ColorInconsistency));
        let spread = report.metrics["color_spread"];
        assert!(spread > 80.0 && spread < 90.0, "spread {spread}");
    }

    #[test]
    fn test_artifact_penalty_on_positive_base_quality() {
        let report = EvidenceExtractor::default().assess(&noise_face(64));
        let base = report.metrics["base_quality"];
        assert!(base > 0.0);
        assert!(!report.artifacts.is_empty());

        #[allow(clippy::cast_precision_loss)]
        let expected = (base - 0.1 * report.artifacts.len() as f64).max(0.0);
        assert!((report.quality_score - expected).abs() < 1e-12);
        assert!(report.quality_score > 0.0);
        assert!(report.quality_score < base);
    }

    #[test]
    fn test_tiny_face_yields_error_report() {
        let report = EvidenceExtractor::default().assess(&flat_face(128, 2));
        assert!(report.is_error());
        assert!((report.quality_score - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_failing_probe_is_contained() {
        let extractor = EvidenceExtractor::default().with_probe(Box::new(FailingProbe));
        let reports = extractor.assess_all(&[flat_face(128, 120), textured_face(64)]);
        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(QualityReport::is_error));
    }

    #[test]
    fn test_aggregate_empty() {
        let summary = EvidenceExtractor::default().aggregate(Vec::new());
        assert!(summary.quality_score.abs() < f64::EPSILON);
        assert!(summary.issues.contains(&QualityIssue::NoFaces));
        assert!(summary.suspicion.abs() < f64::EPSILON);
    }

    #[test]
    fn test_aggregate_union_and_suspicion() {
        let mut a = QualityReport::assessment_error(0);
        a.quality_score = 0.2;
        a.artifacts = BTreeSet::from([ArtifactTag::UniformTexture, ArtifactTag::OverSmoothed]);
        let mut b = QualityReport::assessment_error(1);
        b.quality_score = 0.6;
        b.artifacts = BTreeSet::from([
            ArtifactTag::OverSmoothed,
            ArtifactTag::FrequencyArtifacts,
        ]);

        let summary = EvidenceExtractor::default().aggregate(vec![a, b]);
        assert!((summary.quality_score - 0.4).abs() < 1e-12);
        assert_eq!(summary.heuristic_evidence(), 3);
        assert!((summary.suspicion - 0.6).abs() < 1e-12);
        assert_eq!(summary.face_count, 2);
    }

    #[test]
    fn test_suspicion_saturates() {
        let mut report = QualityReport::assessment_error(0);
        report.artifacts = BTreeSet::from([
            ArtifactTag::UnnaturalSharpness,
            ArtifactTag::ColorInconsistency,
            ArtifactTag::UnnaturalEdges,
            ArtifactTag::FrequencyArtifacts,
            ArtifactTag::InconsistentTexture,
            ArtifactTag::OverSmoothed,
        ]);
        let summary = EvidenceExtractor::default().aggregate(vec![report]);
        assert!((summary.suspicion - 1.0).abs() < f64::EPSILON);
    }
}
