//! Configuration file support for veriface.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/veriface/config.toml` (lowest priority)
//! - Project-local: `.veriface.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};
use veriface_core::AnalyzerConfig;

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Face quality and artifact probe settings.
    pub evidence: EvidenceSection,
    /// Temporal consistency settings.
    pub temporal: TemporalSection,
    /// Decision fusion settings.
    pub fusion: FusionSection,
    /// Output formatting settings.
    pub output: OutputSection,
}

/// Evidence extraction configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct EvidenceSection {
    /// Mean brightness below which a face is too dark.
    pub dark_limit: Option<f64>,
    /// Mean brightness above which a face is too bright.
    pub bright_limit: Option<f64>,
    /// Laplacian variance below which a face is blurry.
    pub blur_limit: Option<f64>,
    /// Smallest face area in pixels.
    pub min_face_area: Option<u64>,
    /// Artifact count that saturates suspicion.
    pub suspicion_scale: Option<f64>,
}

/// Temporal analysis configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct TemporalSection {
    /// Half-to-half mean shift reported as a trend.
    pub trend_delta: Option<f64>,
    /// Buckets required before a trend is reported.
    pub min_trend_buckets: Option<usize>,
}

/// Decision fusion configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct FusionSection {
    /// Model score counted as a deepfake vote (0.0-1.0).
    pub vote_threshold: Option<f64>,
    /// Fused score above which the verdict is deepfake (0.0-1.0).
    pub decision_threshold: Option<f64>,
    /// Suspicion the heuristic override must exceed (0.0-1.0).
    pub override_min_suspicion: Option<f64>,
    /// Lowest reportable confidence.
    pub confidence_floor: Option<f64>,
    /// Highest confidence without strong evidence.
    pub confidence_cap: Option<f64>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/veriface/config.toml`
    /// 2. Project-local: `.veriface.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Out-of-range values are reported as
    /// warnings and dropped in favour of the built-in defaults.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        for problem in config.sanitize() {
            eprintln!("warning: {problem}; using the built-in default");
        }

        config
    }

    /// Stage configurations with file values laid over the built-in defaults.
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        let mut cfg = AnalyzerConfig::default();

        let evidence = &self.evidence;
        set(&mut cfg.evidence.dark_limit, evidence.dark_limit);
        set(&mut cfg.evidence.bright_limit, evidence.bright_limit);
        set(&mut cfg.evidence.blur_limit, evidence.blur_limit);
        set(&mut cfg.evidence.min_face_area, evidence.min_face_area);
        set(&mut cfg.evidence.suspicion_scale, evidence.suspicion_scale);

        set(&mut cfg.temporal.trend_delta, self.temporal.trend_delta);
        set(
            &mut cfg.temporal.min_trend_buckets,
            self.temporal.min_trend_buckets,
        );

        let fusion = &self.fusion;
        set(&mut cfg.fusion.vote_threshold, fusion.vote_threshold);
        set(&mut cfg.fusion.decision_threshold, fusion.decision_threshold);
        set(
            &mut cfg.fusion.override_min_suspicion,
            fusion.override_min_suspicion,
        );
        set(&mut cfg.fusion.confidence_floor, fusion.confidence_floor);
        set(&mut cfg.fusion.confidence_cap, fusion.confidence_cap);

        cfg
    }

    /// Drops every value outside its acceptable range so the built-in default
    /// applies instead. Returns one message per dropped setting.
    fn sanitize(&mut self) -> Vec<String> {
        let mut problems = Vec::new();
        let defaults = AnalyzerConfig::default();

        for (key, slot) in [
            ("fusion.vote_threshold", &mut self.fusion.vote_threshold),
            ("fusion.decision_threshold", &mut self.fusion.decision_threshold),
            (
                "fusion.override_min_suspicion",
                &mut self.fusion.override_min_suspicion,
            ),
            ("temporal.trend_delta", &mut self.temporal.trend_delta),
        ] {
            if let Some(v) = slot.filter(|v| !(0.0..=1.0).contains(v)) {
                problems.push(format!("{key} must be 0.0-1.0, got {v}"));
                *slot = None;
            }
        }

        // reported confidence stays within [0.1, 0.99]
        for (key, slot) in [
            ("fusion.confidence_floor", &mut self.fusion.confidence_floor),
            ("fusion.confidence_cap", &mut self.fusion.confidence_cap),
        ] {
            if let Some(v) = slot.filter(|v| !(0.1..=0.99).contains(v)) {
                problems.push(format!("{key} must be 0.1-0.99, got {v}"));
                *slot = None;
            }
        }

        let floor = self
            .fusion
            .confidence_floor
            .unwrap_or(defaults.fusion.confidence_floor);
        let cap = self
            .fusion
            .confidence_cap
            .unwrap_or(defaults.fusion.confidence_cap);
        if floor > cap {
            problems.push(format!(
                "fusion.confidence_floor ({floor}) exceeds fusion.confidence_cap ({cap})"
            ));
            self.fusion.confidence_floor = None;
            self.fusion.confidence_cap = None;
        }

        let dark = self
            .evidence
            .dark_limit
            .unwrap_or(defaults.evidence.dark_limit);
        let bright = self
            .evidence
            .bright_limit
            .unwrap_or(defaults.evidence.bright_limit);
        if dark >= bright {
            problems.push(format!(
                "evidence.dark_limit ({dark}) must be below evidence.bright_limit ({bright})"
            ));
            self.evidence.dark_limit = None;
            self.evidence.bright_limit = None;
        }

        if let Some(scale) = self.evidence.suspicion_scale.filter(|s| *s <= 0.0) {
            problems.push(format!(
                "evidence.suspicion_scale must be positive, got {scale}"
            ));
            self.evidence.suspicion_scale = None;
        }

        problems
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // Evidence
        self.evidence.dark_limit = other.evidence.dark_limit.or(self.evidence.dark_limit);
        self.evidence.bright_limit = other.evidence.bright_limit.or(self.evidence.bright_limit);
        self.evidence.blur_limit = other.evidence.blur_limit.or(self.evidence.blur_limit);
        self.evidence.min_face_area = other
            .evidence
            .min_face_area
            .or(self.evidence.min_face_area);
        self.evidence.suspicion_scale = other
            .evidence
            .suspicion_scale
            .or(self.evidence.suspicion_scale);

        // Temporal
        self.temporal.trend_delta = other.temporal.trend_delta.or(self.temporal.trend_delta);
        self.temporal.min_trend_buckets = other
            .temporal
            .min_trend_buckets
            .or(self.temporal.min_trend_buckets);

        // Fusion
        self.fusion.vote_threshold = other.fusion.vote_threshold.or(self.fusion.vote_threshold);
        self.fusion.decision_threshold = other
            .fusion
            .decision_threshold
            .or(self.fusion.decision_threshold);
        self.fusion.override_min_suspicion = other
            .fusion
            .override_min_suspicion
            .or(self.fusion.override_min_suspicion);
        self.fusion.confidence_floor = other
            .fusion
            .confidence_floor
            .or(self.fusion.confidence_floor);
        self.fusion.confidence_cap = other.fusion.confidence_cap.or(self.fusion.confidence_cap);

        // Output
        self.output.pretty = other.output.pretty.or(self.output.pretty);
    }
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("veriface").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.veriface.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(".veriface.toml"))
        .find(|path| path.exists())
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
