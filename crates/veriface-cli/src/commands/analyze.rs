//! Analyze command - judge extracted faces and seal the verdict.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::{json, Map, Value};
use tracing::{debug, info};
use veriface_adapters::{file_sha256, FsVideoSource, JsonScoreOracle};
use veriface_core::modules::VerificationHasher;
use veriface_core::{
    Analyzer, AnalyzerConfig, ClassifierOracle, FaceSample, RecordOutput, ScoreMatrix,
};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::JsonOutput;

/// Parse and validate a threshold value (0.0-1.0).
fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=1.0"))
    }
}

/// Parse a `KEY=VALUE` context entry.
fn parse_context(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("'{s}' is not in KEY=VALUE form")),
    }
}

/// Arguments for the analyze command.
#[derive(Args, Clone)]
pub struct AnalyzeArgs {
    /// Source video, fingerprinted into the record
    #[arg(long, value_name = "FILE")]
    pub video: PathBuf,

    /// Directory of face crops extracted from the video
    #[arg(long, value_name = "DIR")]
    pub faces: Option<PathBuf>,

    /// Directory of sampled raw frames, judged when no face was found
    #[arg(long, value_name = "DIR")]
    pub frames: Option<PathBuf>,

    /// Classifier score matrix (JSON) for the extracted faces
    #[arg(long, value_name = "FILE")]
    pub scores: Option<PathBuf>,

    /// Context sealed into the record metadata (repeatable)
    #[arg(long = "context", value_name = "KEY=VALUE", value_parser = parse_context)]
    pub context: Vec<(String, String)>,

    /// Analysis identifier (defaults to a random UUID)
    #[arg(long, value_name = "ID")]
    pub analysis_id: Option<String>,

    /// Model score counted as a deepfake vote (0.0-1.0)
    #[arg(long, value_parser = parse_threshold)]
    pub vote_threshold: Option<f64>,

    /// Fused score above which the verdict is deepfake (0.0-1.0)
    #[arg(long, value_parser = parse_threshold)]
    pub decision_threshold: Option<f64>,

    /// Write the record to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Pretty-print the record
    #[arg(long)]
    pub pretty: bool,

    /// Merged config (populated by `with_config`, not from CLI).
    #[arg(skip)]
    config: Option<AppConfig>,
}

impl AnalyzeArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Built-in stage defaults
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        args.vote_threshold = args.vote_threshold.or(config.fusion.vote_threshold);
        args.decision_threshold = args
            .decision_threshold
            .or(config.fusion.decision_threshold);

        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }

        args.config = Some(config.clone());
        args
    }

    /// Stage configuration after layering.
    fn analyzer_config(&self) -> AnalyzerConfig {
        let mut cfg = self
            .config
            .as_ref()
            .map(AppConfig::analyzer_config)
            .unwrap_or_default();
        if let Some(t) = self.vote_threshold {
            cfg.fusion.vote_threshold = t;
        }
        if let Some(t) = self.decision_threshold {
            cfg.fusion.decision_threshold = t;
        }
        cfg
    }

    /// Analysis id, generated when not given.
    fn analysis_id(&self) -> String {
        self.analysis_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
    }

    /// File name recorded for the video.
    fn filename(&self) -> String {
        self.video
            .file_name()
            .map_or_else(
                || self.video.display().to_string(),
                |n| n.to_string_lossy().into_owned(),
            )
    }

    /// Sealed metadata: the file name plus any `--context` entries.
    fn metadata(&self) -> Value {
        let context: Map<String, Value> = self
            .context
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        json!({
            "filename": self.filename(),
            "context": context,
        })
    }
}

/// Stand-in classifier when no score matrix was supplied.
struct MissingScores;

impl ClassifierOracle for MissingScores {
    fn score(&self, faces: &[FaceSample]) -> Result<ScoreMatrix> {
        anyhow::bail!(
            "{} faces were extracted but no --scores file was given",
            faces.len()
        )
    }
}

/// Result of running the analyze command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct AnalyzeResult {
    /// Identifier of the sealed record.
    pub analysis_id: String,
    /// Verdict.
    pub is_deepfake: bool,
    /// Verdict confidence.
    pub confidence: f64,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the analyze command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &AnalyzeArgs) -> Result<AnalyzeResult> {
    let analysis_id = args.analysis_id();
    anyhow::ensure!(!analysis_id.trim().is_empty(), "--analysis-id must not be empty");
    info!("Analyzing {} as {analysis_id}", args.video.display());

    let file_hash = file_sha256(&args.video).context("Failed to fingerprint video")?;
    debug!("Video fingerprint: {file_hash}");

    let source = FsVideoSource::new(args.faces.clone(), args.frames.clone());
    let analyzer = Analyzer::new(args.analyzer_config());
    let outcome = match &args.scores {
        Some(path) => analyzer.run(&source, &JsonScoreOracle::from_path(path)?)?,
        None => analyzer.run(&source, &MissingScores)?,
    };
    info!(
        "Verdict: {} ({:.2}) via {:?}",
        outcome.decision.label(),
        outcome.decision.confidence,
        outcome.decision.factors.decision_path
    );

    let record = VerificationHasher.seal_record(
        &analysis_id,
        &args.filename(),
        &file_hash,
        &outcome,
        args.metadata(),
    )?;

    let output = match &args.output {
        Some(path) => JsonOutput::file(path, args.pretty)?,
        None => JsonOutput::stdout(args.pretty),
    };
    output.write(&record)?;
    output.flush()?;

    let exit_code = if record.is_deepfake {
        ExitCode::Flagged
    } else {
        ExitCode::Success
    };

    Ok(AnalyzeResult {
        analysis_id,
        is_deepfake: record.is_deepfake,
        confidence: record.confidence_score,
        exit_code,
    })
}
