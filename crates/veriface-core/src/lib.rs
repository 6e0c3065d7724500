//! Veriface Core - Deepfake decision fusion and integrity engine
//!
//! This crate contains the domain types, the evidence, temporal, fusion and
//! integrity components, and the ports through which face extraction,
//! classification and persistence are plugged in.

pub mod domain;
pub mod modules;
pub mod pipeline;
pub mod ports;

pub use domain::{
    AnalysisMethod, AnalysisOutcome, ArtifactTag, DecisionFactors, DecisionPath, DecisionResult,
    EvidenceSummary, FaceSample, IntegrityStatus, ModelScore, QualityIssue, QualityReport,
    ScoreMatrix, TemporalProfile, Trend, VerificationRecord,
};
pub use pipeline::{Analyzer, AnalyzerConfig};
pub use ports::{ClassifierOracle, RecordOutput, VideoSource};
