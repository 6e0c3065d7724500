//! Core domain types for deepfake verdicts.

mod analysis;
mod decision;
mod evidence;
mod face;
mod probe;
mod record;
mod scores;
mod temporal;

pub use analysis::{AnalysisMethod, AnalysisOutcome, PredictionStats};
pub use decision::{Contradiction, DecisionFactors, DecisionPath, DecisionResult};
pub use evidence::{ArtifactTag, EvidenceSummary, QualityIssue, QualityReport};
pub use face::FaceSample;
pub use probe::{ArtifactProbe, FaceView, ProbeFinding};
pub use record::{IntegrityStatus, VerificationRecord};
pub use scores::{ModelPredictions, ModelScore, ScoreMatrix};
pub use temporal::{TemporalProfile, Trend};
