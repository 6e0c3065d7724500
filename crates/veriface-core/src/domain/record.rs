//! Persisted verification records and integrity status.

use serde::{Deserialize, Serialize};

/// Record certifying one analysis, as handed to the persistence layer.
///
/// `analysis_details`, `metadata` and `sealed_at` are stored verbatim so the
/// verification hash can be re-derived later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Unique analysis identifier.
    pub analysis_id: String,
    /// Original file name of the analyzed video.
    pub filename: String,
    /// SHA-256 of the video content.
    pub file_hash: String,
    /// Tamper-evident digest over the sealed fields.
    pub verification_hash: String,
    /// Verdict.
    pub is_deepfake: bool,
    /// Verdict confidence.
    pub confidence_score: f64,
    /// Sealed detection payload.
    pub analysis_details: serde_json::Value,
    /// Sealed contextual metadata.
    #[serde(default)]
    pub metadata: serde_json::Value,
    /// Timestamp stamped into the digest (RFC 3339). Empty on records sealed without one.
    #[serde(default)]
    pub sealed_at: String,
    /// Record creation time (RFC 3339).
    pub created_at: String,
}

/// Outcome of re-deriving a verification hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum IntegrityStatus {
    /// Digest matches the stored fields.
    Verified,
    /// Digest or record fields disagree.
    Tampered(String),
    /// Not enough sealed input to decide; never counts as verified.
    Inconclusive(String),
}

impl IntegrityStatus {
    /// Only a matching digest counts as verified.
    #[must_use]
    pub const fn is_verified(&self) -> bool {
        matches!(self, Self::Verified)
    }
}
