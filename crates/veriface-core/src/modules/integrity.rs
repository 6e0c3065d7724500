//! Tamper-evident verification hashing.
//!
//! A verdict is bound to its inputs by hashing one canonical JSON document:
//! a map of `analysis_id`, `file_hash`, `detection_result`, `metadata` and
//! `timestamp`, with object keys sorted at every level and no whitespace.
//! The digest is SHA-256 over the UTF-8 bytes, rendered as lowercase hex.

use anyhow::Context;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::domain::{AnalysisOutcome, IntegrityStatus, VerificationRecord};

/// Writes `value` as compact JSON with object keys in lexicographic order.
///
/// Independent of the map ordering the JSON library was built with.
fn write_canonical(out: &mut String, value: &Value) -> serde_json::Result<()> {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&serde_json::to_string(key)?);
                out.push(':');
                write_canonical(out, item)?;
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(out, item)?;
            }
            out.push(']');
        }
        scalar => out.push_str(&serde_json::to_string(scalar)?),
    }
    Ok(())
}

/// Canonical compact JSON with sorted keys.
///
/// # Errors
///
/// Returns an error if a string cannot be encoded.
pub fn canonical_json(value: &Value) -> anyhow::Result<String> {
    let mut out = String::new();
    write_canonical(&mut out, value).context("failed to encode canonical JSON")?;
    Ok(out)
}

/// Current UTC time as RFC 3339.
///
/// # Errors
///
/// Returns an error if the clock value cannot be formatted.
pub fn now_rfc3339() -> anyhow::Result<String> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("failed to format timestamp")
}

/// Digest plus the timestamp that was sealed into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seal {
    /// 64-char lowercase hex SHA-256.
    pub digest: String,
    /// RFC 3339 timestamp included in the digest.
    pub timestamp: String,
}

/// Seals verdicts and re-derives digests to detect tampering.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerificationHasher;

impl VerificationHasher {
    /// Creates a hasher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds the document that gets hashed.
    #[must_use]
    pub fn payload(
        analysis_id: &str,
        file_hash: &str,
        detection_result: &Value,
        metadata: &Value,
        timestamp: &str,
    ) -> Value {
        json!({
            "analysis_id": analysis_id,
            "file_hash": file_hash,
            "detection_result": detection_result,
            "metadata": metadata,
            "timestamp": timestamp,
        })
    }

    /// Digest with an explicit timestamp. Pure: identical inputs give identical digests.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be encoded.
    pub fn seal_at(
        &self,
        analysis_id: &str,
        file_hash: &str,
        detection_result: &Value,
        metadata: &Value,
        timestamp: &str,
    ) -> anyhow::Result<String> {
        let payload = Self::payload(analysis_id, file_hash, detection_result, metadata, timestamp);
        let canonical = canonical_json(&payload)?;
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        Ok(format!("{:x}", hasher.finalize()))
    }

    /// Digest stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamp or payload cannot be encoded.
    pub fn seal(
        &self,
        analysis_id: &str,
        file_hash: &str,
        detection_result: &Value,
        metadata: &Value,
    ) -> anyhow::Result<Seal> {
        let timestamp = now_rfc3339()?;
        let digest = self.seal_at(analysis_id, file_hash, detection_result, metadata, &timestamp)?;
        debug!(analysis_id, %digest, "verdict sealed");
        Ok(Seal { digest, timestamp })
    }

    /// Re-derives the digest and compares it byte for byte.
    ///
    /// Without the sealing timestamp the result is inconclusive.
    #[must_use]
    pub fn status(
        &self,
        analysis_id: &str,
        file_hash: &str,
        digest: &str,
        detection_result: &Value,
        metadata: &Value,
        timestamp: Option<&str>,
    ) -> IntegrityStatus {
        let Some(timestamp) = timestamp.filter(|t| !t.is_empty()) else {
            return IntegrityStatus::Inconclusive("sealing timestamp unavailable".to_string());
        };
        match self.seal_at(analysis_id, file_hash, detection_result, metadata, timestamp) {
            Ok(expected) if expected == digest => IntegrityStatus::Verified,
            Ok(expected) => {
                warn!(analysis_id, %expected, stored = digest, "verification digest mismatch");
                IntegrityStatus::Tampered("verification digest mismatch".to_string())
            }
            Err(e) => {
                warn!(analysis_id, error = %e, "digest re-derivation failed");
                IntegrityStatus::Inconclusive(format!("digest re-derivation failed: {e}"))
            }
        }
    }

    /// Whether the stored fields still match the digest. Only a verified status is `true`.
    #[must_use]
    pub fn check(
        &self,
        analysis_id: &str,
        file_hash: &str,
        digest: &str,
        detection_result: &Value,
        metadata: &Value,
        timestamp: Option<&str>,
    ) -> bool {
        self.status(analysis_id, file_hash, digest, detection_result, metadata, timestamp)
            .is_verified()
    }

    /// Seals an analysis outcome into a persistable record.
    ///
    /// # Errors
    ///
    /// Returns an error if the outcome cannot be serialized or sealed.
    pub fn seal_record(
        &self,
        analysis_id: &str,
        filename: &str,
        file_hash: &str,
        outcome: &AnalysisOutcome,
        metadata: Value,
    ) -> anyhow::Result<VerificationRecord> {
        let analysis_details =
            serde_json::to_value(outcome).context("failed to serialize analysis outcome")?;
        let seal = self.seal(analysis_id, file_hash, &analysis_details, &metadata)?;
        Ok(VerificationRecord {
            analysis_id: analysis_id.to_string(),
            filename: filename.to_string(),
            file_hash: file_hash.to_string(),
            verification_hash: seal.digest,
            is_deepfake: outcome.decision.is_deepfake,
            confidence_score: outcome.decision.confidence,
            analysis_details,
            metadata,
            created_at: seal.timestamp.clone(),
            sealed_at: seal.timestamp,
        })
    }

    /// Checks a stored record: the digest must match, the top-level verdict
    /// fields must agree with the sealed details and `created_at` must equal
    /// the sealing timestamp.
    #[must_use]
    pub fn check_record(&self, record: &VerificationRecord) -> IntegrityStatus {
        let details = &record.analysis_details;
        if details.get("is_deepfake").and_then(Value::as_bool) != Some(record.is_deepfake) {
            warn!(analysis_id = %record.analysis_id, "verdict differs from sealed details");
            return IntegrityStatus::Tampered("verdict differs from sealed details".to_string());
        }
        let sealed_confidence = details.get("confidence").and_then(Value::as_f64);
        if sealed_confidence.map(f64::to_bits) != Some(record.confidence_score.to_bits()) {
            warn!(analysis_id = %record.analysis_id, "confidence differs from sealed details");
            return IntegrityStatus::Tampered("confidence differs from sealed details".to_string());
        }
        if let Some(sealed_name) = record.metadata.get("filename").and_then(Value::as_str) {
            if sealed_name != record.filename {
                warn!(analysis_id = %record.analysis_id, "filename differs from sealed metadata");
                return IntegrityStatus::Tampered("filename differs from sealed metadata".to_string());
            }
        }
        // created_at is written from the sealing timestamp and is not itself hashed
        if !record.sealed_at.is_empty() && record.created_at != record.sealed_at {
            warn!(analysis_id = %record.analysis_id, "creation time differs from sealing timestamp");
            return IntegrityStatus::Tampered(
                "creation time differs from sealing timestamp".to_string(),
            );
        }

        self.status(
            &record.analysis_id,
            &record.file_hash,
            &record.verification_hash,
            &record.analysis_details,
            &record.metadata,
            Some(record.sealed_at.as_str()),
        )
    }
}
