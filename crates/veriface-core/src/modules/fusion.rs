//! Decision fusion module.
//!
//! Reconciles the classifier ensemble with artifact evidence and temporal
//! stability, producing a bounded confidence and a full factor breakdown.
//!
//! The decision proceeds in three stages:
//! - base verdict (heuristic override, weighted blend, or model-only)
//! - additive confidence adjustments (tiered boosts and penalties)
//! - clamping to `[confidence_floor, cap]`, where the cap rises with strong evidence

use tracing::{debug, warn};

use crate::domain::{
    Contradiction, DecisionFactors, DecisionPath, DecisionResult, EvidenceSummary, ModelScore,
    TemporalProfile,
};

/// One step of a tiered adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    /// Boundary compared against the signal.
    pub threshold: f64,
    /// Confidence added (boosts) or removed (penalties) when the tier applies.
    pub delta: f64,
}

impl Tier {
    /// Creates a tier.
    #[must_use]
    pub const fn new(threshold: f64, delta: f64) -> Self {
        Self { threshold, delta }
    }
}

/// First tier whose threshold the value exceeds.
fn first_above(tiers: &[Tier], value: f64) -> f64 {
    tiers
        .iter()
        .find(|t| value > t.threshold)
        .map_or(0.0, |t| t.delta)
}

/// First tier whose threshold the value falls below.
fn first_below(tiers: &[Tier], value: f64) -> f64 {
    tiers
        .iter()
        .find(|t| value < t.threshold)
        .map_or(0.0, |t| t.delta)
}

/// Thresholds and weights of the fusion algorithm.
///
/// Tier lists are checked in order and only the first matching tier applies,
/// so they are listed from strictest to loosest.
#[derive(Debug, Clone)]
pub struct FusionPolicy {
    /// Model score above which a model votes "deepfake".
    pub vote_threshold: f64,
    /// Fused score above which the verdict is "deepfake".
    pub decision_threshold: f64,
    /// Minimum distinct artifacts for the heuristic override.
    pub override_min_evidence: usize,
    /// Suspicion the override must exceed.
    pub override_min_suspicion: f64,
    /// Override base confidence intercept.
    pub override_base: f64,
    /// Override base confidence slope over suspicion.
    pub override_slope: f64,
    /// Minimum distinct artifacts for the weighted blend.
    pub blend_min_evidence: usize,
    /// Suspicion the blend must exceed.
    pub blend_min_suspicion: f64,
    /// Weight of suspicion in the blend; the model mean gets the rest.
    pub blend_suspicion_weight: f64,
    /// Boosts by model agreement.
    pub agreement_tiers: Vec<Tier>,
    /// Boosts by face quality.
    pub quality_tiers: Vec<Tier>,
    /// Boosts by temporal consistency.
    pub consistency_tiers: Vec<Tier>,
    /// Penalties by face quality (threshold is an upper bound).
    pub quality_penalty_tiers: Vec<Tier>,
    /// Boost when a deepfake verdict is backed by suspicion above the threshold.
    pub deepfake_support: Tier,
    /// Boost when an authentic verdict has suspicion below the threshold.
    pub authentic_support: Tier,
    /// Distinct artifact count earning `evidence_bonus`.
    pub evidence_bonus_min: usize,
    /// Boost for strong heuristic evidence.
    pub evidence_bonus: f64,
    /// Penalty when a deepfake verdict has suspicion below the threshold.
    pub deepfake_contradiction: Tier,
    /// Penalty when an authentic verdict has suspicion above the threshold.
    pub authentic_strong_contradiction: Tier,
    /// Penalty when an authentic verdict has suspicion above this lesser threshold.
    pub authentic_contradiction: Tier,
    /// Lowest reportable confidence.
    pub confidence_floor: f64,
    /// Highest confidence without strong evidence.
    pub confidence_cap: f64,
    /// Highest confidence with at least `evidence_cap_min` artifacts.
    pub evidence_confidence_cap: f64,
    /// Distinct artifact count that lifts the cap.
    pub evidence_cap_min: usize,
}

impl Default for FusionPolicy {
    fn default() -> Self {
        Self {
            vote_threshold: 0.5,
            decision_threshold: 0.5,
            override_min_evidence: 3,
            override_min_suspicion: 0.5,
            override_base: 0.6,
            override_slope: 0.3,
            blend_min_evidence: 2,
            blend_min_suspicion: 0.4,
            blend_suspicion_weight: 0.7,
            agreement_tiers: vec![Tier::new(0.9, 0.15), Tier::new(0.8, 0.10), Tier::new(0.6, 0.05)],
            quality_tiers: vec![Tier::new(0.8, 0.08), Tier::new(0.6, 0.04)],
            consistency_tiers: vec![Tier::new(0.8, 0.08), Tier::new(0.6, 0.04)],
            quality_penalty_tiers: vec![
                Tier::new(0.2, 0.10),
                Tier::new(0.3, 0.05),
                Tier::new(0.4, 0.02),
            ],
            deepfake_support: Tier::new(0.3, 0.15),
            authentic_support: Tier::new(0.2, 0.10),
            evidence_bonus_min: 3,
            evidence_bonus: 0.10,
            deepfake_contradiction: Tier::new(0.1, 0.08),
            authentic_strong_contradiction: Tier::new(0.5, 0.15),
            authentic_contradiction: Tier::new(0.3, 0.08),
            confidence_floor: 0.1,
            confidence_cap: 0.95,
            evidence_confidence_cap: 0.99,
            evidence_cap_min: 3,
        }
    }
}

/// Already-reduced inputs of a fusion decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusionSignals {
    /// Mean model score.
    pub base_prediction: f64,
    /// Vote agreement (0.0-1.0).
    pub agreement: f64,
    /// Temporal consistency (0.0-1.0).
    pub consistency: f64,
    /// Face quality (0.0-1.0).
    pub quality: f64,
    /// Artifact suspicion (0.0-1.0).
    pub suspicion: f64,
    /// Distinct artifact count.
    pub heuristic_evidence: usize,
}

/// Multi-signal decision engine.
#[derive(Debug, Clone, Default)]
pub struct FusionEngine {
    policy: FusionPolicy,
}

impl FusionEngine {
    /// Creates an engine with the given policy.
    #[must_use]
    pub const fn new(policy: FusionPolicy) -> Self {
        Self { policy }
    }

    /// Returns the policy in use.
    #[must_use]
    pub const fn policy(&self) -> &FusionPolicy {
        &self.policy
    }

    /// Produces a verdict from model scores, temporal profile and evidence.
    ///
    /// Never fails: unusable inputs fall back to the model-only formula over
    /// whatever scores are usable, with `factors.error` set.
    #[must_use]
    pub fn decide(
        &self,
        model_scores: &[ModelScore],
        temporal: &TemporalProfile,
        evidence: &EvidenceSummary,
    ) -> DecisionResult {
        match self.signals(model_scores, temporal, evidence) {
            Ok(signals) => self.fuse(&signals),
            Err(e) => {
                warn!(error = %e, "fusion inputs unusable, falling back to model-only");
                self.fallback(model_scores, temporal, evidence, &e.to_string())
            }
        }
    }

    /// Vote agreement of the ensemble: 1.0 when unanimous, otherwise the majority share.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn agreement(&self, scores: &[f64]) -> f64 {
        if scores.is_empty() {
            return 0.0;
        }
        let total = scores.len();
        let deepfake_votes = scores
            .iter()
            .filter(|s| **s > self.policy.vote_threshold)
            .count();
        if deepfake_votes == 0 || deepfake_votes == total {
            return 1.0;
        }
        deepfake_votes.max(total - deepfake_votes) as f64 / total as f64
    }

    /// Applies the decision stages to reduced signals.
    #[must_use]
    pub fn fuse(&self, signals: &FusionSignals) -> DecisionResult {
        let p = &self.policy;
        let s = signals;

        let (is_deepfake, base_confidence, path) = if s.heuristic_evidence
            >= p.override_min_evidence
            && s.suspicion > p.override_min_suspicion
        {
            (
                true,
                p.override_slope.mul_add(s.suspicion, p.override_base),
                DecisionPath::HeuristicOverride,
            )
        } else if s.heuristic_evidence >= p.blend_min_evidence
            && s.suspicion > p.blend_min_suspicion
        {
            let combined = p.blend_suspicion_weight.mul_add(
                s.suspicion,
                (1.0 - p.blend_suspicion_weight) * s.base_prediction,
            );
            let verdict = combined > p.decision_threshold;
            let confidence = if verdict { combined } else { 1.0 - combined };
            (verdict, confidence, DecisionPath::WeightedBlend)
        } else {
            let verdict = s.base_prediction > p.decision_threshold;
            let confidence = if verdict {
                s.base_prediction
            } else {
                1.0 - s.base_prediction
            };
            (verdict, confidence, DecisionPath::ModelOnly)
        };

        let mut boost = first_above(&p.agreement_tiers, s.agreement)
            + first_above(&p.quality_tiers, s.quality)
            + first_above(&p.consistency_tiers, s.consistency);

        if is_deepfake && s.suspicion > p.deepfake_support.threshold {
            boost += p.deepfake_support.delta;
        } else if !is_deepfake && s.suspicion < p.authentic_support.threshold {
            boost += p.authentic_support.delta;
        }
        if s.heuristic_evidence >= p.evidence_bonus_min {
            boost += p.evidence_bonus;
        }

        boost -= first_below(&p.quality_penalty_tiers, s.quality);

        let mut warnings = Vec::new();
        if is_deepfake && s.suspicion < p.deepfake_contradiction.threshold {
            boost -= p.deepfake_contradiction.delta;
            warnings.push(Contradiction::DeepfakeWithoutArtifacts);
        } else if !is_deepfake && s.suspicion > p.authentic_strong_contradiction.threshold {
            boost -= p.authentic_strong_contradiction.delta;
            warnings.push(Contradiction::AuthenticWithStrongArtifacts);
        } else if !is_deepfake && s.suspicion > p.authentic_contradiction.threshold {
            boost -= p.authentic_contradiction.delta;
            warnings.push(Contradiction::AuthenticWithArtifacts);
        }
        for warning in &warnings {
            warn!(?warning, suspicion = s.suspicion, "verdict contradicts artifact evidence");
        }

        let cap = if s.heuristic_evidence >= p.evidence_cap_min {
            p.evidence_confidence_cap
        } else {
            p.confidence_cap
        };
        let confidence = (base_confidence + boost).min(cap).max(p.confidence_floor);

        debug!(
            ?path,
            is_deepfake,
            base_confidence,
            boost,
            cap,
            confidence,
            "fusion decision"
        );

        DecisionResult {
            is_deepfake,
            confidence,
            factors: DecisionFactors {
                base_prediction: s.base_prediction,
                model_agreement: s.agreement,
                temporal_consistency: s.consistency,
                face_quality: s.quality,
                deepfake_suspicion: s.suspicion,
                heuristic_evidence: s.heuristic_evidence,
                decision_path: path,
                base_confidence,
                confidence_boost: boost,
                confidence_cap: cap,
                final_confidence: confidence,
                warnings,
                error: None,
                fallback: false,
            },
        }
    }

    fn signals(
        &self,
        model_scores: &[ModelScore],
        temporal: &TemporalProfile,
        evidence: &EvidenceSummary,
    ) -> anyhow::Result<FusionSignals> {
        anyhow::ensure!(!model_scores.is_empty(), "no model scores");
        if let Some(bad) = model_scores
            .iter()
            .find(|m| !m.score.is_finite() || !(0.0..=1.0).contains(&m.score))
        {
            anyhow::bail!("model {} has unusable score {}", bad.model, bad.score);
        }
        for (name, value) in [
            ("temporal consistency", temporal.consistency_score),
            ("face quality", evidence.quality_score),
            ("suspicion", evidence.suspicion),
        ] {
            anyhow::ensure!(value.is_finite(), "{name} is not finite");
        }

        let scores: Vec<f64> = model_scores.iter().map(|m| m.score).collect();
        #[allow(clippy::cast_precision_loss)]
        let base_prediction = scores.iter().sum::<f64>() / scores.len() as f64;
        Ok(FusionSignals {
            base_prediction,
            agreement: self.agreement(&scores),
            consistency: temporal.consistency_score,
            quality: evidence.quality_score,
            suspicion: evidence.suspicion,
            heuristic_evidence: evidence.heuristic_evidence(),
        })
    }

    fn fallback(
        &self,
        model_scores: &[ModelScore],
        temporal: &TemporalProfile,
        evidence: &EvidenceSummary,
        error: &str,
    ) -> DecisionResult {
        let p = &self.policy;
        let usable: Vec<f64> = model_scores
            .iter()
            .map(|m| m.score)
            .filter(|s| s.is_finite() && (0.0..=1.0).contains(s))
            .collect();
        #[allow(clippy::cast_precision_loss)]
        let base_prediction = if usable.is_empty() {
            0.5
        } else {
            usable.iter().sum::<f64>() / usable.len() as f64
        };

        let is_deepfake = base_prediction > p.decision_threshold;
        let base_confidence = if is_deepfake {
            base_prediction
        } else {
            1.0 - base_prediction
        };
        let confidence = base_confidence.min(p.confidence_cap).max(p.confidence_floor);
        let finite_or_zero = |v: f64| if v.is_finite() { v } else { 0.0 };

        DecisionResult {
            is_deepfake,
            confidence,
            factors: DecisionFactors {
                base_prediction,
                model_agreement: self.agreement(&usable),
                temporal_consistency: finite_or_zero(temporal.consistency_score),
                face_quality: finite_or_zero(evidence.quality_score),
                deepfake_suspicion: finite_or_zero(evidence.suspicion),
                heuristic_evidence: evidence.heuristic_evidence(),
                decision_path: DecisionPath::ModelOnlyFallback,
                base_confidence,
                confidence_boost: 0.0,
                confidence_cap: p.confidence_cap,
                final_confidence: confidence,
                warnings: Vec::new(),
                error: Some(error.to_string()),
                fallback: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ArtifactTag;
    use proptest::prelude::*;

    fn scores(values: &[f64]) -> Vec<ModelScore> {
        values
            .iter()
            .enumerate()
            .map(|(i, s)| ModelScore {
                model: format!("model_{i}"),
                score: *s,
            })
            .collect()
    }

    fn tags(n: usize) -> Vec<ArtifactTag> {
        [
            ArtifactTag::UnnaturalSharpness,
            ArtifactTag::ColorInconsistency,
            ArtifactTag::UnnaturalEdges,
            ArtifactTag::FrequencyArtifacts,
            ArtifactTag::UniformTexture,
            ArtifactTag::InconsistentTexture,
            ArtifactTag::OverSmoothed,
        ]
        .into_iter()
        .take(n)
        .collect()
    }

    fn signals(agreement: f64) -> FusionSignals {
        FusionSignals {
            base_prediction: 0.7,
            agreement,
            consistency: 0.7,
            quality: 0.5,
            suspicion: 0.2,
            heuristic_evidence: 1,
        }
    }

    #[test]
    fn test_agreement() {
        let engine = FusionEngine::default();
        assert!((engine.agreement(&[0.9, 0.8, 0.7]) - 1.0).abs() < f64::EPSILON);
        assert!((engine.agreement(&[0.1, 0.2]) - 1.0).abs() < f64::EPSILON);
        assert!((engine.agreement(&[0.9, 0.8, 0.1]) - 2.0 / 3.0).abs() < 1e-12);
        assert!((engine.agreement(&[0.9, 0.1]) - 0.5).abs() < 1e-12);
        // exactly 0.5 does not vote deepfake
        assert!((engine.agreement(&[0.5, 0.4]) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scenario_unanimous_deepfake_model_only() {
        let engine = FusionEngine::default();
        let result = engine.decide(
            &scores(&[0.9, 0.85, 0.88, 0.91, 0.87, 0.89, 0.92]),
            &TemporalProfile::with_consistency(1.0),
            &EvidenceSummary::from_parts(0.5, [], 0.0),
        );
        assert!(result.is_deepfake);
        assert_eq!(result.factors.decision_path, DecisionPath::ModelOnly);
        assert!((result.factors.base_confidence - 6.22 / 7.0).abs() < 1e-9);
        assert!((result.factors.model_agreement - 1.0).abs() < f64::EPSILON);
        // +0.15 agreement, +0.08 consistency, -0.08 deepfake without artifacts
        assert!((result.factors.confidence_boost - 0.15).abs() < 1e-9);
        assert_eq!(
            result.factors.warnings,
            vec![Contradiction::DeepfakeWithoutArtifacts]
        );
        assert!((result.confidence - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_scenario_heuristic_override() {
        let engine = FusionEngine::default();
        let result = engine.decide(
            &scores(&[0.2, 0.3, 0.25]),
            &TemporalProfile::with_consistency(1.0),
            &EvidenceSummary::from_parts(0.5, tags(4), 0.8),
        );
        assert!(result.is_deepfake);
        assert_eq!(result.factors.decision_path, DecisionPath::HeuristicOverride);
        assert!((result.factors.base_confidence - 0.84).abs() < 1e-12);
        assert!((result.factors.confidence_cap - 0.99).abs() < f64::EPSILON);
        assert!((result.confidence - 0.99).abs() < 1e-12);
        assert!(result.factors.warnings.is_empty());
    }

    #[test]
    fn test_override_wins_over_zero_scores() {
        let engine = FusionEngine::default();
        let result = engine.decide(
            &scores(&[0.0, 0.0, 0.0]),
            &TemporalProfile::neutral(),
            &EvidenceSummary::from_parts(0.3, tags(3), 0.6),
        );
        assert!(result.is_deepfake);
        assert_eq!(result.factors.decision_path, DecisionPath::HeuristicOverride);
    }

    #[test]
    fn test_weighted_blend() {
        let engine = FusionEngine::default();
        let result = engine.decide(
            &scores(&[0.1, 0.2]),
            &TemporalProfile::neutral(),
            &EvidenceSummary::from_parts(0.5, tags(2), 0.45),
        );
        // 0.7 * 0.45 + 0.3 * 0.15 = 0.36
        assert_eq!(result.factors.decision_path, DecisionPath::WeightedBlend);
        assert!(!result.is_deepfake);
        assert!((result.factors.base_confidence - 0.64).abs() < 1e-12);
        assert_eq!(
            result.factors.warnings,
            vec![Contradiction::AuthenticWithArtifacts]
        );
    }

    #[test]
    fn test_authentic_with_strong_artifacts_warns() {
        let result = FusionEngine::default().fuse(&FusionSignals {
            base_prediction: 0.1,
            agreement: 1.0,
            consistency: 0.5,
            quality: 0.5,
            suspicion: 0.6,
            heuristic_evidence: 1,
        });
        assert!(!result.is_deepfake);
        assert_eq!(
            result.factors.warnings,
            vec![Contradiction::AuthenticWithStrongArtifacts]
        );
        // 0.9 + 0.15 - 0.15
        assert!((result.confidence - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_quality_penalty_steepest_only() {
        let engine = FusionEngine::default();
        let mut s = signals(0.5);
        s.quality = 0.1;
        let low = engine.fuse(&s);
        s.quality = 0.25;
        let mid = engine.fuse(&s);
        assert!((mid.factors.confidence_boost - low.factors.confidence_boost - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_confidence_floor() {
        let result = FusionEngine::default().fuse(&FusionSignals {
            base_prediction: 0.5,
            agreement: 0.5,
            consistency: 0.0,
            quality: 0.0,
            suspicion: 0.9,
            heuristic_evidence: 0,
        });
        // 0.5 - 0.10 - 0.15 = 0.25 stays above floor, then push further with a custom policy
        assert!(result.confidence >= 0.1);
        let harsh = FusionPolicy {
            authentic_strong_contradiction: Tier::new(0.5, 0.9),
            ..FusionPolicy::default()
        };
        let floored = FusionEngine::new(harsh).fuse(&FusionSignals {
            base_prediction: 0.5,
            agreement: 0.5,
            consistency: 0.0,
            quality: 0.0,
            suspicion: 0.9,
            heuristic_evidence: 0,
        });
        assert!((floored.confidence - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_scores_fall_back() {
        let result = FusionEngine::default().decide(
            &[],
            &TemporalProfile::neutral(),
            &EvidenceSummary::no_faces(),
        );
        assert!(result.factors.fallback);
        assert!(result.factors.error.is_some());
        assert_eq!(result.factors.decision_path, DecisionPath::ModelOnlyFallback);
        assert!(!result.is_deepfake);
        assert!((result.confidence - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_non_finite_score_uses_usable_scores() {
        let result = FusionEngine::default().decide(
            &scores(&[0.9, f64::NAN, 0.7]),
            &TemporalProfile::neutral(),
            &EvidenceSummary::from_parts(0.5, [], 0.0),
        );
        assert!(result.factors.fallback);
        assert!(result.is_deepfake);
        assert!((result.confidence - 0.8).abs() < 1e-12);
        assert!(serde_json::to_string(&result).is_ok());
    }

    #[test]
    fn test_fallback_serializes_error() {
        let result = FusionEngine::default().decide(
            &scores(&[1.5]),
            &TemporalProfile::neutral(),
            &EvidenceSummary::from_parts(0.5, [], 0.0),
        );
        let json = serde_json::to_value(&result).unwrap_or_default();
        assert_eq!(json["factors"]["fallback"], true);
        assert!(json["factors"]["error"].is_string());
    }

    #[test]
    fn test_normal_decision_omits_fallback_fields() {
        let result = FusionEngine::default().fuse(&signals(1.0));
        let json = serde_json::to_value(&result).unwrap_or_default();
        assert!(json["factors"].get("fallback").is_none());
        assert!(json["factors"].get("error").is_none());
    }

    fn signal_strategy() -> impl Strategy<Value = FusionSignals> {
        (
            0.0..=1.0f64,
            0.0..=1.0f64,
            0.0..=1.0f64,
            0.0..=1.0f64,
            0.0..=1.0f64,
            0usize..8,
        )
            .prop_map(
                |(base_prediction, agreement, consistency, quality, suspicion, heuristic_evidence)| {
                    FusionSignals {
                        base_prediction,
                        agreement,
                        consistency,
                        quality,
                        suspicion,
                        heuristic_evidence,
                    }
                },
            )
    }

    proptest! {
        #[test]
        fn confidence_is_bounded(s in signal_strategy()) {
            let result = FusionEngine::default().fuse(&s);
            prop_assert!((0.1..=0.99).contains(&result.confidence));
            prop_assert!(result.confidence <= result.factors.confidence_cap);
        }

        #[test]
        fn confidence_monotonic_in_agreement(s in signal_strategy(), a in 0.0..=1.0f64, b in 0.0..=1.0f64) {
            let engine = FusionEngine::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let low = engine.fuse(&FusionSignals { agreement: lo, ..s });
            let high = engine.fuse(&FusionSignals { agreement: hi, ..s });
            prop_assert!(high.confidence >= low.confidence);
            prop_assert_eq!(high.is_deepfake, low.is_deepfake);
        }

        #[test]
        fn decide_is_deterministic(
            values in prop::collection::vec(0.0..=1.0f64, 1..10),
            quality in 0.0..=1.0f64,
            consistency in 0.0..=1.0f64,
            n_tags in 0usize..7,
        ) {
            let engine = FusionEngine::default();
            #[allow(clippy::cast_precision_loss)]
            let suspicion = (n_tags as f64 / 5.0).min(1.0);
            let evidence = EvidenceSummary::from_parts(quality, tags(n_tags), suspicion);
            let temporal = TemporalProfile::with_consistency(consistency);
            let first = engine.decide(&scores(&values), &temporal, &evidence);
            let second = engine.decide(&scores(&values), &temporal, &evidence);
            prop_assert_eq!(first.confidence.to_bits(), second.confidence.to_bits());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn strong_evidence_always_overrides(
            values in prop::collection::vec(0.0..=1.0f64, 1..10),
            n_tags in 3usize..7,
            suspicion in 0.51..=1.0f64,
        ) {
            let result = FusionEngine::default().decide(
                &scores(&values),
                &TemporalProfile::neutral(),
                &EvidenceSummary::from_parts(0.5, tags(n_tags), suspicion),
            );
            prop_assert!(result.is_deepfake);
        }
    }
}
