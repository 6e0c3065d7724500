//! Analysis components.
//!
//! Evidence extraction, temporal analysis, decision fusion, the no-face
//! content fallback, and verification hashing.

pub mod imaging;

mod evidence;
mod fallback;
mod fusion;
mod integrity;
mod temporal;

pub use evidence::{
    ColorProbe, EdgeProbe, EvidenceConfig, EvidenceExtractor, SharpnessProbe, SpectralProbe,
    TextureProbe,
};
pub use fallback::{ContentHeuristic, FallbackConfig};
pub use fusion::{FusionEngine, FusionPolicy, FusionSignals, Tier};
pub use integrity::{canonical_json, now_rfc3339, Seal, VerificationHasher};
pub use temporal::{TemporalAnalyzer, TemporalConfig};
