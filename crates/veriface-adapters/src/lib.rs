//! Veriface Adapters - External adapters for veriface.
//!
//! This crate provides adapters for:
//! - Filesystem face and frame source
//! - Replayed classifier scores
//! - File content fingerprinting

pub mod fingerprint;
pub mod fs;
pub mod scores;

pub use fingerprint::file_sha256;
pub use fs::FsVideoSource;
pub use scores::JsonScoreOracle;
