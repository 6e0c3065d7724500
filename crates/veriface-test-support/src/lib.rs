//! Test support utilities for veriface.
//!
//! Provides mocks, synthetic face builders, and utilities for testing
//! the veriface analysis pipeline.
//!
//! # Example
//!
//! ```
//! use veriface_test_support::{MockClassifierOracle, MockVideoSource, SyntheticFaceBuilder};
//!
//! // Create synthetic faces, one per sampled frame
//! let faces = SyntheticFaceBuilder::sequence(4, |i| {
//!     SyntheticFaceBuilder::textured_skin(128, 128, i as u32 + 1)
//! });
//!
//! // Create a mock source and a classifier that is fairly sure they are fake
//! let source = MockVideoSource::new(faces);
//! let oracle = MockClassifierOracle::constant(&[0.9, 0.85]);
//! ```

mod builders;
mod mocks;

pub use builders::SyntheticFaceBuilder;
pub use mocks::{MockClassifierOracle, MockRecordOutput, MockVideoSource};
