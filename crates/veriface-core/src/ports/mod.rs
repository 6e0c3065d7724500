//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the decision core and the
//! external extraction, classification and persistence collaborators.

mod classifier;
mod record_output;
mod video_source;

pub use classifier::ClassifierOracle;
pub use record_output::RecordOutput;
pub use video_source::VideoSource;
