//! Content fingerprinting of input files.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use tracing::debug;

/// Streams a file through SHA-256 and returns the lowercase hex digest.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn file_sha256(path: &Path) -> Result<String> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut reader = BufReader::with_capacity(64 * 1024, file);
    let mut hasher = Sha256::new();
    let bytes = io::copy(&mut reader, &mut hasher)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let hash = format!("{:x}", hasher.finalize());
    debug!("Fingerprinted {} ({bytes} bytes)", path.display());
    Ok(hash)
}
