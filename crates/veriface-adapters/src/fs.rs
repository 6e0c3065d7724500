//! Filesystem adapter for pre-extracted faces and sampled frames.
//!
//! A video is presented as a directory of face crops written by the upstream
//! extractor, plus an optional directory of raw frames for the no-face
//! fallback. Face files carry their source frame index in the file name
//! (`face_0012.png`, `frame12_face0.jpg`); the first digit run is used.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use veriface_core::{FaceSample, VideoSource};

/// Supported image extensions.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Filesystem video source adapter.
#[derive(Debug, Clone)]
pub struct FsVideoSource {
    faces_dir: Option<PathBuf>,
    frames_dir: Option<PathBuf>,
}

impl FsVideoSource {
    /// Creates a new filesystem video source.
    ///
    /// # Arguments
    ///
    /// * `faces_dir` - Directory of face crops; `None` means no faces were found
    /// * `frames_dir` - Directory of raw frames for the content fallback
    #[must_use]
    pub const fn new(faces_dir: Option<PathBuf>, frames_dir: Option<PathBuf>) -> Self {
        Self {
            faces_dir,
            frames_dir,
        }
    }
}

impl VideoSource for FsVideoSource {
    fn extract_faces(&self) -> Result<Vec<FaceSample>> {
        let Some(dir) = &self.faces_dir else {
            return Ok(Vec::new());
        };
        let mut files: Vec<(usize, PathBuf)> = list_images(dir)?
            .into_iter()
            .enumerate()
            .map(|(position, path)| (frame_index(&path).unwrap_or(position), path))
            .collect();
        files.sort();
        debug!("Found {} face files in {}", files.len(), dir.display());

        let mut faces = Vec::with_capacity(files.len());
        for (index, path) in files {
            match image::open(&path) {
                Ok(image) => faces.push(FaceSample::new(index, image)),
                Err(e) => warn!("Skipping unreadable face {}: {e}", path.display()),
            }
        }
        Ok(faces)
    }

    fn sample_frames(&self, max_frames: usize) -> Result<Vec<image::DynamicImage>> {
        let Some(dir) = &self.frames_dir else {
            return Ok(Vec::new());
        };
        let files = list_images(dir)?;
        let picked = spaced_indices(files.len(), max_frames);
        debug!(
            "Sampling {} of {} frames from {}",
            picked.len(),
            files.len(),
            dir.display()
        );

        let mut frames = Vec::with_capacity(picked.len());
        for i in picked {
            let path = &files[i];
            match image::open(path) {
                Ok(image) => frames.push(image),
                Err(e) => warn!("Skipping unreadable frame {}: {e}", path.display()),
            }
        }
        Ok(frames)
    }
}

/// Lists supported image files in a directory, sorted by name.
fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_supported_image(path))
        .collect();
    files.sort();
    Ok(files)
}

/// Checks if a path has a supported image extension.
fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.as_str()))
}

/// First run of digits in the file stem.
fn frame_index(path: &Path) -> Option<usize> {
    let stem = path.file_stem()?.to_str()?;
    let digits: String = stem
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Evenly spaced indices over `0..len`, endpoints included, at most `count` of them.
fn spaced_indices(len: usize, count: usize) -> Vec<usize> {
    if len == 0 || count == 0 {
        return Vec::new();
    }
    if count >= len {
        return (0..len).collect();
    }
    if count == 1 {
        return vec![0];
    }
    let mut indices: Vec<usize> = (0..count).map(|i| i * (len - 1) / (count - 1)).collect();
    indices.dedup();
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported_image() {
        assert!(is_supported_image(Path::new("face.jpg")));
        assert!(is_supported_image(Path::new("face.JPEG")));
        assert!(is_supported_image(Path::new("face.png")));
        assert!(!is_supported_image(Path::new("face.txt")));
        assert!(!is_supported_image(Path::new("face")));
    }

    #[test]
    fn test_frame_index() {
        assert_eq!(frame_index(Path::new("face_0012.png")), Some(12));
        assert_eq!(frame_index(Path::new("frame7_face0.jpg")), Some(7));
        assert_eq!(frame_index(Path::new("dir9/face.png")), None);
        assert_eq!(frame_index(Path::new("42.png")), Some(42));
    }

    #[test]
    fn test_spaced_indices() {
        assert_eq!(spaced_indices(10, 5), vec![0, 2, 4, 6, 9]);
        assert_eq!(spaced_indices(3, 5), vec![0, 1, 2]);
        assert_eq!(spaced_indices(8, 1), vec![0]);
        assert!(spaced_indices(0, 5).is_empty());
        assert!(spaced_indices(4, 0).is_empty());
    }

    #[test]
    fn test_no_dirs_yield_nothing() {
        let source = FsVideoSource::new(None, None);
        assert!(source.extract_faces().unwrap_or_default().is_empty());
        assert!(source.sample_frames(5).unwrap_or_default().is_empty());
    }

    #[test]
    fn test_missing_dir_is_error() {
        let source = FsVideoSource::new(Some(PathBuf::from("/nonexistent/faces")), None);
        assert!(source.extract_faces().is_err());
    }
}
