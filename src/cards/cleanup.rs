//! Removal of card images no longer present in the catalog

use crate::io::error::{PipelineError, Result};
use std::collections::HashSet;
use std::path::Path;

/// Differences between the images on disk and the catalog expectations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupPlan {
    /// Files on disk the catalog does not expect, sorted
    pub orphaned: Vec<String>,
    /// Files the catalog expects that are missing from disk, sorted
    pub missing: Vec<String>,
    /// Count of PNG files found on disk
    pub existing: usize,
}

/// Outcome of deleting the orphaned files
#[derive(Debug, Clone, Default)]
pub struct DeletionOutcome {
    /// Files removed
    pub deleted: usize,
    /// Per-file failure descriptions
    pub failures: Vec<String>,
}

// PNG filenames directly inside the image directory.
fn existing_png_names(image_dir: &Path) -> Result<HashSet<String>> {
    let entries = std::fs::read_dir(image_dir).map_err(|e| PipelineError::FileSystem {
        path: image_dir.to_path_buf(),
        operation: "read image directory",
        source: e,
    })?;

    let mut names = HashSet::new();
    for entry in entries {
        let path = entry
            .map_err(|e| PipelineError::FileSystem {
                path: image_dir.to_path_buf(),
                operation: "read image directory",
                source: e,
            })?
            .path();
        if path.extension().and_then(|s| s.to_str()) == Some("png") {
            if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                names.insert(name.to_string());
            }
        }
    }
    Ok(names)
}

/// Compare the image directory against the expected filename set
///
/// # Errors
///
/// Returns an error if the image directory cannot be read.
pub fn plan_cleanup(image_dir: &Path, expected: &HashSet<String>) -> Result<CleanupPlan> {
    let existing = existing_png_names(image_dir)?;

    let mut orphaned: Vec<String> = existing.difference(expected).cloned().collect();
    orphaned.sort();
    let mut missing: Vec<String> = expected.difference(&existing).cloned().collect();
    missing.sort();

    Ok(CleanupPlan {
        orphaned,
        missing,
        existing: existing.len(),
    })
}

/// Delete the named files from the image directory
///
/// Individual deletion failures are collected rather than aborting the pass.
pub fn delete_images(image_dir: &Path, names: &[String]) -> DeletionOutcome {
    let mut outcome = DeletionOutcome::default();
    for name in names {
        match std::fs::remove_file(image_dir.join(name)) {
            Ok(()) => outcome.deleted += 1,
            Err(error) => outcome.failures.push(format!("{name}: {error}")),
        }
    }
    outcome
}
