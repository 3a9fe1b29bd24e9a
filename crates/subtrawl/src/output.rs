//! Artifact writer
//!
//! The only place the pipeline's outputs touch the filesystem. Artifacts are
//! named by the config section that built them; empty artifacts are skipped
//! with a warning rather than producing zero-byte files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use subtrawl_protocol::Subscription;

/// Write each non-empty artifact into `dir`, creating it if needed
///
/// Returns the paths written.
pub fn write_artifacts(dir: &Path, artifacts: &[Subscription]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let mut written = Vec::with_capacity(artifacts.len());

    for artifact in artifacts {
        if artifact.is_empty() {
            tracing::warn!(artifact = artifact.name(), "no nodes, skipping artifact");
            continue;
        }

        let path = dir.join(artifact.name());
        fs::write(&path, artifact.encoded())
            .with_context(|| format!("failed to write {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            nodes = artifact.len(),
            bytes = artifact.encoded().len(),
            "artifact written"
        );
        written.push(path);
    }

    Ok(written)
}
