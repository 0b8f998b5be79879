//! Snapshot file storage.
//!
//! The JSON snapshot is the only thing ever written to disk. A file holds one
//! project; reading it goes through the same import check a user upload does.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pert_core::export::json::SNAPSHOT_FILENAME;
use pert_core::export::{parse_snapshot, to_json};
use pert_core::Project;

#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `pert-estimation.json` in the platform data directory.
    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "pert-estimator")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(Self::new(dirs.data_dir().join(SNAPSHOT_FILENAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load(&self) -> Result<Project> {
        import(&self.path)
    }

    /// Load the snapshot, or a fresh project if the file is not there yet.
    pub fn load_or_default(&self) -> Result<Project> {
        if !self.exists() {
            tracing::debug!("No snapshot at {}, starting fresh", self.path.display());
            return Ok(Project::default());
        }
        self.load()
    }

    pub fn save(&self, project: &Project) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context("Failed to create snapshot directory")?;
            }
        }

        let content = to_json(project).context("Failed to serialize snapshot")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write snapshot {}", self.path.display()))?;

        tracing::info!("Saved snapshot to {}", self.path.display());
        Ok(())
    }
}

/// Read and check a snapshot from any JSON file.
pub fn import(path: &Path) -> Result<Project> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let project = parse_snapshot(&text)
        .with_context(|| format!("Failed to import snapshot {}", path.display()))?;
    Ok(project)
}
