//! Manifest persistence for a single target base directory.

use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

use super::types::{InstalledSkill, Manifest, ManifestRecord};
use crate::config::SkillConfig;

/// Manifest filename inside each target base directory.
pub const MANIFEST_FILE: &str = ".skills-manifest.json";

/// Reads and writes `<base_dir>/.skills-manifest.json`.
///
/// Every mutation is a full read-modify-write of the document. Overlapping
/// processes writing the same base directory race; the last writer wins.
#[derive(Debug, Clone)]
pub struct ManifestStore {
    base_dir: PathBuf,
}

impl ManifestStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.base_dir.join(MANIFEST_FILE)
    }

    /// Load the manifest.
    ///
    /// A missing file is an empty manifest. So is a file that is not a
    /// JSON document with an object of entries; that case is logged and the
    /// bad content is left untouched until the next write. Individual
    /// entries are never rejected.
    pub fn load(&self) -> anyhow::Result<Manifest> {
        let path = self.manifest_path();
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Manifest::new());
            }
            Err(err) => {
                return Err(anyhow::Error::new(err)
                    .context(format!("Failed to read manifest: {}", path.display())));
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(manifest) => Ok(manifest),
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "Failed to parse manifest, treating as empty"
                );
                Ok(Manifest::new())
            }
        }
    }

    /// Save the manifest atomically (tmp + rename).
    pub fn save(&self, manifest: &Manifest) -> anyhow::Result<()> {
        fs::create_dir_all(&self.base_dir).with_context(|| {
            format!(
                "Failed to create skills directory: {}",
                self.base_dir.display()
            )
        })?;

        let path = self.manifest_path();
        let tmp_path = self
            .base_dir
            .join(format!("{MANIFEST_FILE}.{}.tmp", std::process::id()));

        let bytes = serde_json::to_vec_pretty(manifest).context("Failed to serialize manifest")?;
        fs::write(&tmp_path, bytes)
            .with_context(|| format!("Failed to write tmp manifest: {}", tmp_path.display()))?;

        // Replaces in one step; on Windows std uses MOVEFILE_REPLACE_EXISTING.
        fs::rename(&tmp_path, &path)
            .with_context(|| format!("Failed to rename tmp manifest: {}", tmp_path.display()))?;
        Ok(())
    }

    /// Record an install of `config` at `install_path` for `target_name`.
    ///
    /// Replaces any existing record under the same package key and stamps
    /// a fresh install time.
    pub fn update(
        &self,
        config: &SkillConfig,
        install_path: &Path,
        target_name: &str,
    ) -> anyhow::Result<ManifestRecord> {
        let package = config.package_key().to_string();
        let record = ManifestRecord {
            version: config.version_or_default().to_string(),
            installed_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            package: package.clone(),
            path: install_path.to_path_buf(),
            target: target_name.to_string(),
            skill_name: config.skill_name().to_string(),
        };

        let mut manifest = self.load()?;
        manifest.upsert(package, &record);
        self.save(&manifest)?;
        Ok(record)
    }

    /// Drop the record for `package`. Returns whether one was removed.
    ///
    /// No manifest file, or no such key, is `false` and writes nothing.
    pub fn remove(&self, package: &str) -> anyhow::Result<bool> {
        if !self.manifest_path().exists() {
            return Ok(false);
        }
        let mut manifest = self.load()?;
        if !manifest.remove(package) {
            return Ok(false);
        }
        self.save(&manifest)?;
        Ok(true)
    }

    /// Every record, with its key as `package`, in file order.
    pub fn installed_skills(&self) -> anyhow::Result<Vec<InstalledSkill>> {
        let manifest = self.load()?;
        Ok(manifest
            .records()
            .map(|(key, record)| InstalledSkill::from_entry(key, record))
            .collect())
    }
}
