//! Skill bundle transfer into an install directory.

use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SkillConfig;
use crate::error::InstallError;
use crate::report::Reporter;

/// Required top-level document of every skill bundle.
pub const SKILL_DOCUMENT: &str = "SKILL.md";

/// Optional content directories, copied in this order when present.
pub const OPTIONAL_DIRS: &[&str] = &["scripts", "references", "assets"];

/// Copy a skill bundle from `source_root` into `target_dir`.
///
/// The bundle is assembled in a sibling staging directory and swapped into
/// place, so a failed copy never leaves a half-written install behind. An
/// existing `target_dir` is replaced.
///
/// Returns one descriptor per copied item: the document name first, then
/// `"<dir>/ (directory)"` for each optional directory found.
pub fn copy_skill_files(
    source_root: &Path,
    target_dir: &Path,
    config: &SkillConfig,
    reporter: &dyn Reporter,
) -> anyhow::Result<Vec<String>> {
    let document = source_root.join(SKILL_DOCUMENT);
    if !document.is_file() {
        return Err(InstallError::MissingSkillDocument {
            source_root: source_root.to_path_buf(),
        }
        .into());
    }

    if config.files.as_ref().is_some_and(|files| !files.is_empty()) {
        reporter.warn(
            "  \"files\" mappings are not supported; copying SKILL.md and known directories instead",
        );
    }

    let staging = Staging::beside(target_dir)?;
    let copied = stage_bundle(source_root, &document, staging.path(), reporter)?;
    staging.commit(target_dir)?;
    Ok(copied)
}

fn stage_bundle(
    source_root: &Path,
    document: &Path,
    staging: &Path,
    reporter: &dyn Reporter,
) -> anyhow::Result<Vec<String>> {
    let mut copied = Vec::new();

    fs::copy(document, staging.join(SKILL_DOCUMENT))
        .with_context(|| format!("Failed to copy {}", document.display()))?;
    reporter.debug(&format!("Copied {SKILL_DOCUMENT}"));
    copied.push(SKILL_DOCUMENT.to_string());

    for dir in OPTIONAL_DIRS {
        let from = source_root.join(dir);
        if !from.is_dir() {
            continue;
        }
        let to = staging.join(dir);
        fs::create_dir_all(&to)
            .with_context(|| format!("Failed to create directory: {}", to.display()))?;
        copy_tree(&from, &to)?;
        reporter.debug(&format!("Copied {dir}/"));
        copied.push(format!("{dir}/ (directory)"));
    }

    Ok(copied)
}

/// Whether anything (including a dangling symlink) exists at `path`.
pub fn path_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Recursively delete `path`. Returns whether anything was there.
///
/// A missing path is not an error.
pub fn remove_directory(path: &Path) -> anyhow::Result<bool> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(err) => {
            return Err(anyhow::Error::new(err)
                .context(format!("Failed to stat path: {}", path.display())));
        }
    };
    let removed = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    removed.with_context(|| format!("Failed to remove path: {}", path.display()))?;
    Ok(true)
}

/// A hidden directory next to an install, removed on drop unless committed.
struct Staging {
    path: PathBuf,
    committed: bool,
}

impl Staging {
    /// Create `.<name>.staging-<pid>[-n]` in the parent of `target_dir`.
    fn beside(target_dir: &Path) -> anyhow::Result<Self> {
        let (Some(parent), Some(name)) = (target_dir.parent(), target_dir.file_name()) else {
            anyhow::bail!("Install path has no parent directory: {}", target_dir.display());
        };
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create skills directory: {}", parent.display()))?;

        let stem = format!(".{}.staging-{}", name.to_string_lossy(), std::process::id());
        for suffix in 0u32..64 {
            let path = match suffix {
                0 => parent.join(&stem),
                n => parent.join(format!("{stem}-{n}")),
            };
            match fs::create_dir(&path) {
                Ok(()) => {
                    return Ok(Self {
                        path,
                        committed: false,
                    });
                }
                Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(err) => {
                    return Err(anyhow::Error::new(err).context(format!(
                        "Failed to create staging directory: {}",
                        path.display()
                    )));
                }
            }
        }
        anyhow::bail!("No free staging directory next to {}", target_dir.display())
    }

    fn path(&self) -> &Path {
        &self.path
    }

    /// Replace whatever is at `target_dir` with the staged bundle.
    fn commit(mut self, target_dir: &Path) -> anyhow::Result<()> {
        remove_directory(target_dir)?;
        fs::rename(&self.path, target_dir).with_context(|| {
            format!(
                "Failed to move {} into place at {}",
                self.path.display(),
                target_dir.display()
            )
        })?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for Staging {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_dir_all(&self.path);
        }
    }
}

/// Copy the contents of `src` into the existing directory `dst`.
///
/// Symbolic links are recreated as links pointing at the same target; they
/// are never followed.
fn copy_tree(src: &Path, dst: &Path) -> anyhow::Result<()> {
    for entry in
        fs::read_dir(src).with_context(|| format!("Failed to read dir: {}", src.display()))?
    {
        let entry =
            entry.with_context(|| format!("Failed to read dir entry: {}", src.display()))?;
        let ty = entry
            .file_type()
            .with_context(|| format!("Failed to stat dir entry: {}", entry.path().display()))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());

        if ty.is_symlink() {
            copy_symlink(&from, &to)?;
        } else if ty.is_dir() {
            fs::create_dir_all(&to)
                .with_context(|| format!("Failed to create directory: {}", to.display()))?;
            copy_tree(&from, &to)?;
        } else if ty.is_file() {
            fs::copy(&from, &to).with_context(|| {
                format!(
                    "Failed to copy file from {} to {}",
                    from.display(),
                    to.display()
                )
            })?;
        } else {
            anyhow::bail!("Unsupported filesystem entry type at {}", from.display());
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(from: &Path, to: &Path) -> anyhow::Result<()> {
    let link_target =
        fs::read_link(from).with_context(|| format!("Failed to read link: {}", from.display()))?;
    std::os::unix::fs::symlink(&link_target, to)
        .with_context(|| format!("Failed to create symlink: {}", to.display()))?;
    Ok(())
}

#[cfg(not(unix))]
fn copy_symlink(from: &Path, _to: &Path) -> anyhow::Result<()> {
    anyhow::bail!(
        "Symbolic links in skill bundles are not supported on this platform: {}",
        from.display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::NullReporter;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().expect("path should have a parent"))
            .expect("create_dir_all should succeed");
        fs::write(path, content).expect("write should succeed");
    }

    #[test]
    fn copies_document_then_present_directories_in_order() {
        let tmp = tempfile::tempdir().expect("tempdir should succeed");
        let src = tmp.path().join("src");
        write(&src.join("SKILL.md"), "# Skill");
        write(&src.join("assets/logo.txt"), "logo");
        write(&src.join("scripts/nested/deep/run.sh"), "echo hi");
        write(&src.join("other/ignored.txt"), "nope");

        let dst = tmp.path().join("skills").join("fmt");
        let copied = copy_skill_files(&src, &dst, &SkillConfig::new("fmt"), &NullReporter)
            .expect("copy should succeed");

        assert_eq!(
            copied,
            vec!["SKILL.md", "scripts/ (directory)", "assets/ (directory)"]
        );
        assert_eq!(
            fs::read_to_string(dst.join("scripts/nested/deep/run.sh")).expect("read"),
            "echo hi"
        );
        assert!(dst.join("assets/logo.txt").is_file());
        assert!(!dst.join("references").exists());
        assert!(!dst.join("other").exists());
    }

    #[test]
    fn missing_document_fails_without_touching_target() {
        let tmp = tempfile::tempdir().expect("tempdir should succeed");
        let src = tmp.path().join("src");
        write(&src.join("scripts/run.sh"), "echo hi");
        let dst = tmp.path().join("skills").join("fmt");

        let err = copy_skill_files(&src, &dst, &SkillConfig::new("fmt"), &NullReporter)
            .expect_err("copy should fail");
        assert!(matches!(
            err.downcast_ref::<InstallError>(),
            Some(InstallError::MissingSkillDocument { .. })
        ));
        assert!(!dst.exists());
    }

    #[test]
    fn existing_target_is_replaced() {
        let tmp = tempfile::tempdir().expect("tempdir should succeed");
        let src = tmp.path().join("src");
        write(&src.join("SKILL.md"), "v2");
        let dst = tmp.path().join("fmt");
        write(&dst.join("stale.txt"), "old");

        copy_skill_files(&src, &dst, &SkillConfig::new("fmt"), &NullReporter)
            .expect("copy should succeed");

        assert_eq!(fs::read_to_string(dst.join("SKILL.md")).expect("read"), "v2");
        assert!(!dst.join("stale.txt").exists());
        let leftovers: Vec<_> = fs::read_dir(tmp.path())
            .expect("read_dir")
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().contains(".staging-"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_preserved_not_followed() {
        let tmp = tempfile::tempdir().expect("tempdir should succeed");
        let src = tmp.path().join("src");
        write(&src.join("SKILL.md"), "# Skill");
        write(&src.join("references/guide.md"), "guide");
        std::os::unix::fs::symlink("guide.md", src.join("references/latest.md"))
            .expect("symlink should succeed");

        let dst = tmp.path().join("fmt");
        copy_skill_files(&src, &dst, &SkillConfig::new("fmt"), &NullReporter)
            .expect("copy should succeed");

        let link = dst.join("references/latest.md");
        let meta = fs::symlink_metadata(&link).expect("link should exist");
        assert!(meta.file_type().is_symlink());
        assert_eq!(fs::read_link(&link).expect("read_link"), PathBuf::from("guide.md"));
    }

    #[test]
    fn remove_directory_is_idempotent() {
        let tmp = tempfile::tempdir().expect("tempdir should succeed");
        let dir = tmp.path().join("fmt");
        write(&dir.join("a/b.txt"), "x");

        assert!(remove_directory(&dir).expect("remove should succeed"));
        assert!(!dir.exists());
        assert!(!remove_directory(&dir).expect("second remove should succeed"));
    }
}
