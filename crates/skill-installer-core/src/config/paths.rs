//! Config path resolution helpers.

use std::path::{Path, PathBuf};

/// Descriptor file looked up at the project root when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "package.json";

pub fn default_config_path(package_root: &Path) -> PathBuf {
    package_root.join(DEFAULT_CONFIG_FILE)
}

/// Resolve the descriptor path for an invocation.
///
/// An explicit relative path is taken relative to `cwd`; with no explicit
/// path the descriptor is looked up at the project root.
pub fn resolve_config_path(explicit: Option<&Path>, package_root: &Path, cwd: &Path) -> PathBuf {
    match explicit {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => cwd.join(path),
        None => default_config_path(package_root),
    }
}
