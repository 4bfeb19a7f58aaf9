//! Installation context: global vs. project mode and project root discovery.

use std::path::{Path, PathBuf};

use crate::types::InstallLocation;

/// Set to `"true"` by npm for `npm install -g`.
pub const GLOBAL_ENV: &str = "npm_config_global";
/// Directory the package manager was originally invoked from.
pub const INIT_CWD_ENV: &str = "INIT_CWD";

/// Files or directories that mark a project root.
const PROJECT_MARKERS: &[&str] = &["package.json", ".git"];
/// Directory name used for vendored third-party packages.
const VENDOR_DIR: &str = "node_modules";

/// Raw inputs for context detection, gathered from the process environment.
#[derive(Debug, Clone)]
pub struct ContextProbe {
    pub is_global: bool,
    pub initial_cwd: Option<PathBuf>,
    pub process_cwd: PathBuf,
    pub home_dir: Option<PathBuf>,
}

impl ContextProbe {
    /// Read the probe from environment variables and the process state.
    pub fn from_env() -> Self {
        let is_global = std::env::var(GLOBAL_ENV)
            .map(|value| value == "true")
            .unwrap_or(false);
        let initial_cwd = std::env::var_os(INIT_CWD_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        let process_cwd = std::env::current_dir().unwrap_or_else(|err| {
            tracing::warn!("Could not read current directory ({err}), using '.'");
            PathBuf::from(".")
        });

        Self {
            is_global,
            initial_cwd,
            process_cwd,
            home_dir: dirs::home_dir(),
        }
    }

    fn working_dir(&self) -> PathBuf {
        match &self.initial_cwd {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => self.process_cwd.join(dir),
            None => self.process_cwd.clone(),
        }
    }
}

/// Resolved context for one invocation.
///
/// Computed once and passed by reference to every path computation, so
/// install, uninstall, and list agree on where things live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    is_global: bool,
    package_root: PathBuf,
    home_dir: PathBuf,
    cwd: PathBuf,
}

impl Context {
    /// Create a context with explicit paths.
    pub fn new(is_global: bool, package_root: PathBuf, home_dir: PathBuf, cwd: PathBuf) -> Self {
        Self {
            is_global,
            package_root,
            home_dir,
            cwd,
        }
    }

    /// Detect the context from the process environment.
    pub fn detect() -> Self {
        Self::from_probe(ContextProbe::from_env())
    }

    /// Resolve a context from probe inputs. Never fails.
    pub fn from_probe(probe: ContextProbe) -> Self {
        let cwd = probe.working_dir();
        let package_root = find_package_root(&cwd);
        let home_dir = probe.home_dir.clone().unwrap_or_else(|| {
            tracing::warn!("Could not determine home directory, using working directory");
            cwd.clone()
        });

        Self {
            is_global: probe.is_global,
            package_root,
            home_dir,
            cwd,
        }
    }

    /// Force global mode on; never turns it off.
    pub fn with_global(mut self, is_global: bool) -> Self {
        self.is_global = self.is_global || is_global;
        self
    }

    pub fn is_global(&self) -> bool {
        self.is_global
    }

    pub fn location(&self) -> InstallLocation {
        InstallLocation::from_global_flag(self.is_global)
    }

    pub fn package_root(&self) -> &Path {
        &self.package_root
    }

    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }
}

/// Find the project root above `start`.
///
/// Walks up through ancestors looking for a directory with a project marker
/// that is not inside a vendoring directory. Falls back to `start` with a
/// warning when nothing qualifies.
pub fn find_package_root(start: &Path) -> PathBuf {
    for candidate in start.ancestors() {
        if candidate.parent().is_none() {
            // Filesystem root is never treated as a project root.
            break;
        }
        if has_project_marker(candidate) && !is_vendored(candidate) {
            return candidate.to_path_buf();
        }
    }

    tracing::warn!(
        start = %start.display(),
        "Could not find project root directory, using current directory"
    );
    start.to_path_buf()
}

fn has_project_marker(dir: &Path) -> bool {
    PROJECT_MARKERS.iter().any(|marker| dir.join(marker).exists())
}

fn is_vendored(dir: &Path) -> bool {
    dir.components()
        .any(|component| component.as_os_str() == VENDOR_DIR)
}
