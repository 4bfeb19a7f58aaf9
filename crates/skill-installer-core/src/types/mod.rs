//! Shared core types used across context, manifest, and listing layers.

use serde::{Deserialize, Serialize};

/// Where an install lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallLocation {
    /// Under the user's home directory.
    Global,
    /// Under the discovered project root.
    Project,
}

impl InstallLocation {
    pub fn from_global_flag(is_global: bool) -> Self {
        if is_global {
            InstallLocation::Global
        } else {
            InstallLocation::Project
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InstallLocation::Global => "global",
            InstallLocation::Project => "project",
        }
    }

    /// Label shown to users ("personal" for global installs).
    pub fn display_label(self) -> &'static str {
        match self {
            InstallLocation::Global => "personal",
            InstallLocation::Project => "project",
        }
    }
}

impl std::fmt::Display for InstallLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
