//! Skill Installer Core Library
//!
//! Installs a skill bundle (`SKILL.md` plus optional content directories)
//! into one or more AI tool directories, and tracks installs in a
//! per-directory manifest.

pub mod commands;
pub mod config;
pub mod context;
pub mod deploy;
pub mod error;
pub mod fs;
pub mod hooks;
pub mod manifest;
pub mod orchestration;
pub mod report;
pub mod types;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{HooksConfig, SkillConfig, TargetPaths, TargetSpec};

    // Context
    pub use crate::context::{Context, ContextProbe};

    // Targets and paths
    pub use crate::deploy::{SkillPaths, Target};

    // Manifest
    pub use crate::manifest::{InstalledSkill, Manifest, ManifestRecord, ManifestStore};

    // Commands
    pub use crate::commands::{
        InstallCommand, InstallOptions, ListCommand, ListOptions, UninstallCommand,
        UninstallOptions,
    };

    // Reporting
    pub use crate::report::{NullReporter, Reporter};

    // Errors
    pub use crate::error::InstallError;
    pub use crate::types::InstallLocation;
}
