//! Per-target install, uninstall, and listing flows.
//!
//! Each orchestrator walks the selected targets in order and isolates them
//! from each other: an error in one target becomes a [`TargetFailure`] in
//! the report and the loop moves on.

pub mod install;
pub mod list;
pub mod uninstall;

pub use install::{InstallOrchestrator, InstallPlan, InstallReport, InstallSummary, TargetInstall};
pub use list::{ListedSkill, list_installed};
pub use uninstall::{TargetUninstall, UninstallOrchestrator, UninstallReport, UninstallSummary};

/// A target that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{target}: {message}")]
pub struct TargetFailure {
    pub target: String,
    pub message: String,
}

impl TargetFailure {
    pub fn new(target: impl Into<String>, err: &anyhow::Error) -> Self {
        Self {
            target: target.into(),
            message: format!("{err:#}"),
        }
    }
}
