//! Best-effort uninstall orchestration.

use std::path::PathBuf;

use super::TargetFailure;
use crate::config::SkillConfig;
use crate::context::Context;
use crate::deploy::{SkillPaths, Target};
use crate::fs::{path_exists, remove_directory};
use crate::manifest::ManifestStore;
use crate::report::Reporter;

/// What happened (or would happen, in a dry run) for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUninstall {
    pub target: String,
    /// Directories removed, or found and slated for removal in a dry run.
    pub removed: Vec<PathBuf>,
    pub manifest_updated: bool,
}

impl TargetUninstall {
    pub fn was_installed(&self) -> bool {
        !self.removed.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UninstallSummary {
    DryRun,
    Uninstalled,
    NotInstalled,
    /// The run could not start; see `warnings`.
    CompletedWithWarnings,
}

#[derive(Debug, Clone, Default)]
pub struct UninstallReport {
    pub dry_run: bool,
    pub results: Vec<Result<TargetUninstall, TargetFailure>>,
    pub warnings: Vec<String>,
}

impl UninstallReport {
    /// Report for a run that stopped before touching any target.
    pub fn with_warning(message: impl Into<String>) -> Self {
        Self {
            warnings: vec![message.into()],
            ..Self::default()
        }
    }

    /// Targets a skill directory was removed from.
    pub fn uninstalled_from(&self) -> impl Iterator<Item = &str> {
        self.results
            .iter()
            .filter_map(|result| result.as_ref().ok())
            .filter(|outcome| outcome.was_installed())
            .map(|outcome| outcome.target.as_str())
    }

    pub fn failures(&self) -> impl Iterator<Item = &TargetFailure> {
        self.results.iter().filter_map(|result| result.as_ref().err())
    }

    pub fn summary(&self) -> UninstallSummary {
        if !self.warnings.is_empty() {
            UninstallSummary::CompletedWithWarnings
        } else if self.dry_run {
            UninstallSummary::DryRun
        } else if self.uninstalled_from().next().is_some() {
            UninstallSummary::Uninstalled
        } else {
            UninstallSummary::NotInstalled
        }
    }
}

/// Drives one uninstall across targets.
pub struct UninstallOrchestrator<'a> {
    context: &'a Context,
    reporter: &'a dyn Reporter,
}

impl<'a> UninstallOrchestrator<'a> {
    pub fn new(context: &'a Context, reporter: &'a dyn Reporter) -> Self {
        Self { context, reporter }
    }

    pub fn run(&self, targets: &[Target], config: &SkillConfig, dry_run: bool) -> UninstallReport {
        let mut report = UninstallReport {
            dry_run,
            ..UninstallReport::default()
        };

        for target in targets {
            let result = self.uninstall_target(target, config, dry_run).map_err(|err| {
                let failure = TargetFailure::new(&target.name, &err);
                tracing::debug!(target_name = %target.name, error = ?err, "Target uninstall failed");
                self.reporter.error(&format!(
                    "Failed to uninstall from {}: {}",
                    failure.target, failure.message
                ));
                failure
            });
            report.results.push(result);
        }
        report
    }

    fn uninstall_target(
        &self,
        target: &Target,
        config: &SkillConfig,
        dry_run: bool,
    ) -> anyhow::Result<TargetUninstall> {
        self.reporter
            .section(&format!("Uninstalling from {}...", target.name));

        let package = config.package_key();
        let paths = SkillPaths::resolve(target, config.skill_name(), package, self.context);
        let store = ManifestStore::new(&paths.base_dir);

        let mut candidates = vec![(paths.canonical.clone(), config.skill_name())];
        if let Some(alias) = paths.distinct_alias() {
            candidates.push((alias.to_path_buf(), package));
        }

        let mut outcome = TargetUninstall {
            target: target.name.clone(),
            removed: Vec::new(),
            manifest_updated: false,
        };

        if dry_run {
            self.reporter
                .info("  [DRY RUN] Would perform the following:");
            for (path, _) in candidates {
                if path_exists(&path) {
                    self.reporter
                        .info(&format!("  - Remove directory: {}", path.display()));
                    outcome.removed.push(path);
                }
            }
            outcome.manifest_updated = store.load()?.contains(package);
            if outcome.manifest_updated {
                self.reporter.info("  - Update manifest");
            }
            return Ok(outcome);
        }

        for (path, label) in candidates {
            if remove_directory(&path)? {
                self.reporter
                    .success(&format!("Removed skill directory: {label}"));
                outcome.removed.push(path);
            }
        }

        // Stale entries are cleared even when nothing was on disk.
        outcome.manifest_updated = store.remove(package)?;
        if outcome.manifest_updated {
            self.reporter.success("Updated manifest");
        }

        if outcome.was_installed() {
            self.reporter
                .success(&format!("Uninstalled from {}", target.name));
        } else {
            self.reporter
                .info(&format!("  Skill was not installed in {}", target.name));
        }
        Ok(outcome)
    }
}
