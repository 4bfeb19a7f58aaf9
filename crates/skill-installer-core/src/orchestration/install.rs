//! Install orchestration.

use std::path::{Path, PathBuf};

use super::TargetFailure;
use crate::config::SkillConfig;
use crate::context::Context;
use crate::deploy::{SkillPaths, Target};
use crate::fs::{OPTIONAL_DIRS, SKILL_DOCUMENT, copy_skill_files, path_exists, remove_directory};
use crate::hooks::{HookOutcome, HookRunner};
use crate::manifest::ManifestStore;
use crate::report::Reporter;

/// What to install and how.
#[derive(Debug, Clone)]
pub struct InstallPlan<'a> {
    pub config: &'a SkillConfig,
    /// Directory holding `SKILL.md` and the optional content directories.
    pub source_root: &'a Path,
    pub force: bool,
    pub dry_run: bool,
    pub skip_hooks: bool,
}

/// Terminal state of a target that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetInstall {
    Installed {
        target: String,
        path: PathBuf,
        copied: Vec<String>,
        hook: Option<HookOutcome>,
    },
    /// Already present and `force` was not set.
    Skipped { target: String, path: PathBuf },
    /// Dry run; nothing was touched.
    Previewed { target: String, path: PathBuf },
}

impl TargetInstall {
    pub fn target(&self) -> &str {
        match self {
            TargetInstall::Installed { target, .. }
            | TargetInstall::Skipped { target, .. }
            | TargetInstall::Previewed { target, .. } => target,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            TargetInstall::Installed { path, .. }
            | TargetInstall::Skipped { path, .. }
            | TargetInstall::Previewed { path, .. } => path,
        }
    }
}

/// Overall outcome of an install run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallSummary {
    DryRun,
    Installed,
    /// Every target was skipped or failed.
    NothingInstalled,
}

/// Per-target results of an install run, in target order.
#[derive(Debug, Clone, Default)]
pub struct InstallReport {
    pub dry_run: bool,
    pub results: Vec<Result<TargetInstall, TargetFailure>>,
}

impl InstallReport {
    /// `(target, path)` for every target that was installed.
    pub fn installed(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.results.iter().filter_map(|result| match result {
            Ok(TargetInstall::Installed { target, path, .. }) => {
                Some((target.as_str(), path.as_path()))
            }
            _ => None,
        })
    }

    pub fn skipped(&self) -> impl Iterator<Item = &TargetInstall> {
        self.results
            .iter()
            .filter_map(|result| result.as_ref().ok())
            .filter(|outcome| matches!(outcome, TargetInstall::Skipped { .. }))
    }

    pub fn failures(&self) -> impl Iterator<Item = &TargetFailure> {
        self.results.iter().filter_map(|result| result.as_ref().err())
    }

    pub fn summary(&self) -> InstallSummary {
        if self.dry_run {
            InstallSummary::DryRun
        } else if self.installed().next().is_some() {
            InstallSummary::Installed
        } else {
            InstallSummary::NothingInstalled
        }
    }
}

/// Drives one install across targets.
pub struct InstallOrchestrator<'a> {
    context: &'a Context,
    reporter: &'a dyn Reporter,
    hooks: &'a dyn HookRunner,
}

impl<'a> InstallOrchestrator<'a> {
    pub fn new(context: &'a Context, reporter: &'a dyn Reporter, hooks: &'a dyn HookRunner) -> Self {
        Self {
            context,
            reporter,
            hooks,
        }
    }

    /// Install into every target in order. Never fails as a whole.
    pub fn run(&self, targets: &[Target], plan: &InstallPlan<'_>) -> InstallReport {
        let mut report = InstallReport {
            dry_run: plan.dry_run,
            results: Vec::with_capacity(targets.len()),
        };

        for target in targets {
            let result = self.install_target(target, plan).map_err(|err| {
                let failure = TargetFailure::new(&target.name, &err);
                tracing::debug!(target_name = %target.name, error = ?err, "Target install failed");
                self.reporter.error(&format!(
                    "Failed to install to {}: {}",
                    failure.target, failure.message
                ));
                failure
            });
            report.results.push(result);
        }
        report
    }

    fn install_target(
        &self,
        target: &Target,
        plan: &InstallPlan<'_>,
    ) -> anyhow::Result<TargetInstall> {
        let config = plan.config;
        self.reporter
            .section(&format!("Installing to {}...", target.name));

        let paths = SkillPaths::resolve(
            target,
            config.skill_name(),
            config.package_key(),
            self.context,
        );
        let install_path = paths.canonical.clone();

        self.reporter.info(&format!(
            "  Type: {}",
            self.context.location().display_label()
        ));
        self.reporter
            .info(&format!("  Directory: {}", install_path.display()));

        if !plan.force && path_exists(&install_path) {
            self.reporter
                .warn("  Skill already installed. Use --force to reinstall.");
            return Ok(TargetInstall::Skipped {
                target: target.name.clone(),
                path: install_path,
            });
        }

        if plan.dry_run {
            self.preview(&install_path, plan);
            return Ok(TargetInstall::Previewed {
                target: target.name.clone(),
                path: install_path,
            });
        }

        if let Some(alias) = paths.distinct_alias()
            && path_exists(alias)
        {
            self.reporter.debug("Cleaning up alternative path format...");
            remove_directory(alias)?;
        }

        let copied = copy_skill_files(plan.source_root, &install_path, config, self.reporter)?;
        self.reporter
            .success(&format!("Copied {} file(s)", copied.len()));

        ManifestStore::new(&paths.base_dir).update(config, &install_path, &target.name)?;
        self.reporter.success("Updated manifest");

        let hook = self.run_postinstall(config, &install_path, plan.skip_hooks);

        self.reporter
            .success(&format!("Installed to {}", target.name));
        Ok(TargetInstall::Installed {
            target: target.name.clone(),
            path: install_path,
            copied,
            hook,
        })
    }

    fn preview(&self, install_path: &Path, plan: &InstallPlan<'_>) {
        let reporter = self.reporter;
        reporter.info("  [DRY RUN] Would perform the following:");
        reporter.info(&format!("  - Create directory: {}", install_path.display()));
        reporter.info(&format!("  - Copy {SKILL_DOCUMENT}"));
        let dirs: Vec<String> = OPTIONAL_DIRS.iter().map(|dir| format!("{dir}/")).collect();
        reporter.info(&format!("  - Auto-detect and copy: {}", dirs.join(", ")));
        reporter.info("  - Update manifest");
        if !plan.skip_hooks
            && let Some(command) = plan.config.postinstall()
        {
            reporter.info(&format!("  - Run post-install hook: {command}"));
        }
    }

    fn run_postinstall(
        &self,
        config: &SkillConfig,
        install_path: &Path,
        skip_hooks: bool,
    ) -> Option<HookOutcome> {
        let command = config.postinstall()?;
        if skip_hooks {
            self.reporter.debug("Skipping post-install hooks");
            return None;
        }

        self.reporter
            .debug(&format!("Running post-install hook: {command}"));
        let outcome = self.hooks.run(command, install_path);
        if outcome.is_success() {
            self.reporter.success("Post-install hook completed");
        } else {
            self.reporter.warn(&format!(
                "Post-install hook failed ({}), continuing anyway",
                outcome.describe()
            ));
        }
        Some(outcome)
    }
}
