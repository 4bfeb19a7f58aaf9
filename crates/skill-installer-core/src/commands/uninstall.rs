//! Uninstall command implementation.
//!
//! Uninstall is best-effort: it never returns an error. Problems reading the
//! descriptor, or a name or package that would resolve outside the skills
//! directory, end the run early with a warning in the report.

use std::path::PathBuf;

use crate::config::{read_config, resolve_config_path, validate_identity};
use crate::context::Context;
use crate::deploy::{enabled_targets, filter_targets};
use crate::orchestration::{UninstallOrchestrator, UninstallReport, UninstallSummary};
use crate::report::Reporter;

/// Options for the uninstall command
#[derive(Debug, Clone, Default)]
pub struct UninstallOptions {
    pub config: Option<PathBuf>,
    pub targets: Option<String>,
    pub dry_run: bool,
    pub global: bool,
}

impl UninstallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: impl Into<PathBuf>) -> Self {
        self.config = Some(config.into());
        self
    }

    pub fn with_targets(mut self, targets: impl Into<String>) -> Self {
        self.targets = Some(targets.into());
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_global(mut self, global: bool) -> Self {
        self.global = global;
        self
    }
}

/// Uninstall command orchestrator
#[derive(Debug, Clone)]
pub struct UninstallCommand {
    context: Context,
}

impl UninstallCommand {
    pub fn new(context: Context) -> Self {
        Self { context }
    }

    pub fn with_defaults() -> Self {
        Self::new(Context::detect())
    }

    pub fn execute(&self, options: &UninstallOptions, reporter: &dyn Reporter) -> UninstallReport {
        reporter.section("Uninstalling AI Coding Skill...");

        let context = self.context.clone().with_global(options.global);
        let config_path =
            resolve_config_path(options.config.as_deref(), context.package_root(), context.cwd());
        let config = match read_config(&config_path)
            .and_then(|config| validate_identity(&config).map(|()| config))
        {
            Ok(config) => config,
            Err(err) => {
                let message = format!("Warning during uninstall: {err:#}");
                reporter.warn(&message);
                reporter.info("Uninstallation completed with warnings");
                return UninstallReport::with_warning(message);
            }
        };

        let targets = filter_targets(enabled_targets(&config), options.targets.as_deref());
        if targets.is_empty()
            && let Some(filter) = options.targets.as_deref()
        {
            reporter.info(&format!("No matching targets found for: {filter}"));
        }

        reporter.info(&format!(
            "Uninstalling skill \"{}\" from {} target(s):",
            config.skill_name(),
            targets.len()
        ));
        for target in &targets {
            reporter.info(&format!("  • {}", target.name));
        }

        let report =
            UninstallOrchestrator::new(&context, reporter).run(&targets, &config, options.dry_run);

        match report.summary() {
            UninstallSummary::DryRun => {
                reporter.info("DRY RUN COMPLETE");
                reporter.info("No changes were made. Run without --dry-run to uninstall.");
            }
            UninstallSummary::Uninstalled => {
                reporter.success("Uninstallation Complete!");
                reporter.info("Uninstalled from:");
                for target in report.uninstalled_from() {
                    reporter.info(&format!("  • {target}"));
                }
            }
            UninstallSummary::NotInstalled => reporter.info("Skill was not installed"),
            UninstallSummary::CompletedWithWarnings => {
                reporter.info("Uninstallation completed with warnings");
            }
        }
        report
    }
}
