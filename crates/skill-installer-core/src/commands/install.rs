//! Install command implementation.
//!
//! Reads and validates the skill descriptor, selects targets, and runs the
//! install orchestrator against the detected context.

use std::path::PathBuf;

use crate::config::{read_config, resolve_config_path, validate_config};
use crate::context::Context;
use crate::deploy::{enabled_targets, filter_targets};
use crate::error::InstallError;
use crate::hooks::{HookRunner, ShellHookRunner};
use crate::orchestration::{InstallOrchestrator, InstallPlan, InstallReport, InstallSummary};
use crate::report::Reporter;

/// Options for the install command
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Explicit descriptor path (defaults to `<project root>/package.json`)
    pub config: Option<PathBuf>,
    /// Comma-separated target filter
    pub targets: Option<String>,
    /// Reinstall over an existing install
    pub force: bool,
    /// Report what would happen without touching the filesystem
    pub dry_run: bool,
    /// Do not run `hooks.postinstall`
    pub skip_hooks: bool,
    /// Install under the home directory
    pub global: bool,
}

impl InstallOptions {
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

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_skip_hooks(mut self, skip_hooks: bool) -> Self {
        self.skip_hooks = skip_hooks;
        self
    }

    pub fn with_global(mut self, global: bool) -> Self {
        self.global = global;
        self
    }
}

/// Install command orchestrator
pub struct InstallCommand {
    context: Context,
    hooks: Box<dyn HookRunner>,
}

impl InstallCommand {
    /// Create an install command for an explicit context.
    pub fn new(context: Context) -> Self {
        Self {
            context,
            hooks: Box::new(ShellHookRunner::new()),
        }
    }

    /// Create an install command for the context detected from the environment.
    pub fn with_defaults() -> Self {
        Self::new(Context::detect())
    }

    /// Replace the hook runner.
    pub fn with_hook_runner(mut self, hooks: impl HookRunner + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Execute the install command.
    ///
    /// Descriptor and target-selection problems are returned as errors.
    /// Per-target failures are not; they are in the report.
    pub fn execute(
        &self,
        options: &InstallOptions,
        reporter: &dyn Reporter,
    ) -> anyhow::Result<InstallReport> {
        reporter.section("Installing AI Coding Skill...");

        let context = self.context.clone().with_global(options.global);
        let config_path =
            resolve_config_path(options.config.as_deref(), context.package_root(), context.cwd());
        let config = read_config(&config_path)?;
        validate_config(&config)?;

        reporter.debug(&format!(
            "Installation context: {}",
            if context.is_global() {
                "global"
            } else {
                "project-level"
            }
        ));
        reporter.debug(&format!("Package root: {}", context.package_root().display()));

        let mut targets = enabled_targets(&config);
        if let Some(filter) = options.targets.as_deref() {
            targets = filter_targets(targets, Some(filter));
            if targets.is_empty() {
                return Err(InstallError::NoMatchingTargets {
                    filter: filter.to_string(),
                }
                .into());
            }
        }

        reporter.info(&format!(
            "Installing skill \"{}\" to {} target(s):",
            config.skill_name(),
            targets.len()
        ));
        for target in &targets {
            reporter.info(&format!("  • {}", target.name));
        }

        let plan = InstallPlan {
            config: &config,
            source_root: context.package_root(),
            force: options.force,
            dry_run: options.dry_run,
            skip_hooks: options.skip_hooks,
        };
        let report =
            InstallOrchestrator::new(&context, reporter, self.hooks.as_ref()).run(&targets, &plan);

        report_summary(&report, reporter);
        Ok(report)
    }
}

fn report_summary(report: &InstallReport, reporter: &dyn Reporter) {
    match report.summary() {
        InstallSummary::DryRun => {
            reporter.info("DRY RUN COMPLETE");
            reporter.info("No changes were made. Run without --dry-run to install.");
        }
        InstallSummary::Installed => {
            reporter.success("Installation Complete!");
            reporter.info("Installed to:");
            for (target, path) in report.installed() {
                reporter.info(&format!("  • {target}: {}", path.display()));
            }
            reporter.info("Next Steps:");
            reporter.info("  1. Restart your AI coding tool(s)");
            reporter.info("  2. Ask: \"What skills are available?\"");
            reporter.info("  3. Start using your skill!");
        }
        InstallSummary::NothingInstalled => {
            reporter.warn("No skills were installed");
            reporter.info("Check the logs above for details");
        }
    }
}
