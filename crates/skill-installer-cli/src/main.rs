//! agent-skill-installer - installs AI coding skills into tool directories
//!
//! Usage:
//!   agent-skill-installer install [--target cursor,aider] [--force] [--dry-run]
//!   agent-skill-installer uninstall [--target ...] [--dry-run]
//!   agent-skill-installer list [--json]

mod reporter;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skill_installer_core::commands::{
    InstallCommand, InstallOptions, ListCommand, ListOptions, ListReport, UninstallCommand,
    UninstallOptions,
};
use skill_installer_core::report::Reporter;

use crate::reporter::{ConsoleReporter, Verbosity};

#[derive(Parser)]
#[command(name = "agent-skill-installer")]
#[command(about = "Install AI coding skills into Claude Code, Cursor, Windsurf, and Aider", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the skill descriptor (defaults to the project's package.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only show errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    silent: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install the skill to its configured targets
    Install(InstallArgs),

    /// Remove the skill from its configured targets
    #[command(alias = "rm")]
    Uninstall(UninstallArgs),

    /// List installed skills
    #[command(alias = "ls")]
    List(ListArgs),
}

#[derive(Args)]
struct InstallArgs {
    /// Comma-separated targets to install to (e.g. "claude-code,cursor")
    #[arg(short, long)]
    target: Option<String>,

    /// Reinstall even if already installed
    #[arg(short, long)]
    force: bool,

    /// Show what would be installed without making changes
    #[arg(long)]
    dry_run: bool,

    /// Skip post-install hooks
    #[arg(long)]
    no_hooks: bool,

    /// Install under the home directory instead of the project
    #[arg(short, long)]
    global: bool,
}

#[derive(Args)]
struct UninstallArgs {
    /// Comma-separated targets to uninstall from
    #[arg(short, long)]
    target: Option<String>,

    /// Show what would be removed without making changes
    #[arg(long)]
    dry_run: bool,

    /// Uninstall from the home directory instead of the project
    #[arg(short, long)]
    global: bool,
}

#[derive(Args)]
struct ListArgs {
    /// Comma-separated targets to list
    #[arg(short, long)]
    target: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// List skills under the home directory
    #[arg(short, long)]
    global: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let verbosity = Verbosity::from_flags(cli.verbose, cli.silent);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| verbosity.log_directive().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let reporter = ConsoleReporter::new(verbosity);
    match cli.command {
        Commands::Install(args) => Ok(run_install(args, cli.config, &reporter)),
        Commands::Uninstall(args) => {
            run_uninstall(args, cli.config, &reporter);
            Ok(ExitCode::SUCCESS)
        }
        Commands::List(args) => {
            run_list(args, &reporter)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_install(args: InstallArgs, config: Option<PathBuf>, reporter: &ConsoleReporter) -> ExitCode {
    let mut options = InstallOptions::new()
        .with_force(args.force)
        .with_dry_run(args.dry_run)
        .with_skip_hooks(args.no_hooks)
        .with_global(args.global);
    if let Some(path) = config {
        options = options.with_config(path);
    }
    if let Some(target) = args.target {
        options = options.with_targets(target);
    }

    match InstallCommand::with_defaults().execute(&options, reporter) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "Install failed");
            reporter.newline();
            reporter.error(&format!("Installation failed: {err:#}"));
            reporter.newline();
            reporter.info("Troubleshooting:");
            reporter.info("  - Ensure package.json exists and is valid JSON");
            reporter.info("  - Ensure SKILL.md exists in the package root");
            reporter.info("  - Check file permissions for target directories");
            reporter.info("  - Try running with --verbose for more details");
            ExitCode::FAILURE
        }
    }
}

fn run_uninstall(args: UninstallArgs, config: Option<PathBuf>, reporter: &ConsoleReporter) {
    let mut options = UninstallOptions::new()
        .with_dry_run(args.dry_run)
        .with_global(args.global);
    if let Some(path) = config {
        options = options.with_config(path);
    }
    if let Some(target) = args.target {
        options = options.with_targets(target);
    }

    let report = UninstallCommand::with_defaults().execute(&options, reporter);
    for failure in report.failures() {
        tracing::debug!(target_name = %failure.target, "Uninstall incomplete: {}", failure.message);
    }
}

fn run_list(args: ListArgs, reporter: &ConsoleReporter) -> Result<()> {
    let mut options = ListOptions::new().with_global(args.global);
    if let Some(target) = args.target {
        options = options.with_targets(target);
    }

    let report = ListCommand::with_defaults()
        .execute(&options)
        .inspect_err(|err| reporter.error(&format!("Failed to list skills: {err:#}")))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    print_list(&report, reporter);
    Ok(())
}

fn print_list(report: &ListReport, reporter: &ConsoleReporter) {
    if report.skills.is_empty() {
        reporter.info("No skills installed");
        reporter.newline();
        reporter.info("To install a skill:");
        reporter.info("  npm install -g @your-org/your-skill");
        return;
    }

    reporter.section("Installed Skills:");
    for (target, skills) in report.by_target() {
        reporter.newline();
        reporter.info(&style(format!("{target}:")).bold().to_string());
        for listed in skills {
            let skill = &listed.skill;
            reporter.info(&format!(
                "  • {} {}",
                style(&skill.package).cyan(),
                style(format!("v{}", skill.version)).dim()
            ));
            reporter.info(&format!("    Path: {}", skill.path.display()));
            let installed = skill
                .installed_on()
                .map(|at| at.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| skill.installed_at.clone());
            reporter.info(&format!("    Installed: {installed}"));
        }
    }
    reporter.newline();
    reporter.divider();
    reporter.info(
        &style(format!("Total: {} skill(s) installed", report.skills.len()))
            .dim()
            .to_string(),
    );
}
