//! Post-install hook execution.
//!
//! Hooks are shell commands from the descriptor, run in the install
//! directory after a target is installed. A hook never fails the install:
//! every problem, including a timeout, comes back as a [`HookOutcome`].

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

/// Upper bound on a single hook run.
pub const DEFAULT_HOOK_TIMEOUT: Duration = Duration::from_secs(30);

/// Result of running one hook command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    Succeeded,
    Failed { message: String },
    TimedOut,
}

impl HookOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, HookOutcome::Succeeded)
    }

    /// Short human-readable reason for a non-successful outcome.
    pub fn describe(&self) -> String {
        match self {
            HookOutcome::Succeeded => "completed".to_string(),
            HookOutcome::Failed { message } => message.clone(),
            HookOutcome::TimedOut => "timed out".to_string(),
        }
    }
}

/// Runs hook commands.
pub trait HookRunner {
    fn run(&self, command: &str, working_dir: &Path) -> HookOutcome;
}

/// Runs hooks through the platform shell under a hard timeout.
#[derive(Debug, Clone)]
pub struct ShellHookRunner {
    timeout: Duration,
}

impl Default for ShellHookRunner {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_HOOK_TIMEOUT,
        }
    }
}

impl ShellHookRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run_async(&self, command: &str, working_dir: &Path) -> HookOutcome {
        let child = shell_command(command)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();
        let child = match child {
            Ok(child) => child,
            Err(err) => {
                tracing::warn!(command, "Failed to spawn hook: {err}");
                return HookOutcome::Failed {
                    message: format!("failed to spawn hook: {err}"),
                };
            }
        };

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(err)) => {
                tracing::warn!(command, "Hook execution failed: {err}");
                return HookOutcome::Failed {
                    message: format!("hook execution failed: {err}"),
                };
            }
            Err(_) => {
                tracing::warn!(command, timeout_secs = self.timeout.as_secs(), "Hook timed out");
                return HookOutcome::TimedOut;
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        tracing::debug!(
            command,
            exit_code = output.status.code(),
            stderr_len = stderr.len(),
            "Hook execution complete"
        );

        if output.status.success() {
            return HookOutcome::Succeeded;
        }
        let message = if stderr.is_empty() {
            match output.status.code() {
                Some(code) => format!("hook exited with code {code}"),
                None => "hook terminated by signal".to_string(),
            }
        } else {
            stderr
        };
        HookOutcome::Failed { message }
    }
}

impl HookRunner for ShellHookRunner {
    fn run(&self, command: &str, working_dir: &Path) -> HookOutcome {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                return HookOutcome::Failed {
                    message: format!("failed to start hook runtime: {err}"),
                };
            }
        };
        runtime.block_on(self.run_async(command, working_dir))
    }
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}
