//! High-level commands.
//!
//! This module provides the public API for install, uninstall, and list.
//! Commands resolve the descriptor and targets, then hand off to
//! [`crate::orchestration`]. They are designed to be called by the CLI.

pub mod install;
pub mod list;
pub mod uninstall;

pub use install::{InstallCommand, InstallOptions};
pub use list::{ListCommand, ListOptions, ListReport};
pub use uninstall::{UninstallCommand, UninstallOptions};

pub use crate::orchestration::{
    InstallReport, InstallSummary, TargetFailure, UninstallReport, UninstallSummary,
};
