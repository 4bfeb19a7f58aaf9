//! List command implementation.

use serde::Serialize;

use crate::context::Context;
use crate::deploy::{filter_targets, known_targets};
use crate::orchestration::{ListedSkill, list_installed};

/// Options for the list command
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Comma-separated target filter
    pub targets: Option<String>,
    pub global: bool,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_targets(mut self, targets: impl Into<String>) -> Self {
        self.targets = Some(targets.into());
        self
    }

    pub fn with_global(mut self, global: bool) -> Self {
        self.global = global;
        self
    }
}

/// Installed skills; serializes as `{ "skills": [...] }`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListReport {
    pub skills: Vec<ListedSkill>,
}

impl ListReport {
    /// Skills grouped by target name, in first-seen order.
    pub fn by_target(&self) -> Vec<(&str, Vec<&ListedSkill>)> {
        let mut groups: Vec<(&str, Vec<&ListedSkill>)> = Vec::new();
        for listed in &self.skills {
            let target = listed.skill.target.as_str();
            match groups.iter_mut().find(|(name, _)| *name == target) {
                Some((_, members)) => members.push(listed),
                None => groups.push((target, vec![listed])),
            }
        }
        groups
    }
}

/// List command
///
/// Looks at every known tool directory, not just the targets of a
/// particular descriptor.
#[derive(Debug, Clone)]
pub struct ListCommand {
    context: Context,
}

impl ListCommand {
    pub fn new(context: Context) -> Self {
        Self { context }
    }

    pub fn with_defaults() -> Self {
        Self::new(Context::detect())
    }

    pub fn execute(&self, options: &ListOptions) -> anyhow::Result<ListReport> {
        let context = self.context.clone().with_global(options.global);
        let targets = filter_targets(known_targets(), options.targets.as_deref());
        Ok(ListReport {
            skills: list_installed(&targets, &context),
        })
    }
}
