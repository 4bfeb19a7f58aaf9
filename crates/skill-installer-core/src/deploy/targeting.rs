//! Target selection: which tool directories an operation acts on.

use crate::config::{SkillConfig, TargetPaths};

/// Target used when the descriptor declares no `targets`.
pub const DEFAULT_TARGET: &str = "claude-code";

/// A resolved install destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub paths: TargetPaths,
}

impl Target {
    pub fn new(name: impl Into<String>, paths: TargetPaths) -> Self {
        Self {
            name: name.into(),
            paths,
        }
    }

    fn well_known(name: &str, template: &str) -> Self {
        Self::new(name, TargetPaths::same(template))
    }

    /// The built-in default target.
    pub fn default_target() -> Self {
        Self::well_known(DEFAULT_TARGET, ".claude/skills")
    }
}

/// Every tool the installer knows about, in display order.
///
/// `list` inspects these regardless of any descriptor.
pub fn known_targets() -> Vec<Target> {
    vec![
        Target::default_target(),
        Target::well_known("cursor", ".cursor/skills"),
        Target::well_known("windsurf", ".windsurf/skills"),
        Target::well_known("aider", ".aider/skills"),
    ]
}

/// Enabled targets from the descriptor, in declaration order.
///
/// Without a `targets` table this is just the default target. Enabled
/// entries missing a path template are skipped here; `validate_config`
/// rejects them before an install gets this far.
pub fn enabled_targets(config: &SkillConfig) -> Vec<Target> {
    let Some(targets) = config.targets.as_ref() else {
        return vec![Target::default_target()];
    };

    targets
        .iter()
        .filter(|(_, spec)| spec.enabled)
        .filter_map(|(name, spec)| {
            let paths = spec.resolved_paths();
            if paths.is_none() {
                tracing::debug!(target_name = name.as_str(), "Skipping target without path templates");
            }
            paths.map(|paths| Target::new(name, paths))
        })
        .collect()
}

/// Parse a comma-separated target filter into trimmed, non-empty names.
pub fn parse_target_filter(filter: &str) -> Vec<String> {
    filter
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Keep only the targets named in `filter`, preserving `targets` order.
///
/// `None` returns the input unchanged. An empty result is not an error here;
/// callers decide whether that is fatal.
pub fn filter_targets(targets: Vec<Target>, filter: Option<&str>) -> Vec<Target> {
    let Some(filter) = filter else {
        return targets;
    };
    let requested = parse_target_filter(filter);
    targets
        .into_iter()
        .filter(|target| requested.iter().any(|name| *name == target.name))
        .collect()
}
