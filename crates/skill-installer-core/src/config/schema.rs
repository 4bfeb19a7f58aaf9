//! Configuration schema for the skill descriptor.
//!
//! The descriptor is a JSON document (by default the project's
//! `package.json`). Only the fields below are read; everything else in the
//! document is ignored.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Version recorded when the descriptor does not declare one.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Root configuration for a skill.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillConfig {
    /// Skill name, optionally scope-prefixed (`@scope/name`)
    #[serde(default)]
    pub name: String,

    /// Package identifier used as the manifest key (defaults to `name`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,

    /// Literal version string (defaults to `1.0.0`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Install targets in declaration order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<IndexMap<String, TargetSpec>>,

    /// Explicit source → destination file mappings
    #[serde(
        default,
        deserialize_with = "deserialize_files",
        skip_serializing_if = "Option::is_none"
    )]
    pub files: Option<IndexMap<String, String>>,

    /// Lifecycle hooks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooks: Option<HooksConfig>,
}

impl SkillConfig {
    /// Create a config with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_target(mut self, name: impl Into<String>, spec: TargetSpec) -> Self {
        self.targets
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), spec);
        self
    }

    pub fn with_postinstall(mut self, command: impl Into<String>) -> Self {
        self.hooks = Some(HooksConfig {
            postinstall: Some(command.into()),
        });
        self
    }

    /// Skill name with any scope prefix stripped.
    pub fn skill_name(&self) -> &str {
        extract_skill_name(&self.name)
    }

    /// Scope-qualified package identifier, falling back to the name.
    pub fn package_key(&self) -> &str {
        match self.package.as_deref() {
            Some(package) if !package.is_empty() => package,
            _ => &self.name,
        }
    }

    pub fn version_or_default(&self) -> &str {
        match self.version.as_deref() {
            Some(version) if !version.is_empty() => version,
            _ => DEFAULT_VERSION,
        }
    }

    pub fn postinstall(&self) -> Option<&str> {
        self.hooks
            .as_ref()
            .and_then(|hooks| hooks.postinstall.as_deref())
            .filter(|command| !command.trim().is_empty())
    }
}

/// Strip a leading `@scope/` prefix from a package name.
///
/// Names without a scope are returned unchanged, as are malformed scoped
/// names that have nothing after the slash.
pub fn extract_skill_name(package_name: &str) -> &str {
    if !package_name.starts_with('@') {
        return package_name;
    }
    match package_name.split('/').nth(1) {
        Some(rest) if !rest.is_empty() => rest,
        _ => package_name,
    }
}

/// Per-target settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpec {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<TargetPathsSpec>,
}

impl TargetSpec {
    /// An enabled target using the same template for both contexts.
    pub fn enabled(template: impl Into<String>) -> Self {
        let template = template.into();
        Self {
            enabled: true,
            paths: Some(TargetPathsSpec {
                global: Some(template.clone()),
                project: Some(template),
            }),
        }
    }

    pub fn disabled(template: impl Into<String>) -> Self {
        Self {
            enabled: false,
            ..Self::enabled(template)
        }
    }

    /// Both templates, if present and non-empty.
    pub fn resolved_paths(&self) -> Option<TargetPaths> {
        let paths = self.paths.as_ref()?;
        let global = paths.global.as_deref().filter(|p| !p.is_empty())?;
        let project = paths.project.as_deref().filter(|p| !p.is_empty())?;
        Some(TargetPaths {
            global: global.to_string(),
            project: project.to_string(),
        })
    }
}

/// Path templates as written in the descriptor; either may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetPathsSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

/// Validated relative path templates for a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPaths {
    pub global: String,
    pub project: String,
}

impl TargetPaths {
    pub fn same(template: impl Into<String>) -> Self {
        let template = template.into();
        Self {
            global: template.clone(),
            project: template,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HooksConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postinstall: Option<String>,
}

/// Accept `files` only when it is an object of strings.
///
/// npm descriptors use `files` for a publish allow-list (an array); that
/// shape has nothing to do with install mappings and is dropped.
fn deserialize_files<'de, D>(deserializer: D) -> Result<Option<IndexMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(serde_json::Value::Object(object)) = value else {
        return Ok(None);
    };
    let mut files = IndexMap::new();
    for (source, dest) in object {
        if let serde_json::Value::String(dest) = dest {
            files.insert(source, dest);
        }
    }
    Ok(Some(files))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_skill_name_strips_scope() {
        assert_eq!(extract_skill_name("@test/my-skill"), "my-skill");
        assert_eq!(extract_skill_name("@antskill/example"), "example");
        assert_eq!(extract_skill_name("@scope/name-with-dashes"), "name-with-dashes");
    }

    #[test]
    fn extract_skill_name_keeps_unscoped_names() {
        assert_eq!(extract_skill_name("my-skill"), "my-skill");
        assert_eq!(extract_skill_name("simple"), "simple");
    }

    #[test]
    fn extract_skill_name_is_idempotent() {
        for name in ["@a/b", "@a/b/c", "plain", "@scope", "@scope/", "x/y"] {
            let once = extract_skill_name(name);
            assert_eq!(extract_skill_name(once), once, "input: {name}");
        }
    }

    #[test]
    fn extract_skill_name_handles_malformed_scope() {
        assert_eq!(extract_skill_name("@scope"), "@scope");
        assert_eq!(extract_skill_name("@scope/"), "@scope/");
    }

    #[test]
    fn package_key_falls_back_to_name() {
        let config = SkillConfig::new("@acme/fmt");
        assert_eq!(config.package_key(), "@acme/fmt");
        assert_eq!(config.skill_name(), "fmt");
        assert_eq!(config.version_or_default(), DEFAULT_VERSION);

        let config = config.with_package("@acme/formatter").with_version("2.0.0");
        assert_eq!(config.package_key(), "@acme/formatter");
        assert_eq!(config.version_or_default(), "2.0.0");
    }

    #[test]
    fn targets_keep_declaration_order() {
        let json = r#"{
            "name": "demo",
            "targets": {
                "windsurf": { "enabled": true, "paths": { "global": ".windsurf/skills", "project": ".windsurf/skills" } },
                "claude-code": { "enabled": true, "paths": { "global": ".claude/skills", "project": ".claude/skills" } },
                "aider": { "enabled": false }
            }
        }"#;
        let config: SkillConfig = serde_json::from_str(json).expect("config should parse");
        let targets = config.targets.expect("targets should be present");
        let names: Vec<&str> = targets.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["windsurf", "claude-code", "aider"]);
        assert!(targets.get("aider").is_some_and(|spec| spec.resolved_paths().is_none()));
    }

    #[test]
    fn npm_files_array_is_ignored() {
        let json = r#"{ "name": "demo", "files": ["SKILL.md", "scripts/"] }"#;
        let config: SkillConfig = serde_json::from_str(json).expect("config should parse");
        assert!(config.files.is_none());

        let json = r#"{ "name": "demo", "files": { "docs/a.md": "a.md" } }"#;
        let config: SkillConfig = serde_json::from_str(json).expect("config should parse");
        let files = config.files.expect("files mapping should be kept");
        assert_eq!(files.get("docs/a.md").map(String::as_str), Some("a.md"));
    }

    #[test]
    fn blank_postinstall_is_treated_as_absent() {
        let config = SkillConfig::new("demo").with_postinstall("   ");
        assert!(config.postinstall().is_none());
        let config = SkillConfig::new("demo").with_postinstall("echo ok");
        assert_eq!(config.postinstall(), Some("echo ok"));
    }
}
