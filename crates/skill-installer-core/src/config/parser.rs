//! Descriptor reading and validation.

use std::path::{Component, Path};

use anyhow::Context;

use super::schema::SkillConfig;
use crate::error::InstallError;

/// Read and parse the skill descriptor at `path`.
///
/// A missing file maps to [`InstallError::ConfigNotFound`] and malformed JSON
/// to [`InstallError::ConfigParse`]. `package` is filled from `name` when the
/// descriptor leaves it out.
pub fn read_config(path: &Path) -> anyhow::Result<SkillConfig> {
    if !path.exists() {
        return Err(InstallError::ConfigNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let content = std::fs::read(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let mut config = parse_config_slice(&content).map_err(|source| InstallError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;

    if config.package.as_deref().is_none_or(str::is_empty) && !config.name.is_empty() {
        config.package = Some(config.name.clone());
    }
    Ok(config)
}

/// Parse descriptor content without touching the filesystem.
pub fn parse_config_slice(content: &[u8]) -> Result<SkillConfig, serde_json::Error> {
    serde_json::from_slice(content)
}

/// Check the descriptor invariants.
///
/// - `name` is non-empty
/// - `name` and `package` are safe to use as install path segments
/// - when `targets` is present, at least one is enabled
/// - every enabled target has relative global and project templates
pub fn validate_config(config: &SkillConfig) -> anyhow::Result<()> {
    validate_identity(config)?;

    let Some(targets) = config.targets.as_ref() else {
        return Ok(());
    };

    let mut enabled = 0usize;
    for (name, spec) in targets.iter().filter(|(_, spec)| spec.enabled) {
        enabled += 1;
        let paths = spec.resolved_paths().ok_or_else(|| {
            InstallError::invalid_config(format!(
                "target \"{name}\" must have both global and project paths"
            ))
        })?;
        ensure_relative_template(name, &paths.global)?;
        ensure_relative_template(name, &paths.project)?;
    }

    if enabled == 0 {
        return Err(InstallError::invalid_config("at least one target must be enabled").into());
    }
    Ok(())
}

/// Check that `name` and `package` only name directories below a skills
/// base directory.
///
/// Both are joined onto the base directory to form the canonical and alias
/// install paths, and those paths are deleted recursively on reinstall and
/// uninstall.
pub fn validate_identity(config: &SkillConfig) -> anyhow::Result<()> {
    if config.name.trim().is_empty() {
        return Err(InstallError::invalid_config("configuration must have a \"name\" field").into());
    }
    ensure_safe_segments("name", &config.name)?;
    ensure_safe_segments("package", config.package_key())?;
    Ok(())
}

fn ensure_safe_segments(field: &str, value: &str) -> anyhow::Result<()> {
    if Path::new(value).has_root() || Path::new(value).is_absolute() {
        return Err(InstallError::invalid_config(format!(
            "\"{field}\" value \"{value}\" must not be an absolute path"
        ))
        .into());
    }
    let unsafe_segment = value
        .split(['/', '\\'])
        .any(|segment| segment.is_empty() || segment == "." || segment == "..");
    if unsafe_segment {
        return Err(InstallError::invalid_config(format!(
            "\"{field}\" value \"{value}\" must not contain empty, '.' or '..' path segments"
        ))
        .into());
    }
    Ok(())
}

fn ensure_relative_template(target: &str, template: &str) -> anyhow::Result<()> {
    let path = Path::new(template);
    for component in path.components() {
        match component {
            Component::ParentDir => {
                return Err(InstallError::invalid_config(format!(
                    "target \"{target}\" path \"{template}\" must not contain '..'"
                ))
                .into());
            }
            Component::Prefix(_) | Component::RootDir => {
                return Err(InstallError::invalid_config(format!(
                    "target \"{target}\" path \"{template}\" must be relative"
                ))
                .into());
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{TargetPathsSpec, TargetSpec};

    fn invalid_message(result: anyhow::Result<()>) -> String {
        let err = result.expect_err("validation should fail");
        match err.downcast_ref::<InstallError>() {
            Some(InstallError::InvalidConfig(message)) => message.clone(),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn read_config_fills_package_from_name() {
        let tmp = tempfile::tempdir().expect("tempdir should succeed");
        let path = tmp.path().join("package.json");
        std::fs::write(
            &path,
            r#"{ "name": "@test/my-skill", "version": "1.0.0", "description": "Test skill" }"#,
        )
        .expect("write should succeed");

        let config = read_config(&path).expect("config should load");
        assert_eq!(config.name, "@test/my-skill");
        assert_eq!(config.package.as_deref(), Some("@test/my-skill"));
        assert_eq!(config.version.as_deref(), Some("1.0.0"));
    }

    #[test]
    fn read_config_reports_missing_file() {
        let tmp = tempfile::tempdir().expect("tempdir should succeed");
        let path = tmp.path().join("nonexistent.json");

        let err = read_config(&path).expect_err("missing config should fail");
        assert!(matches!(
            err.downcast_ref::<InstallError>(),
            Some(InstallError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn read_config_reports_invalid_json() {
        let tmp = tempfile::tempdir().expect("tempdir should succeed");
        let path = tmp.path().join("package.json");
        std::fs::write(&path, "invalid json {").expect("write should succeed");

        let err = read_config(&path).expect_err("invalid config should fail");
        let install_err = err
            .downcast_ref::<InstallError>()
            .expect("should be an InstallError");
        assert!(matches!(install_err, InstallError::ConfigParse { .. }));
        assert!(install_err.is_config_error());
    }

    #[test]
    fn validate_accepts_name_only() {
        assert!(validate_config(&SkillConfig::new("my-skill")).is_ok());
    }

    #[test]
    fn validate_requires_name() {
        let message = invalid_message(validate_config(&SkillConfig::default()));
        assert!(message.contains("name"));
    }

    #[test]
    fn validate_rejects_names_that_escape_the_skills_dir() {
        for package in ["..", ".", "@acme/..", "../other", "/tmp/skills", "a//b"] {
            let config = SkillConfig::new("fmt").with_package(package);
            let message = invalid_message(validate_config(&config));
            assert!(message.contains("package"), "package: {package}");
        }

        let message = invalid_message(validate_config(&SkillConfig::new("@acme/..")));
        assert!(message.contains("name"));
        assert!(validate_identity(&SkillConfig::new("..")).is_err());
    }

    #[test]
    fn validate_accepts_scoped_names() {
        let config = SkillConfig::new("@acme/fmt").with_package("@acme/fmt");
        assert!(validate_identity(&config).is_ok());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn validate_requires_an_enabled_target() {
        let config = SkillConfig::new("demo").with_target("cursor", TargetSpec::disabled(".cursor/skills"));
        let message = invalid_message(validate_config(&config));
        assert!(message.contains("at least one target"));
    }

    #[test]
    fn validate_requires_both_paths_on_enabled_targets() {
        let config = SkillConfig::new("demo").with_target(
            "cursor",
            TargetSpec {
                enabled: true,
                paths: Some(TargetPathsSpec {
                    global: Some(".cursor/skills".into()),
                    project: None,
                }),
            },
        );
        let message = invalid_message(validate_config(&config));
        assert!(message.contains("cursor"));
        assert!(message.contains("global and project"));
    }

    #[test]
    fn validate_ignores_incomplete_disabled_targets() {
        let config = SkillConfig::new("demo")
            .with_target("claude-code", TargetSpec::enabled(".claude/skills"))
            .with_target("aider", TargetSpec::default());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn validate_rejects_escaping_templates() {
        let config =
            SkillConfig::new("demo").with_target("evil", TargetSpec::enabled("../outside/skills"));
        assert!(invalid_message(validate_config(&config)).contains(".."));

        let config = SkillConfig::new("demo").with_target("abs", TargetSpec::enabled("/etc/skills"));
        assert!(invalid_message(validate_config(&config)).contains("relative"));
    }
}
