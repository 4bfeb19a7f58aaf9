//! Install path resolution for a target in a context.

use std::path::{Path, PathBuf};

use super::targeting::Target;
use crate::context::Context;

/// Root directory and template a target resolves against in this context.
fn root_and_template<'a>(target: &'a Target, ctx: &'a Context) -> (&'a Path, &'a str) {
    if ctx.is_global() {
        (ctx.home_dir(), target.paths.global.as_str())
    } else {
        (ctx.package_root(), target.paths.project.as_str())
    }
}

/// Install directory for `skill_name` under `target`.
pub fn resolve_path(target: &Target, skill_name: &str, ctx: &Context) -> PathBuf {
    skills_base_dir(target, ctx).join(skill_name)
}

/// Directory holding every skill (and the manifest) for `target`.
pub fn skills_base_dir(target: &Target, ctx: &Context) -> PathBuf {
    let (root, template) = root_and_template(target, ctx);
    root.join(template)
}

/// Canonical and alias install paths for one skill on one target.
///
/// The canonical path uses the bare skill name; the alias uses the full
/// package name (`@scope/name`), a layout older installs may have left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillPaths {
    pub canonical: PathBuf,
    pub alias: PathBuf,
    pub base_dir: PathBuf,
}

impl SkillPaths {
    pub fn resolve(target: &Target, skill_name: &str, package: &str, ctx: &Context) -> Self {
        Self {
            canonical: resolve_path(target, skill_name, ctx),
            alias: resolve_path(target, package, ctx),
            base_dir: skills_base_dir(target, ctx),
        }
    }

    /// The alias path, when it is a different directory from the canonical one.
    pub fn distinct_alias(&self) -> Option<&Path> {
        if self.alias == self.canonical {
            None
        } else {
            Some(&self.alias)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TargetPaths;

    fn target() -> Target {
        Target::new(
            "cursor",
            TargetPaths {
                global: ".cursor/global-skills".into(),
                project: ".cursor/skills".into(),
            },
        )
    }

    fn ctx(is_global: bool) -> Context {
        Context::new(
            is_global,
            PathBuf::from("/work/app"),
            PathBuf::from("/home/dev"),
            PathBuf::from("/work/app"),
        )
    }

    #[test]
    fn project_context_uses_package_root_and_project_template() {
        let path = resolve_path(&target(), "fmt", &ctx(false));
        assert_eq!(path, PathBuf::from("/work/app/.cursor/skills/fmt"));
        assert_eq!(
            skills_base_dir(&target(), &ctx(false)),
            PathBuf::from("/work/app/.cursor/skills")
        );
    }

    #[test]
    fn global_context_uses_home_and_global_template() {
        let path = resolve_path(&target(), "fmt", &ctx(true));
        assert_eq!(path, PathBuf::from("/home/dev/.cursor/global-skills/fmt"));
    }

    #[test]
    fn scoped_package_alias_differs_from_canonical() {
        let paths = SkillPaths::resolve(&target(), "fmt", "@acme/fmt", &ctx(false));
        assert_eq!(paths.canonical, PathBuf::from("/work/app/.cursor/skills/fmt"));
        assert_eq!(paths.alias, PathBuf::from("/work/app/.cursor/skills/@acme/fmt"));
        assert_eq!(paths.distinct_alias(), Some(paths.alias.as_path()));
    }

    #[test]
    fn unscoped_package_has_no_distinct_alias() {
        let paths = SkillPaths::resolve(&target(), "fmt", "fmt", &ctx(false));
        assert!(paths.distinct_alias().is_none());
    }
}
