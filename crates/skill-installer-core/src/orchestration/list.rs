//! Installed skill listing across targets.

use serde::Serialize;

use crate::context::Context;
use crate::deploy::{Target, skills_base_dir};
use crate::manifest::{InstalledSkill, ManifestStore};
use crate::types::InstallLocation;

/// An installed skill as shown by `list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedSkill {
    #[serde(flatten)]
    pub skill: InstalledSkill,
    pub location: InstallLocation,
}

/// Collect manifest records from every target's base directory.
///
/// The record's `target` is replaced by the name of the target it was found
/// under. Targets whose manifest cannot be read are skipped.
pub fn list_installed(targets: &[Target], context: &Context) -> Vec<ListedSkill> {
    let location = context.location();
    let mut listed = Vec::new();

    for target in targets {
        let base_dir = skills_base_dir(target, context);
        let skills = match ManifestStore::new(&base_dir).installed_skills() {
            Ok(skills) => skills,
            Err(err) => {
                tracing::debug!(
                    target_name = %target.name,
                    path = %base_dir.display(),
                    "Could not read skills: {err:#}"
                );
                continue;
            }
        };

        listed.extend(skills.into_iter().map(|mut skill| {
            skill.target = target.name.clone();
            ListedSkill { skill, location }
        }));
    }
    listed
}
