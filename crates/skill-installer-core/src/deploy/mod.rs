//! Deploy coordination: target selection and install path resolution.

pub mod paths;
pub mod targeting;

pub use paths::{SkillPaths, resolve_path, skills_base_dir};
pub use targeting::{
    DEFAULT_TARGET, Target, enabled_targets, filter_targets, known_targets, parse_target_filter,
};
