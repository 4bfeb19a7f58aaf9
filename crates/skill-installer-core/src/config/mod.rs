//! Skill descriptor: schema, parsing, validation, and lookup.

pub mod parser;
pub mod paths;
pub mod schema;

pub use parser::{parse_config_slice, read_config, validate_config, validate_identity};
pub use paths::{DEFAULT_CONFIG_FILE, default_config_path, resolve_config_path};
pub use schema::{
    DEFAULT_VERSION, HooksConfig, SkillConfig, TargetPaths, TargetPathsSpec,
    TargetSpec, extract_skill_name,
};
