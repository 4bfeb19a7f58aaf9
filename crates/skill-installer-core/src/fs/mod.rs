//! Filesystem primitives for skill bundles.

pub mod transfer;

pub use transfer::{
    OPTIONAL_DIRS, SKILL_DOCUMENT, copy_skill_files, path_exists, remove_directory,
};
