//! Installed skill manifest: types and per-directory persistence.

pub mod store;
pub mod types;

pub use store::{MANIFEST_FILE, ManifestStore};
pub use types::{InstalledSkill, Manifest, ManifestRecord};
