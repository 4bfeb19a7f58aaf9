//! Manifest types for installed skill tracking.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::path::PathBuf;

/// Installed skills in one target base directory, keyed by package.
///
/// Entries are kept as raw JSON so records written by other installers, or
/// with fields this one does not know, survive a read-modify-write intact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub skills: IndexMap<String, Value>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record under `package`, keeping its position
    /// when it already exists.
    pub fn upsert(&mut self, package: String, record: &ManifestRecord) {
        self.skills.insert(package, record.to_value());
    }

    pub fn get(&self, package: &str) -> Option<ManifestRecord> {
        self.skills.get(package).map(ManifestRecord::from_value)
    }

    pub fn contains(&self, package: &str) -> bool {
        self.skills.contains_key(package)
    }

    /// Remove the entry for `package`. Remaining entries keep their order.
    pub fn remove(&mut self, package: &str) -> bool {
        self.skills.shift_remove(package).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// `(package, record)` pairs in file order.
    pub fn records(&self) -> impl Iterator<Item = (&str, ManifestRecord)> {
        self.skills
            .iter()
            .map(|(key, value)| (key.as_str(), ManifestRecord::from_value(value)))
    }
}

/// One install of a skill into one target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestRecord {
    pub version: String,
    /// RFC 3339 as written; older or foreign entries may hold anything.
    pub installed_at: String,
    pub package: String,
    pub path: PathBuf,
    pub target: String,
    pub skill_name: String,
}

impl ManifestRecord {
    /// Read a record without rejecting it: missing or mistyped fields are empty.
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            version: field("version"),
            installed_at: field("installedAt"),
            package: field("package"),
            path: PathBuf::from(field("path")),
            target: field("target"),
            skill_name: field("skillName"),
        }
    }

    pub fn to_value(&self) -> Value {
        json!({
            "version": self.version,
            "installedAt": self.installed_at,
            "package": self.package,
            "path": self.path.to_string_lossy(),
            "target": self.target,
            "skillName": self.skill_name,
        })
    }

    /// Parsed install time, if the stored value is a valid timestamp.
    pub fn installed_on(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        parse_timestamp(&self.installed_at)
    }
}

/// A manifest record flattened for listing, carrying its manifest key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledSkill {
    pub package: String,
    pub version: String,
    pub installed_at: String,
    pub path: PathBuf,
    pub target: String,
    pub skill_name: String,
}

impl InstalledSkill {
    pub fn from_entry(key: &str, record: ManifestRecord) -> Self {
        Self {
            package: key.to_string(),
            version: record.version,
            installed_at: record.installed_at,
            path: record.path,
            target: record.target,
            skill_name: record.skill_name,
        }
    }

    pub fn installed_on(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        parse_timestamp(&self.installed_at)
    }
}

fn parse_timestamp(raw: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|at| at.with_timezone(&chrono::Utc))
}
