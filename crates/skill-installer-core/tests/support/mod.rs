#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use skill_installer_core::context::Context;
use skill_installer_core::report::Reporter;

/// Reporter that keeps every message for assertions.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    messages: RefCell<Vec<(&'static str, String)>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.messages
            .borrow()
            .iter()
            .any(|(_, message)| message.contains(needle))
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|(level, _)| *level == "error")
            .map(|(_, message)| message.clone())
            .collect()
    }

    fn push(&self, level: &'static str, message: &str) {
        self.messages.borrow_mut().push((level, message.to_string()));
    }
}

impl Reporter for RecordingReporter {
    fn section(&self, title: &str) {
        self.push("section", title);
    }
    fn info(&self, message: &str) {
        self.push("info", message);
    }
    fn success(&self, message: &str) {
        self.push("success", message);
    }
    fn warn(&self, message: &str) {
        self.push("warn", message);
    }
    fn error(&self, message: &str) {
        self.push("error", message);
    }
    fn debug(&self, message: &str) {
        self.push("debug", message);
    }
}

/// A project with a skill descriptor and bundle, plus a separate home dir.
pub struct Sandbox {
    _temp: TempDir,
    pub project: PathBuf,
    pub home: PathBuf,
}

impl Sandbox {
    pub fn new(descriptor: serde_json::Value) -> Self {
        let content = serde_json::to_string_pretty(&descriptor).expect("Failed to serialize");
        Self::from_raw(&content)
    }

    /// Build from descriptor text, keeping its key order as written.
    pub fn from_raw(descriptor: &str) -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let project = temp.path().join("project");
        let home = temp.path().join("home");
        std::fs::create_dir_all(&project).expect("Failed to create project dir");
        std::fs::create_dir_all(&home).expect("Failed to create home dir");

        let sandbox = Self {
            _temp: temp,
            project,
            home,
        };
        sandbox.write("package.json", descriptor);
        sandbox.write("SKILL.md", "---\nname: fmt\n---\n\nFormat things.\n");
        sandbox.write("scripts/format.sh", "#!/bin/sh\necho formatting\n");
        sandbox
    }

    /// Scoped `@acme/fmt` at 2.0.0 with no explicit targets.
    pub fn scoped() -> Self {
        Self::new(serde_json::json!({ "name": "@acme/fmt", "version": "2.0.0" }))
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.project.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    pub fn context(&self) -> Context {
        Context::new(
            false,
            self.project.clone(),
            self.home.clone(),
            self.project.clone(),
        )
    }

    pub fn global_context(&self) -> Context {
        Context::new(
            true,
            self.project.clone(),
            self.home.clone(),
            self.project.clone(),
        )
    }

    pub fn claude_skills(&self) -> PathBuf {
        self.project.join(".claude").join("skills")
    }
}

pub fn read_manifest(base_dir: &Path) -> serde_json::Value {
    let content = std::fs::read_to_string(base_dir.join(".skills-manifest.json"))
        .expect("Failed to read manifest");
    serde_json::from_str(&content).expect("Failed to parse manifest")
}
