//! Integration tests for the list command

mod support;

use serde_json::json;

use skill_installer_core::commands::{InstallCommand, InstallOptions, ListCommand, ListOptions};
use skill_installer_core::context::Context;
use skill_installer_core::deploy::{Target, known_targets, resolve_path};
use skill_installer_core::types::InstallLocation;

use support::{RecordingReporter, Sandbox};

fn install_with(context: Context) {
    InstallCommand::new(context)
        .execute(&InstallOptions::new().with_skip_hooks(true), &RecordingReporter::new())
        .expect("install should succeed");
}

fn claude_code() -> Target {
    known_targets()
        .into_iter()
        .find(|target| target.name == "claude-code")
        .expect("claude-code should be a known target")
}

#[test]
fn install_then_list_round_trips() {
    let sandbox = Sandbox::scoped();
    install_with(sandbox.context());

    let report = ListCommand::new(sandbox.context())
        .execute(&ListOptions::new())
        .expect("list should succeed");

    assert_eq!(report.skills.len(), 1);
    let listed = &report.skills[0];
    assert_eq!(listed.skill.package, "@acme/fmt");
    assert_eq!(listed.skill.version, "2.0.0");
    assert_eq!(listed.skill.target, "claude-code");
    assert_eq!(listed.location, InstallLocation::Project);
    assert_eq!(
        listed.skill.path,
        resolve_path(&claude_code(), "fmt", &sandbox.context())
    );
}

#[test]
fn list_spans_known_targets() {
    let sandbox = Sandbox::new(json!({
        "name": "fmt",
        "targets": {
            "claude-code": { "enabled": true, "paths": { "global": ".claude/skills", "project": ".claude/skills" } },
            "windsurf": { "enabled": true, "paths": { "global": ".windsurf/skills", "project": ".windsurf/skills" } }
        }
    }));
    install_with(sandbox.context());

    let all = ListCommand::new(sandbox.context())
        .execute(&ListOptions::new())
        .expect("list should succeed");
    let targets: Vec<_> = all.skills.iter().map(|s| s.skill.target.as_str()).collect();
    assert_eq!(targets, vec!["claude-code", "windsurf"]);

    let filtered = ListCommand::new(sandbox.context())
        .execute(&ListOptions::new().with_targets("windsurf"))
        .expect("list should succeed");
    assert_eq!(filtered.skills.len(), 1);
    assert_eq!(filtered.skills[0].skill.target, "windsurf");
}

#[test]
fn global_and_project_listings_are_separate() {
    let sandbox = Sandbox::scoped();
    install_with(sandbox.global_context());

    let project = ListCommand::new(sandbox.context())
        .execute(&ListOptions::new())
        .expect("list should succeed");
    assert!(project.skills.is_empty());

    let global = ListCommand::new(sandbox.context())
        .execute(&ListOptions::new().with_global(true))
        .expect("list should succeed");
    assert_eq!(global.skills.len(), 1);
    assert_eq!(global.skills[0].location, InstallLocation::Global);
}

#[test]
fn corrupt_manifest_lists_nothing() {
    let sandbox = Sandbox::scoped();
    let base = sandbox.project.join(".cursor").join("skills");
    std::fs::create_dir_all(&base).expect("create_dir_all should succeed");
    std::fs::write(base.join(".skills-manifest.json"), "[1, 2").expect("write should succeed");

    let report = ListCommand::new(sandbox.context())
        .execute(&ListOptions::new())
        .expect("list should succeed");
    assert!(report.skills.is_empty());
}

#[test]
fn json_output_shape() {
    let sandbox = Sandbox::scoped();
    install_with(sandbox.context());

    let report = ListCommand::new(sandbox.context())
        .execute(&ListOptions::new())
        .expect("list should succeed");
    let value = serde_json::to_value(&report).expect("serialize should succeed");

    let entry = &value["skills"][0];
    assert_eq!(entry["package"], "@acme/fmt");
    assert_eq!(entry["skillName"], "fmt");
    assert_eq!(entry["target"], "claude-code");
    assert_eq!(entry["location"], "project");
    assert!(entry["installedAt"].is_string());
}
