use skillgraph::test_utils::{SkillFixture, init_test_logging};

use crate::common::{FileAssert, TestProject};

/// Test building a manifest for a small healthy registry
#[test]
fn test_build_writes_manifest_to_default_path() {
    init_test_logging(None);
    let project = TestProject::new().unwrap();
    project
        .add_skill(&SkillFixture::with_dependencies("alpha", &["beta"]))
        .unwrap();
    project.add_skill(&SkillFixture::basic("beta")).unwrap();

    let output = project.run_skillgraph(&["build", "skills"]).unwrap();
    output
        .assert_success()
        .assert_stdout_contains("Wrote manifest for 2 skills");

    let manifest_path = project.default_manifest_path();
    FileAssert::exists(&manifest_path);

    let manifest = project.read_manifest(&manifest_path).unwrap();
    assert_eq!(manifest["version"], 1);
    assert_eq!(manifest["stats"]["totalSkills"], 2);
    assert_eq!(manifest["skills"]["alpha"]["dependsOn"][0], "beta");
    assert_eq!(manifest["skills"]["beta"]["name"], "beta");
}

/// Test that per-skill failures do not fail the build
#[test]
fn test_build_records_load_errors_and_still_succeeds() {
    init_test_logging(None);
    let project = TestProject::new().unwrap();
    project.add_skill(&SkillFixture::basic("healthy")).unwrap();
    project.add_bare_directory("broken").unwrap();

    let output = project.run_skillgraph(&["build", "skills"]).unwrap();
    output
        .assert_success()
        .assert_stdout_contains("1 skills failed to load");

    let manifest = project
        .read_manifest(&project.default_manifest_path())
        .unwrap();
    assert_eq!(manifest["stats"]["errors"], 1);
    assert_eq!(manifest["errors"][0]["skill"], "broken");
    assert_eq!(manifest["errors"][0]["error"], "Missing SKILL.md");
    assert!(manifest["skills"]["healthy"].is_object());
}

/// Test streaming the manifest to stdout instead of a file
#[test]
fn test_build_stdout_emits_manifest_json() {
    init_test_logging(None);
    let project = TestProject::new().unwrap();
    project.add_skill(&SkillFixture::basic("solo")).unwrap();

    let output = project
        .run_skillgraph(&["build", "skills", "--stdout"])
        .unwrap();
    output.assert_success();

    let manifest = output.stdout_json();
    assert_eq!(manifest["stats"]["totalSkills"], 1);
    assert!(manifest["skills"]["solo"].is_object());

    FileAssert::not_exists(project.default_manifest_path());
}

/// Test --output with a nested path that does not exist yet
#[test]
fn test_build_custom_output_path() {
    init_test_logging(None);
    let project = TestProject::new().unwrap();
    project.add_skill(&SkillFixture::basic("solo")).unwrap();

    let output = project
        .run_skillgraph(&["build", "skills", "--output", "out/custom.json"])
        .unwrap();
    output.assert_success();

    let custom = project.project_path().join("out/custom.json");
    FileAssert::exists(&custom);
    FileAssert::contains(&custom, "\"totalSkills\": 1");
    FileAssert::not_exists(project.default_manifest_path());
}

/// Test that build picks up root and output from skillgraph.toml
#[test]
fn test_build_uses_discovered_config() {
    init_test_logging(None);
    let project = TestProject::new().unwrap();
    project.add_skill(&SkillFixture::basic("configured")).unwrap();
    project
        .write_config("root = \"skills\"\noutput = \"generated/manifest.json\"\n")
        .unwrap();

    let output = project.run_skillgraph(&["build"]).unwrap();
    output.assert_success();

    FileAssert::exists(project.project_path().join("generated/manifest.json"));
    FileAssert::not_exists(project.default_manifest_path());
}

/// Test that configured ignore patterns exclude matching directories
#[test]
fn test_build_applies_config_ignore_patterns() {
    init_test_logging(None);
    let project = TestProject::new().unwrap();
    project.add_skill(&SkillFixture::basic("keeper")).unwrap();
    project.add_skill(&SkillFixture::basic("drafts-wip")).unwrap();
    project
        .write_config("root = \"skills\"\nignore = [\"drafts-*\"]\n")
        .unwrap();

    let output = project.run_skillgraph(&["build"]).unwrap();
    output.assert_success();

    let manifest = project
        .read_manifest(&project.default_manifest_path())
        .unwrap();
    assert_eq!(manifest["stats"]["totalSkills"], 1);
    assert!(manifest["skills"]["keeper"].is_object());
    assert!(manifest["skills"].get("drafts-wip").is_none());
}

/// Test the error path for a registry root that does not exist
#[test]
fn test_build_missing_registry_fails() {
    init_test_logging(None);
    let project = TestProject::new().unwrap();

    let output = project.run_skillgraph(&["build", "no-such-dir"]).unwrap();
    output
        .assert_failure()
        .assert_stderr_contains("Skill registry directory not found");
}

/// Test the error path for an explicit config that does not exist
#[test]
fn test_build_explicit_missing_config_fails() {
    init_test_logging(None);
    let project = TestProject::new().unwrap();
    project.add_skill(&SkillFixture::basic("solo")).unwrap();

    let output = project
        .run_skillgraph(&["build", "skills", "--config", "nope.toml"])
        .unwrap();
    output
        .assert_failure()
        .assert_stderr_contains("Configuration file not found");
}

/// Test that --stdout and --output are mutually exclusive
#[test]
fn test_build_rejects_stdout_with_output() {
    init_test_logging(None);
    let project = TestProject::new().unwrap();

    let output = project
        .run_skillgraph(&["build", "skills", "--stdout", "--output", "x.json"])
        .unwrap();
    output
        .assert_failure()
        .assert_stderr_contains("cannot be used with");
}

/// Test that rebuilding overwrites the previous manifest in place
#[test]
fn test_build_overwrites_previous_manifest() {
    init_test_logging(None);
    let project = TestProject::new().unwrap();
    project.add_skill(&SkillFixture::basic("first")).unwrap();

    project.run_skillgraph(&["build", "skills"]).unwrap().assert_success();
    project.add_skill(&SkillFixture::basic("second")).unwrap();
    project.run_skillgraph(&["build", "skills"]).unwrap().assert_success();

    let manifest = project
        .read_manifest(&project.default_manifest_path())
        .unwrap();
    assert_eq!(manifest["stats"]["totalSkills"], 2);
}
