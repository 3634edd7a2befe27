use skillgraph::test_utils::{SkillFixture, init_test_logging};

use crate::common::{FileAssert, TestProject};

/// Test checking a registry with no findings
#[test]
fn test_check_clean_registry_passes() {
    init_test_logging(None);
    let project = TestProject::new().unwrap();
    project
        .add_skill(&SkillFixture::with_dependencies("alpha", &["beta"]))
        .unwrap();
    project.add_skill(&SkillFixture::basic("beta")).unwrap();

    let output = project.run_skillgraph(&["check", "skills"]).unwrap();
    output
        .assert_success()
        .assert_stdout_contains("✓ 2 skills loaded")
        .assert_stdout_contains("No circular dependencies")
        .assert_stdout_contains("No conflict issues");
}

/// Test that check does not write any manifest file
#[test]
fn test_check_leaves_no_manifest_behind() {
    init_test_logging(None);
    let project = TestProject::new().unwrap();
    project.add_skill(&SkillFixture::basic("solo")).unwrap();

    project.run_skillgraph(&["check", "skills"]).unwrap().assert_success();
    FileAssert::not_exists(project.default_manifest_path());
}

/// Test the default failure policy on load errors
#[test]
fn test_check_fails_on_load_errors() {
    init_test_logging(None);
    let project = TestProject::new().unwrap();
    project.add_skill(&SkillFixture::basic("healthy")).unwrap();
    project.add_bare_directory("broken").unwrap();

    let output = project.run_skillgraph(&["check", "skills"]).unwrap();
    output
        .assert_failure()
        .assert_stdout_contains("1 skills loaded, 1 failed")
        .assert_stdout_contains("broken: Missing SKILL.md")
        .assert_stderr_contains("Check failed: 1 load errors");
}

/// Test cycle reporting with the closing edge rendered
#[test]
fn test_check_fails_on_cycles() {
    init_test_logging(None);
    let project = TestProject::new().unwrap();
    project
        .add_skill(&SkillFixture::with_dependencies("ping", &["pong"]))
        .unwrap();
    project
        .add_skill(&SkillFixture::with_dependencies("pong", &["ping"]))
        .unwrap();

    let output = project.run_skillgraph(&["check", "skills"]).unwrap();
    output
        .assert_failure()
        .assert_stdout_contains("✗ 1 circular dependencies")
        .assert_stdout_contains("ping -> pong -> ping")
        .assert_stderr_contains("Check failed: 1 circular dependencies");
}

/// Test reporting of one-directional conflict declarations
#[test]
fn test_check_reports_asymmetric_conflict() {
    init_test_logging(None);
    let project = TestProject::new().unwrap();
    project
        .add_skill(&SkillFixture::with_conflicts("alpha", &["beta"]))
        .unwrap();
    project.add_skill(&SkillFixture::basic("beta")).unwrap();

    let output = project.run_skillgraph(&["check", "skills"]).unwrap();
    output
        .assert_failure()
        .assert_stdout_contains("✗ 1 conflict issues")
        .assert_stdout_contains("alpha conflicts with beta but not vice versa")
        .assert_stderr_contains("Check failed: 1 conflict issues");
}

/// Test did-you-mean suggestions for unknown conflict targets
#[test]
fn test_check_suggests_similar_conflict_target() {
    init_test_logging(None);
    let project = TestProject::new().unwrap();
    project
        .add_skill(&SkillFixture::with_conflicts("alpha", &["gost"]))
        .unwrap();
    project.add_skill(&SkillFixture::basic("ghost")).unwrap();

    let output = project.run_skillgraph(&["check", "skills"]).unwrap();
    output
        .assert_failure()
        .assert_stdout_contains("alpha conflicts with unknown skill 'gost'")
        .assert_stdout_contains("did you mean: ghost?");
}

/// Test that fail_on in the config narrows the failure policy
#[test]
fn test_check_fail_on_policy_from_config() {
    init_test_logging(None);
    let project = TestProject::new().unwrap();
    project.add_skill(&SkillFixture::basic("healthy")).unwrap();
    project.add_bare_directory("broken").unwrap();
    project
        .write_config("root = \"skills\"\nfail_on = [\"cycles\"]\n")
        .unwrap();

    let output = project.run_skillgraph(&["check"]).unwrap();
    // Load errors are still reported, they just no longer fail the run
    output
        .assert_success()
        .assert_stdout_contains("1 skills loaded, 1 failed");
}

/// Test that undeclared references are informational without --strict
#[test]
fn test_check_undeclared_references_informational() {
    init_test_logging(None);
    let project = TestProject::new().unwrap();
    project
        .add_skill(&SkillFixture::with_references("alpha", &["beta"]))
        .unwrap();
    project.add_skill(&SkillFixture::basic("beta")).unwrap();

    let output = project.run_skillgraph(&["check", "skills"]).unwrap();
    output
        .assert_success()
        .assert_stdout_contains("1 skills reference undeclared dependencies")
        .assert_stdout_contains("alpha: beta");
}

/// Test that --strict turns undeclared references into failures
#[test]
fn test_check_strict_fails_on_undeclared_references() {
    init_test_logging(None);
    let project = TestProject::new().unwrap();
    project
        .add_skill(&SkillFixture::with_references("alpha", &["beta"]))
        .unwrap();
    project.add_skill(&SkillFixture::basic("beta")).unwrap();

    let output = project
        .run_skillgraph(&["check", "skills", "--strict"])
        .unwrap();
    output
        .assert_failure()
        .assert_stderr_contains("Check failed: 1 skills with undeclared references");
}

/// Test the JSON report for a failing registry
#[test]
fn test_check_json_format_reports_invalid() {
    init_test_logging(None);
    let project = TestProject::new().unwrap();
    project
        .add_skill(&SkillFixture::with_dependencies("ping", &["pong"]))
        .unwrap();
    project
        .add_skill(&SkillFixture::with_dependencies("pong", &["ping"]))
        .unwrap();

    let output = project
        .run_skillgraph(&["check", "skills", "--format", "json"])
        .unwrap();
    output.assert_failure();

    let report = output.stdout_json();
    assert_eq!(report["valid"], false);
    assert_eq!(report["stats"]["totalSkills"], 2);
    assert_eq!(report["circularDependencies"][0][0], "ping");
    assert_eq!(report["circularDependencies"][0][1], "pong");
}

/// Test the JSON report for a healthy registry with inferred dependencies
#[test]
fn test_check_json_format_lists_inferred_dependencies() {
    init_test_logging(None);
    let project = TestProject::new().unwrap();
    project
        .add_skill(&SkillFixture::with_references("alpha", &["beta"]))
        .unwrap();
    project.add_skill(&SkillFixture::basic("beta")).unwrap();

    let output = project
        .run_skillgraph(&["check", "skills", "--format", "json"])
        .unwrap();
    output.assert_success();

    let report = output.stdout_json();
    assert_eq!(report["valid"], true);
    assert_eq!(report["errors"].as_array().unwrap().len(), 0);
    assert_eq!(report["inferredDependencies"][0]["skill"], "alpha");
    assert_eq!(report["inferredDependencies"][0]["dependencies"][0], "beta");
}

/// Test that a malformed header is reported with its parse detail
#[test]
fn test_check_reports_malformed_header_detail() {
    init_test_logging(None);
    let project = TestProject::new().unwrap();
    project
        .add_skill(&SkillFixture::malformed_header("mangled"))
        .unwrap();

    let output = project.run_skillgraph(&["check", "skills"]).unwrap();
    output
        .assert_failure()
        .assert_stdout_contains("mangled: Malformed frontmatter header");
}
