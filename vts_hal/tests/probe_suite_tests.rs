//! Probe suite tests.
//!
//! Suites are written to a temp dir together with the files they probe, so
//! present/absent/mismatch outcomes are deterministic on any host.

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use vts_common::config::ConfigError;
use vts_hal::kernel::{Expectation, ProbeOutcome, ProbeSuite};

fn write_suite(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("suite.toml");
    fs::write(&path, body).unwrap();
    path
}

fn fixture() -> (TempDir, ProbeSuite) {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::write(root.join("version"), "Linux version 6.6.0-vts (gcc)\n").unwrap();
    fs::write(root.join("active"), "tty1\n").unwrap();
    fs::write(root.join("empty"), "").unwrap();
    fs::write(root.join("param"), "N\n").unwrap();

    let body = format!(
        r#"
[shared]
log_level = "debug"
service_name = "kernel-nodes"

[[probe]]
name = "version"
path = "{root}/version"
contains = "Linux version"
non_empty = true

[[probe]]
name = "tty_active"
path = "{root}/active"

[[probe]]
name = "empty_node"
path = "{root}/empty"
non_empty = true

[[probe]]
name = "feature_param_absent"
path = "{root}/missing/feature_x_enabled"
expect = "optional"

[[probe]]
name = "feature_param_present"
path = "{root}/param"
expect = "optional"
contains = "Y"

[[probe]]
name = "required_missing"
path = "{root}/missing/node"

[[probe]]
name = "capped_version"
path = "{root}/version"
contains = "version 6.6"
max_bytes = 8
"#,
        root = root.display()
    );
    let path = write_suite(root, &body);
    let suite = ProbeSuite::load(&path).unwrap();
    (dir, suite)
}

#[test]
fn test_suite_outcomes() {
    let (_dir, suite) = fixture();
    let report = suite.run();

    assert_eq!(report.suite, "kernel-nodes");
    assert_eq!(
        report.result("version").unwrap().outcome,
        ProbeOutcome::Passed
    );
    assert_eq!(
        report.result("tty_active").unwrap().outcome,
        ProbeOutcome::Passed
    );
    assert_eq!(
        report.result("empty_node").unwrap().outcome,
        ProbeOutcome::Failed {
            reason: "content is empty".to_string()
        }
    );
    assert_eq!(
        report.result("feature_param_absent").unwrap().outcome,
        ProbeOutcome::Absent
    );
    // Optional but present: content checks still apply.
    assert!(matches!(
        report.result("feature_param_present").unwrap().outcome,
        ProbeOutcome::Failed { .. }
    ));
    assert!(matches!(
        report.result("required_missing").unwrap().outcome,
        ProbeOutcome::Failed { .. }
    ));

    let capped = report.result("capped_version").unwrap();
    assert!(capped.truncated);
    assert_eq!(capped.bytes_read, 8);
    assert!(matches!(capped.outcome, ProbeOutcome::Failed { .. }));
}

#[test]
fn test_suite_summary_and_success() {
    let (_dir, suite) = fixture();
    let report = suite.run();

    assert_eq!(report.summary.total, 7);
    assert_eq!(report.summary.passed, 2);
    assert_eq!(report.summary.absent, 1);
    assert_eq!(report.summary.failed, 4);
    assert!(!report.success());
}

#[test]
fn test_suite_passes_when_only_optional_absent() {
    let dir = TempDir::new().unwrap();
    let path = write_suite(
        dir.path(),
        r#"
[shared]
service_name = "optional-only"

[[probe]]
name = "hypothetical"
path = "/sys/module/vts_no_such_module/parameters/feature_x_enabled"
expect = "optional"
"#,
    );
    let suite = ProbeSuite::load(&path).unwrap();
    assert_eq!(suite.probes[0].expect, Expectation::Optional);

    let report = suite.run();
    assert!(report.success());
    assert_eq!(report.summary.absent, 1);
    assert_eq!(report.summary.passed, 0);
}

#[test]
fn test_report_json_shape() {
    let (_dir, suite) = fixture();
    let report = suite.run();
    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(value["suite"], "kernel-nodes");
    assert_eq!(value["summary"]["total"], 7);
    assert_eq!(value["results"][0]["name"], "version");
    assert_eq!(value["results"][0]["expect"], "required");
    assert_eq!(value["results"][0]["outcome"]["status"], "passed");
    assert_eq!(value["results"][3]["outcome"]["status"], "absent");
    assert_eq!(value["results"][2]["outcome"]["status"], "failed");
    assert_eq!(value["results"][2]["outcome"]["reason"], "content is empty");
}

#[test]
fn test_report_text_rendering() {
    let (_dir, suite) = fixture();
    let text = suite.run().to_string();
    assert!(text.starts_with("Suite: kernel-nodes"));
    assert!(text.contains("PASS"));
    assert!(text.contains("ABSENT"));
    assert!(text.contains("FAIL (content is empty)"));
    assert!(text.contains("Total: 7, Passed: 2, Absent: 1, Failed: 4"));
}

#[test]
fn test_load_missing_suite() {
    let result = ProbeSuite::load(Path::new("/nonexistent/suite.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound)));
}

#[test]
fn test_empty_suite_succeeds() {
    let suite = ProbeSuite::from_toml("[shared]\nservice_name = \"empty\"\n").unwrap();
    let report = suite.run();
    assert!(report.success());
    assert_eq!(report.summary.total, 0);
}

#[test]
fn test_optional_directory_fails() {
    let dir = TempDir::new().unwrap();
    let body = format!(
        r#"
[shared]
service_name = "optional-dir"

[[probe]]
name = "node_dir"
path = "{}"
expect = "optional"
"#,
        dir.path().display()
    );
    let path = write_suite(dir.path(), &body);
    let report = ProbeSuite::load(&path).unwrap().run();

    let result = report.result("node_dir").unwrap();
    assert!(matches!(result.outcome, ProbeOutcome::Failed { .. }));
    assert_eq!(report.summary.absent, 0);
    assert_eq!(report.summary.failed, 1);
    assert!(!report.success());
}

#[test]
fn test_kernel_nodes_suite_loads() {
    let path = Path::new(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../suites/kernel_nodes.toml"
    ));
    let suite = ProbeSuite::load(path).unwrap();
    assert_eq!(suite.shared.service_name, "kernel-nodes");
    assert_eq!(suite.probes.len(), 3);
    assert_eq!(suite.probes[0].expect, Expectation::Required);
    assert_eq!(suite.probes[1].expect, Expectation::Required);
    assert_eq!(suite.probes[2].expect, Expectation::Optional);
    assert_eq!(suite.probes[2].max_bytes, Some(16));
}
