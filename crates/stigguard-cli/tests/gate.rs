//! Integration tests for `stigguard gate` and the report renderers.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};

#[allow(deprecated)]
fn stigguard_cmd() -> Command {
    Command::cargo_bin("stigguard").unwrap()
}

fn fixture(kind: &str, name: &str) -> String {
    let path: PathBuf = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../tests/fixtures")
        .join(kind)
        .join(name);
    path.to_str().unwrap().to_string()
}

/// `gate` run from a scratch directory so no stray `stigguard.toml` is picked up.
fn gate(dir: &Path, report: &str) -> Command {
    let mut cmd = stigguard_cmd();
    cmd.current_dir(dir).args([
        "gate",
        "--report-path",
        &fixture("reports", report),
        "--today",
        "2026-10-19",
    ]);
    cmd
}

fn decision(dir: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(dir.join("gate.json")).expect("gate report written");
    serde_json::from_str(&text).expect("gate report is JSON")
}

#[test]
fn clean_scan_passes() {
    let temp = tempfile::tempdir().unwrap();
    gate(temp.path(), "clean.json")
        .args(["--decision-out", "gate.json"])
        .assert()
        .success();

    let report = decision(temp.path());
    assert_eq!(report["schema"], "stigguard.gate.v1");
    assert_eq!(report["decision"]["passed"], true);
    assert_eq!(report["decision"]["notTested"], 1);
}

#[test]
fn unexempted_cat_i_fails() {
    let temp = tempfile::tempdir().unwrap();
    gate(temp.path(), "cat_i_fail.json")
        .args(["--decision-out", "gate.json"])
        .assert()
        .code(1);

    let report = decision(temp.path());
    assert_eq!(report["decision"]["passed"], false);
    assert_eq!(report["decision"]["rawCatI"], 1);
    assert_eq!(report["decision"]["effectiveCatI"], 1);
}

#[test]
fn active_exemption_lets_cat_i_through() {
    let temp = tempfile::tempdir().unwrap();
    gate(temp.path(), "cat_i_fail.json")
        .args(["--exemptions", &fixture("exemptions", "active.json")])
        .args(["--decision-out", "gate.json"])
        .assert()
        .success();

    let report = decision(temp.path());
    assert_eq!(report["decision"]["exemptedRuleIds"][0], "V-254239");
    assert_eq!(report["decision"]["effectiveCatI"], 0);
}

#[test]
fn expired_exemption_does_not_apply() {
    let temp = tempfile::tempdir().unwrap();
    gate(temp.path(), "cat_i_fail.json")
        .args(["--exemptions", &fixture("exemptions", "expired.json")])
        .args(["--decision-out", "gate.json"])
        .assert()
        .code(1);

    let warnings = decision(temp.path())["decision"]["warnings"].to_string();
    assert!(warnings.contains("expired on 2020-01-31"));
}

#[test]
fn invalid_exemption_file_is_a_warning_not_an_error() {
    let temp = tempfile::tempdir().unwrap();
    gate(temp.path(), "cat_i_fail.json")
        .args(["--exemptions", &fixture("exemptions", "invalid.json")])
        .args(["--decision-out", "gate.json"])
        .assert()
        .code(1);

    let report = decision(temp.path());
    assert_eq!(report["decision"]["rawCatI"], 1);
    assert!(report["decision"]["warnings"][0]
        .as_str()
        .unwrap()
        .starts_with("exemption_file_invalid"));
}

#[test]
fn cat_i_gate_can_be_disabled() {
    let temp = tempfile::tempdir().unwrap();
    gate(temp.path(), "cat_i_fail.json")
        .arg("--fail-on-cat-i=false")
        .assert()
        .success();
}

#[test]
fn cat_iii_never_gates() {
    let temp = tempfile::tempdir().unwrap();
    gate(temp.path(), "cat_iii_only.json")
        .args(["--fail-on-cat-ii", "--cat-ii-threshold", "0"])
        .assert()
        .success();
}

#[test]
fn cat_ii_threshold_is_exclusive() {
    let temp = tempfile::tempdir().unwrap();
    gate(temp.path(), "cat_ii_eleven.json")
        .args(["--fail-on-cat-ii", "--cat-ii-threshold", "10"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("exceed the threshold of 10"));

    gate(temp.path(), "cat_ii_eleven.json")
        .args(["--fail-on-cat-ii", "--cat-ii-threshold", "11"])
        .assert()
        .success();

    // CAT II gating is off by default.
    gate(temp.path(), "cat_ii_eleven.json").assert().success();
}

#[test]
fn config_file_enables_cat_ii_gate() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(
        temp.path().join("stigguard.toml"),
        "[gate]\nfail_on_cat_ii = true\ncat_ii_threshold = 5\n",
    )
    .unwrap();
    gate(temp.path(), "cat_ii_eleven.json").assert().code(1);
}

#[test]
fn informational_mode_records_failure_but_exits_zero() {
    let temp = tempfile::tempdir().unwrap();
    gate(temp.path(), "cat_i_fail.json")
        .args(["--mode", "informational", "--phase", "baseline"])
        .args(["--decision-out", "gate.json"])
        .assert()
        .success();

    let report = decision(temp.path());
    assert_eq!(report["mode"], "informational");
    assert_eq!(report["phase"], "baseline");
    assert_eq!(report["decision"]["passed"], false);
}

#[test]
fn malformed_report_fails_closed_even_when_informational() {
    let temp = tempfile::tempdir().unwrap();
    gate(temp.path(), "truncated.json")
        .args(["--mode", "informational", "--decision-out", "gate.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("[report_parse_error]"));

    let report = decision(temp.path());
    assert_eq!(report["decision"]["passed"], false);
    assert!(report["decision"]["reasons"][0]
        .as_str()
        .unwrap()
        .contains("read findings report"));
}

#[test]
fn unwritable_fail_closed_report_is_logged() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::create_dir(temp.path().join("gate.json")).unwrap();
    gate(temp.path(), "truncated.json")
        .args(["--decision-out", "gate.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to write fail-closed gate report"))
        .stderr(predicate::str::contains("[report_parse_error]"));
}

#[test]
fn markdown_and_annotations_render_from_the_report() {
    let temp = tempfile::tempdir().unwrap();
    gate(temp.path(), "cat_i_fail.json")
        .args(["--decision-out", "gate.json", "--write-markdown", "--markdown-out", "out/gate.md"])
        .assert()
        .code(1);

    let md = std::fs::read_to_string(temp.path().join("out/gate.md")).unwrap();
    assert!(md.contains("Outcome: **FAIL**"));
    assert!(md.contains("V-254239"));

    stigguard_cmd()
        .current_dir(temp.path())
        .args(["md", "--report", "gate.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Stigguard gate report"));

    stigguard_cmd()
        .current_dir(temp.path())
        .args(["annotations", "--report", "gate.json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("::error title=stigguard gate::CAT I"));
}

#[test]
fn gate_report_carries_pinned_selection() {
    let temp = tempfile::tempdir().unwrap();
    let cache_dir = temp.path().to_str().unwrap().to_string();
    stigguard_cmd()
        .current_dir(temp.path())
        .args([
            "resolve",
            "--catalog",
            &fixture("catalogs", "windows_server.json"),
            "--os-family",
            "WindowsServer",
            "--os-version",
            "2022",
            "--role",
            "MS",
            "--cache-dir",
            &cache_dir,
            "--run-id",
            "run-9",
        ])
        .assert()
        .success();

    gate(temp.path(), "clean.json")
        .args(["--cache-dir", &cache_dir, "--run-id", "run-9"])
        .args(["--decision-out", "gate.json"])
        .assert()
        .success();

    let report = decision(temp.path());
    assert_eq!(report["selection"]["stigId"], "MS_Windows_Server_2022_STIG_v2");
}
