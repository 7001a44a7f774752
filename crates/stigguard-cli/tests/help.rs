use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to get a Command for the stigguard binary.
#[allow(deprecated)]
fn stigguard_cmd() -> Command {
    Command::cargo_bin("stigguard").unwrap()
}

#[test]
fn help_works() {
    stigguard_cmd().arg("--help").assert().success();
}

#[test]
fn help_lists_subcommands() {
    stigguard_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("resolve"))
        .stdout(predicate::str::contains("gate"))
        .stdout(predicate::str::contains("annotations"));
}

#[test]
fn gate_requires_report_path() {
    stigguard_cmd()
        .arg("gate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--report-path"));
}

#[test]
fn malformed_gate_arguments_exit_one() {
    stigguard_cmd()
        .args(["gate", "--report-path", "x.json", "--cat-ii-threshold", "ten"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--cat-ii-threshold"));

    stigguard_cmd()
        .args(["gate", "--report-path", "x.json", "--today", "19/10/2026"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("expected YYYY-MM-DD"));
}

#[test]
fn unknown_subcommand_exits_one() {
    stigguard_cmd().arg("remediate").assert().code(1);
}

#[test]
fn version_exits_zero() {
    stigguard_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stigguard"));
}
