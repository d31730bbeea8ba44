//! Integration tests for the `toggled` binary's command-line surface.
//!
//! Only paths that exit before daemonizing are exercised here.

use assert_cmd::Command;
use predicates::prelude::*;

fn toggled() -> Command {
    Command::cargo_bin("toggled").expect("toggled binary")
}

// ==================== Help and version ====================

/// Verifies --help succeeds and lists the options on stdout.
#[test]
fn help_lists_options() {
    toggled()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--foreground"))
        .stdout(predicate::str::contains("--logfile"));
}

/// Verifies the only console output before --help is the per-scope
/// announcement written when the logger starts.
#[test]
fn help_leaves_only_scope_announcements_on_stderr() {
    let output = toggled().arg("--help").output().expect("run toggled");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    for line in stderr.lines() {
        assert!(line.contains(" scope has "), "unexpected stderr line: {line}");
    }
    if cfg!(not(feature = "release-build")) {
        for scope in ["logging", "main", "config", "background"] {
            assert!(
                stderr.contains(&format!("{scope} scope has ")),
                "missing {scope} announcement in {stderr}"
            );
        }
    }
}

/// Verifies -V prints the name and version.
#[test]
fn version_banner() {
    toggled()
        .arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("toggled "))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ==================== Usage errors ====================

/// Verifies an out-of-range level is rejected with status 1.
#[test]
fn out_of_range_level_fails() {
    toggled()
        .args(["--debug", "8"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--debug"));
}

/// Verifies an unknown flag is rejected with status 1.
#[test]
fn unknown_flag_fails() {
    toggled()
        .arg("--definitely-not-a-flag")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--definitely-not-a-flag"));
}
