// SPDX-License-Identifier: MIT

//! Specs for configuration diagnostics: exit codes and file:line messages.

use assert_cmd::assert::Assert;

use crate::prelude::*;

fn check_failure(config: &str) -> Assert {
    check(config).failure().code(1)
}

fn stderr_of(assert: &Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stderr).into_owned()
}

#[test]
fn unknown_command_names_the_file_and_line() {
    let assert = check_failure("load core\nfrobnicate this\n");
    let stderr = stderr_of(&assert);
    assert!(stderr.contains("plugd.conf:2:"), "stderr: {stderr}");
    assert!(stderr.contains("unknown command 'frobnicate'"), "stderr: {stderr}");
}

#[test]
fn unterminated_quote_points_at_the_opening_line() {
    let assert = check_failure("load core\nload shell prompt='oops\nload extra\n");
    let stderr = stderr_of(&assert);
    assert!(stderr.contains("plugd.conf:2:"), "stderr: {stderr}");
    assert!(stderr.contains("unterminated quote"), "stderr: {stderr}");
}

#[test]
fn unterminated_if_points_at_the_if_line() {
    let assert = check_failure("load core\nif exists dbus\nload dbus\n");
    let stderr = stderr_of(&assert);
    assert!(stderr.contains("plugd.conf:2:"), "stderr: {stderr}");
    assert!(stderr.contains("unterminated if-conditional"), "stderr: {stderr}");
}

#[test]
fn missing_plugin_name_is_reported() {
    let assert = check_failure("load\n");
    assert!(stderr_of(&assert).contains("missing plugin name"));
}

#[test]
fn overlong_line_is_reported() {
    let config = format!("load core {}\n", "x".repeat(5000));
    let assert = check_failure(&config);
    let stderr = stderr_of(&assert);
    assert!(stderr.contains("plugd.conf:1:"), "stderr: {stderr}");
    assert!(stderr.contains("line exceeds maximum length"), "stderr: {stderr}");
}

#[test]
fn missing_config_file_is_reported() {
    plugd()
        .arg("--check")
        .arg("-C")
        .arg("/nonexistent/plugd.conf")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn a_failed_parse_runs_nothing() {
    // The valid prefix must not be executed; no READY, exit 1.
    let assert = bootstrap_failure("load console\nbogus\n").failure().code(1);
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(!stdout.contains("READY"), "stdout: {stdout}");
}
