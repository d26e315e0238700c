// SPDX-License-Identifier: MIT

//! Specs for the real bootstrap path: loading built-in plugins.

use crate::prelude::*;

fn assert_reaches_ready(config: &str) {
    let dir = temp_dir();
    let path = write_config(&dir, config);
    let mut daemon = RunningDaemon::spawn(&path);
    assert!(daemon.wait_for_ready(), "daemon never became ready");
}

#[test]
fn builtin_plugins_bootstrap_to_ready() {
    assert_reaches_ready("load console\nload heartbeat interval=5\n");
}

#[test]
fn the_same_plugin_loads_twice_under_instance_names() {
    assert_reaches_ready("load heartbeat as fast interval=1\nload heartbeat as slow interval=600\n");
}

#[test]
fn tryload_of_a_missing_plugin_is_tolerated() {
    assert_reaches_ready("tryload no-such-plugin\nload console\n");
}

#[test]
fn conditional_falls_back_when_a_plugin_is_absent() {
    assert_reaches_ready("if exists no-such-plugin\nload no-such-plugin\nelse\nload console\nend\n");
}

#[test]
fn required_plugin_failure_stops_the_daemon() {
    let assert = bootstrap_failure("load no-such-plugin\n").failure().code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(
        stderr.contains("failed to load required plugin 'no-such-plugin'"),
        "stderr: {stderr}"
    );
    assert!(stderr.contains("plugd.conf:1:"), "stderr: {stderr}");
}

#[test]
fn bad_plugin_arguments_fail_a_required_load() {
    bootstrap_failure("load heartbeat interval=soon\n").failure().code(1);
}

#[test]
fn duplicate_instance_names_fail_the_second_load() {
    bootstrap_failure("load heartbeat\nload heartbeat\n").failure().code(1);
}
