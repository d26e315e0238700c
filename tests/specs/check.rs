// SPDX-License-Identifier: MIT

//! Specs for `plugd --check`: parse-only runs that print the action tree.

use serde_json::Value;

use crate::prelude::*;

fn checked_tree(config: &str) -> Value {
    let output = check(config).success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout should be a JSON action tree")
}

#[test]
fn check_prints_the_action_tree_as_json() {
    let tree = checked_tree("load core key=value\ntryload extra\n");
    assert_eq!(tree[0]["action"], "load");
    assert_eq!(tree[0]["name"], "core");
    assert_eq!(tree[0]["args"][0]["key"], "key");
    assert_eq!(tree[0]["args"][0]["value"], "value");
    assert_eq!(tree[1]["action"], "try_load");
}

#[test]
fn check_shows_both_branches_of_a_conditional() {
    let tree = checked_tree("if exists dbus\nload dbus\nelse\ntryload fallback\nend\n");
    assert_eq!(tree[0]["action"], "if");
    assert_eq!(tree[0]["plugin"], "dbus");
    assert_eq!(tree[0]["positive"][0]["name"], "dbus");
    assert_eq!(tree[0]["negative"][0]["name"], "fallback");
}

#[test]
fn check_records_source_lines() {
    let tree = checked_tree("# comment\nload core\n\nload shell\n");
    assert_eq!(tree[0]["line"], 2);
    assert_eq!(tree[1]["line"], 4);
}

#[test]
fn check_accepts_an_empty_configuration() {
    let tree = checked_tree("# nothing to do\n");
    assert_eq!(tree, serde_json::json!([]));
}

#[test]
fn check_does_not_load_anything() {
    // Plugins named here do not exist; --check must not care.
    check("load no-such-plugin\nload another-ghost\n").success();
}
