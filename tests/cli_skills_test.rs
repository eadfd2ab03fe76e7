//! Integration tests for the skill tracker commands.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_add_log_show() {
    let env = TestEnv::new();

    env.json(&["skills", "add", "Guitar"]);
    let logged = env.json(&["skills", "log", "Guitar", "--time", "1.5", "--note", "scales"]);
    assert_eq!(logged["time_spent"], 1.5);
    assert_eq!(logged["total_time"], 1.5);

    let logged = env.json(&["skills", "log", "Guitar", "--time", "0.5"]);
    assert_eq!(logged["total_time"], 2.0);

    let shown = env.json(&["skills", "show", "Guitar"]);
    assert_eq!(shown["total_time"], 2.0);
    let logs = shown["logs"].as_array().unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0]["note"], "scales");
    assert_eq!(logs[1]["note"], "");

    // "YYYY-MM-DD HH:MM:SS"
    let date = logs[0]["date"].as_str().unwrap();
    assert_eq!(date.len(), 19);
    assert_eq!(&date[10..11], " ");
}

#[test]
fn test_duplicate_skill_fails() {
    let env = TestEnv::new();
    env.json(&["skills", "add", "Guitar"]);
    env.lk()
        .args(["skills", "add", "Guitar"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_log_unknown_skill_fails() {
    let env = TestEnv::new();
    env.lk()
        .args(["skills", "log", "Piano", "--time", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Skill 'Piano' not found"));
}

#[test]
fn test_log_zero_time_rejected() {
    let env = TestEnv::new();
    env.json(&["skills", "add", "Guitar"]);
    env.lk()
        .args(["skills", "log", "Guitar", "--time", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("positive number of hours"));

    let shown = env.json(&["skills", "show", "Guitar"]);
    assert_eq!(shown["logs"].as_array().unwrap().len(), 0);
}

#[test]
fn test_list_in_insertion_order() {
    let env = TestEnv::new();
    env.json(&["skills", "add", "Typing"]);
    env.json(&["skills", "add", "Chess"]);
    env.json(&["skills", "log", "Chess", "--time", "2"]);

    let list = env.json(&["skills", "list"]);
    assert_eq!(list["skills"][0]["name"], "Typing");
    assert_eq!(list["skills"][0]["total_time"], 0.0);
    assert_eq!(list["skills"][1]["name"], "Chess");
    assert_eq!(list["skills"][1]["total_time"], 2.0);

    env.lk()
        .args(["skills", "list", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Chess (Total: 2.00 hours)"));
}

#[test]
fn test_document_is_keyed_by_name() {
    let env = TestEnv::new();
    env.json(&["skills", "add", "Guitar"]);

    let doc = env.read_doc("skill_tracker.json");
    assert_eq!(doc["Guitar"]["total_time"], 0.0);
    assert_eq!(doc["Guitar"]["logs"], serde_json::json!([]));
}

#[test]
fn test_name_with_surrounding_spaces_round_trips() {
    let env = TestEnv::new();
    let added = env.json(&["skills", "add", " Guitar "]);
    assert_eq!(added["name"], " Guitar ");

    let logged = env.json(&["skills", "log", " Guitar ", "--time", "1"]);
    assert_eq!(logged["total_time"], 1.0);
}
