use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;

use guz_core::{SnapshotStore, Status, StoreConfig, TaskId};
use tempfile::TempDir;

fn guz_cmd(file: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("guz"));
    cmd.env("GUZ_FILE", file).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn snapshot_path(dir: &TempDir) -> PathBuf {
    dir.path().join("tasks.yaml")
}

fn guz(file: &Path, args: &[&str]) -> String {
    let assert = guz_cmd(file).args(args).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).expect("stdout utf8")
}

fn load(file: &Path) -> guz_core::TaskRegistry {
    SnapshotStore::new(StoreConfig::new(file, false))
        .load()
        .expect("load snapshot")
}

#[test]
fn new_delete_list_scenario() {
    let dir = TempDir::new().expect("tempdir");
    let file = snapshot_path(&dir);

    let out = guz(&file, &["new", "buy", "milk"]);
    assert_eq!(out, "New task added:\n 1 [ ] buy milk\n");
    guz(&file, &["new", "pay", "rent"]);

    assert_eq!(guz(&file, &["del", "1"]), "Deleted task 1\n");
    assert_eq!(
        guz(&file, &["list"]),
        " 2 [ ] pay rent\nListed 1 of 1 tasks\n"
    );
}

#[test]
fn missing_id_is_reported_but_not_fatal() {
    let dir = TempDir::new().expect("tempdir");
    let file = snapshot_path(&dir);

    guz_cmd(&file)
        .args(["del", "5"])
        .assert()
        .success()
        .stdout("Task id not found: 5\n");
    assert!(load(&file).is_empty());
}

#[test]
fn first_run_creates_snapshot_in_home() {
    let home = TempDir::new().expect("home");
    Command::new(assert_cmd::cargo::cargo_bin!("guz"))
        .env("HOME", home.path())
        .env("USERPROFILE", home.path())
        .env("NO_COLOR", "1")
        .env_remove("GUZ_FILE")
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Listed 0 of 0 tasks"));
    assert!(home.path().join(".guz").join("tasks.yaml").exists());
}

#[test]
fn no_init_fails_on_missing_snapshot() {
    let dir = TempDir::new().expect("tempdir");
    let file = snapshot_path(&dir);

    guz_cmd(&file)
        .args(["--no-init", "list"])
        .assert()
        .failure()
        .stderr(contains("snapshot not found"));
    assert!(!file.exists());
}

#[test]
fn mark_and_unmark_round_trip() {
    let dir = TempDir::new().expect("tempdir");
    let file = snapshot_path(&dir);
    guz(&file, &["new", "ship", "it"]);

    assert_eq!(
        guz(&file, &["mark", "1", "done"]),
        "Status changed:\n 1 [+] ship it\n"
    );
    assert_eq!(load(&file).lookup(TaskId(1)).expect("task").status, Status::Done);

    guz(&file, &["unmark", "1"]);
    assert_eq!(load(&file).lookup(TaskId(1)).expect("task").status, Status::Empty);
}

#[test]
fn unknown_status_aborts_without_touching_snapshot() {
    let dir = TempDir::new().expect("tempdir");
    let file = snapshot_path(&dir);
    guz(&file, &["new", "x"]);
    let before = fs::read(&file).expect("read");

    guz_cmd(&file)
        .args(["mark", "1", "someday"])
        .assert()
        .failure()
        .stderr(contains("unknown status"));
    assert_eq!(fs::read(&file).expect("read"), before);
}

#[test]
fn edit_resets_status_unless_kept() {
    let dir = TempDir::new().expect("tempdir");
    let file = snapshot_path(&dir);
    guz(&file, &["new", "--status", "wip", "draft"]);

    assert_eq!(
        guz(&file, &["edit", "1", "--keep-status", "second", "draft"]),
        "Task changed:\n 1 [w] second draft\n"
    );
    assert_eq!(
        guz(&file, &["edit", "1", "final"]),
        "Task changed:\n 1 [ ] final\n"
    );
}

#[test]
fn list_patterns_use_or_and_negation() {
    let dir = TempDir::new().expect("tempdir");
    let file = snapshot_path(&dir);
    guz(&file, &["new", "buy", "milk"]);
    guz(&file, &["new", "pay", "rent"]);
    guz(&file, &["new", "walk", "dog"]);

    let out = guz(&file, &["list", "milk", "rent"]);
    assert_eq!(
        out,
        " 1 [ ] buy milk\n 2 [ ] pay rent\nListed 2 of 3 tasks\n"
    );

    let out = guz(&file, &["list", "--", "-milk"]);
    assert_eq!(
        out,
        " 2 [ ] pay rent\n 3 [ ] walk dog\nListed 2 of 3 tasks\n"
    );
}

#[test]
fn rebase_and_delete_all() {
    let dir = TempDir::new().expect("tempdir");
    let file = snapshot_path(&dir);
    for subject in ["A", "B", "C"] {
        guz(&file, &["new", subject]);
    }
    guz(&file, &["del", "1"]);

    assert_eq!(guz(&file, &["rebase"]), "Rebased task ids\n");
    assert_eq!(load(&file).ids().collect::<Vec<_>>(), vec![TaskId(1), TaskId(2)]);

    assert_eq!(guz(&file, &["delete-all"]), "All tasks deleted\n");
    assert!(load(&file).is_empty());
}

#[test]
fn project_tags_show_in_listing() {
    let dir = TempDir::new().expect("tempdir");
    let file = snapshot_path(&dir);
    guz(&file, &["new", "plan", "trip"]);

    guz_cmd(&file)
        .args(["project", "1", "+travel", "+2027"])
        .assert()
        .success()
        .stdout(contains(" 1 [ ] plan trip +travel +2027"));
}

#[test]
fn list_json_schema() {
    let dir = TempDir::new().expect("tempdir");
    let file = snapshot_path(&dir);
    guz(&file, &["new", "--status", "ready", "buy", "milk"]);
    guz(&file, &["new", "pay", "rent"]);

    let out = guz(&file, &["list", "--json", "milk"]);
    let payload: serde_json::Value = serde_json::from_str(&out).expect("parse list json");

    assert_eq!(payload["summary"]["shown"], 1);
    assert_eq!(payload["summary"]["total"], 2);
    let tasks = payload["tasks"].as_array().expect("tasks array");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], 1);
    assert_eq!(tasks[0]["status"], "ready");
    assert_eq!(tasks[0]["glyph"], "*");
    assert_eq!(tasks[0]["subject"], "buy milk");
}

#[test]
fn list_does_not_rewrite_snapshot() {
    let dir = TempDir::new().expect("tempdir");
    let file = snapshot_path(&dir);
    guz(&file, &["new", "x"]);
    let before = fs::read(&file).expect("read");

    guz(&file, &["list"]);
    assert_eq!(fs::read(&file).expect("read"), before);
}

#[test]
fn zero_id_is_rejected_by_parser() {
    let dir = TempDir::new().expect("tempdir");
    let file = snapshot_path(&dir);

    guz_cmd(&file)
        .args(["del", "0"])
        .assert()
        .failure()
        .stderr(contains("positive").and(contains("0")));
}

#[test]
fn exhausted_ids_abort_and_suggest_rebase() {
    let dir = TempDir::new().expect("tempdir");
    let file = snapshot_path(&dir);
    fs::write(&file, "version: 1\ntasks:\n  4294967295:\n    subject: last\n").expect("write");
    let before = fs::read(&file).expect("read");

    guz_cmd(&file)
        .args(["new", "one", "more"])
        .assert()
        .failure()
        .stderr(contains("rebase"));
    assert_eq!(fs::read(&file).expect("read"), before);

    guz(&file, &["rebase"]);
    assert_eq!(
        guz(&file, &["new", "one", "more"]),
        "New task added:\n 2 [ ] one more\n"
    );
}

#[test]
fn bad_status_in_snapshot_is_reported() {
    let dir = TempDir::new().expect("tempdir");
    let file = snapshot_path(&dir);
    fs::write(
        &file,
        "version: 1\ntasks:\n  1:\n    subject: x\n    status: someday\n",
    )
    .expect("write");

    guz_cmd(&file)
        .args(["list"])
        .assert()
        .failure()
        .stderr(contains("someday"));
}
