use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

struct Sandbox {
    dir: tempfile::TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let notes = dir.path().join("notes");
        let config = serde_json::json!({
            "version": "1.0.0",
            "defaultProject": "default",
            "projects": {
                "default": { "path": notes, "description": "Test project" }
            }
        });
        fs::write(
            dir.path().join("config.json"),
            serde_json::to_string_pretty(&config).unwrap(),
        )
        .unwrap();
        Self { dir }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn config(&self) -> PathBuf {
        self.root().join("config.json")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("jinfo").unwrap();
        cmd.env("HOME", self.root())
            .env("JINFO_CONFIG", self.config())
            .env_remove("RUST_LOG");
        cmd
    }
}

#[test]
fn add_then_list_recent() {
    let sb = Sandbox::new();

    sb.cmd()
        .args(["Lunch", "with", "Sam", "#people"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Memo added"));

    sb.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("] Lunch with Sam #people"));
}

#[test]
fn add_typed_memo_and_list_day() {
    let sb = Sandbox::new();

    sb.cmd()
        .args(["ship the release", "--type", "task", "--date", "2024-01-15"])
        .assert()
        .success();

    let text = fs::read_to_string(sb.root().join("notes").join("2024-01-15.md")).unwrap();
    assert!(text.contains("task(Task): ship the release"));

    sb.cmd()
        .args(["list", "--date", "2024-01-15", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"memoType\": \"task\""));
}

#[test]
fn unknown_type_fails() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["text", "--type", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("memo type 'nope'"));
}

#[test]
fn search_with_tag_and_range() {
    let sb = Sandbox::new();
    let notes = sb.root().join("notes");
    fs::create_dir_all(&notes).unwrap();
    fs::write(
        notes.join("2024-01-10.md"),
        "[2024-01-10 09:00:00] Deploy checklist #work\n",
    )
    .unwrap();
    fs::write(
        notes.join("2024-01-20.md"),
        "[2024-01-20 09:00:00] deploy rollback #ops\n",
    )
    .unwrap();

    sb.cmd()
        .args(["search", "DEPLOY", "--tag", "work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deploy checklist"))
        .stdout(predicate::str::contains("rollback").not());

    sb.cmd()
        .args(["search", "deploy", "--from", "2024-01-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rollback"))
        .stdout(predicate::str::contains("checklist").not());
}

#[test]
fn project_add_default_and_list() {
    let sb = Sandbox::new();
    let work = sb.root().join("work");

    sb.cmd()
        .args(["project", "add", "work"])
        .arg(&work)
        .args(["-d", "Work log"])
        .assert()
        .success();
    assert!(work.is_dir());

    sb.cmd()
        .args(["project", "add", "work"])
        .arg(&work)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    sb.cmd()
        .args(["project", "default", "work"])
        .assert()
        .success();

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(sb.config()).unwrap()).unwrap();
    assert_eq!(saved["defaultProject"], "work");

    sb.cmd()
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Work log"));

    sb.cmd().args(["hello", "work"]).assert().success();
    assert!(fs::read_dir(&work).unwrap().count() == 1);
}

#[test]
fn project_default_unknown_fails() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["project", "default", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ghost"));
}

#[test]
fn missing_config_is_bootstrapped() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join(".jinfo").join("config.json");

    Command::cargo_bin("jinfo")
        .unwrap()
        .env("HOME", dir.path())
        .arg("--config")
        .arg(&config)
        .arg("types")
        .assert()
        .success()
        .stdout(predicate::str::contains("task"));

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&config).unwrap()).unwrap();
    assert_eq!(saved["defaultProject"], "default");
    assert_eq!(saved["memoTypes"].as_array().unwrap().len(), 10);
}

#[test]
fn inbox_lifecycle() {
    let sb = Sandbox::new();

    sb.cmd()
        .args(["inbox", "add", "read", "the", "rfc", "#reading"])
        .assert()
        .success();

    let output = sb
        .cmd()
        .args(["inbox", "list", "--json"])
        .output()
        .unwrap();
    let memos: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let id = memos[0]["id"].as_str().unwrap().to_string();
    assert_eq!(memos[0]["tags"][0], "#reading");

    sb.cmd()
        .args(["inbox", "edit", id.as_str(), "read", "it", "twice", "--tags", "reading,rust"])
        .assert()
        .success();

    sb.cmd()
        .args(["inbox", "search", "--tags", "reading,rust"])
        .assert()
        .success()
        .stdout(predicate::str::contains("read it twice"));

    sb.cmd()
        .args(["inbox", "stats", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"totalMemos\": 1"));

    let export = sb.root().join("export.json");
    sb.cmd()
        .args(["inbox", "export", "-o"])
        .arg(&export)
        .assert()
        .success();
    assert!(export.exists());

    sb.cmd().args(["inbox", "rm", id.as_str()]).assert().success();
    sb.cmd()
        .args(["inbox", "rm", id.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not found"));

    sb.cmd()
        .args(["inbox", "import"])
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1"));

    sb.cmd().args(["inbox", "clear", "--yes"]).assert().success();
    sb.cmd()
        .args(["inbox", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("empty"));
}
