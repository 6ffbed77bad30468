use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use jot::areas::database::Database;
use jot::artifacts::objects::commit::Commit;
use jot::artifacts::objects::object_id::ObjectId;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_jot_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "alpha\n".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("b.txt"),
        "beta\n".to_string(),
    ));

    run_jot_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    run_jot_command(repository_dir.path(), &["add", "b.txt"])
        .assert()
        .success();
    jot_commit(repository_dir.path(), "Initial files")
        .assert()
        .success();

    repository_dir
}

pub fn run_jot_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("jot").expect("Failed to find jot binary");
    cmd.env("NO_PAGER", "1");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// Commit with a pinned timestamp so digests are deterministic across runs.
pub fn jot_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_jot_command(dir, &["commit", message]);
    cmd.env("JOT_COMMIT_DATE", "2023-01-01 12:00:00 +0000");
    cmd
}

/// The commit id the current head branch points at, read from the state file.
pub fn head_commit_id(dir: &Path) -> String {
    let state_path = dir.join(".jot").join("state");
    let content = std::fs::read_to_string(&state_path).expect("Failed to read state file");
    let state: serde_json::Value =
        serde_json::from_str(&content).expect("Failed to parse state file");

    let head = state["head"].as_str().expect("head missing from state");
    state["branches"][head]
        .as_str()
        .expect("head branch missing from branch table")
        .to_string()
}

/// Load a commit object straight from the object store.
pub fn load_commit(dir: &Path, commit_id: &str) -> Commit {
    let database = Database::new(dir.join(".jot").join("objects").into());
    let oid = ObjectId::try_parse(commit_id.to_string()).expect("Invalid commit id");
    database
        .load_commit(&oid)
        .expect("Failed to load commit from object store")
}
