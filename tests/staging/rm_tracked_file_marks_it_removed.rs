use crate::common::command::{head_commit_id, jot_commit, load_commit, init_repository_dir, run_jot_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn rm_tracked_file_marks_it_removed(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_jot_command(dir.path(), &["rm", "b.txt"])
        .assert()
        .success();

    // deleted from the working tree and pending removal
    assert!(!dir.path().join("b.txt").exists());
    run_jot_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("b.txt"));

    jot_commit(dir.path(), "drop b").assert().success();

    let head = load_commit(dir.path(), &head_commit_id(dir.path()));
    assert!(!head.snapshot().contains_key("b.txt"));

    Ok(())
}
