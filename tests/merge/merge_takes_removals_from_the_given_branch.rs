use crate::common::command::{head_commit_id, init_repository_dir, jot_commit, load_commit, run_jot_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

/// A file untouched on the current branch and removed on the given branch
/// is removed by the merge, without a conflict.
#[rstest]
fn merge_takes_removals_from_the_given_branch(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_jot_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();

    // diverge master with an unrelated addition
    write_file(FileSpec::new(
        dir.path().join("c.txt"),
        "gamma\n".to_string(),
    ));
    run_jot_command(dir.path(), &["add", "c.txt"])
        .assert()
        .success();
    jot_commit(dir.path(), "add c on master").assert().success();

    // feature removes b.txt
    run_jot_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    run_jot_command(dir.path(), &["rm", "b.txt"])
        .assert()
        .success();
    jot_commit(dir.path(), "drop b on feature").assert().success();

    run_jot_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    run_jot_command(dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("conflict").not());

    assert!(!dir.path().join("b.txt").exists());

    let merge_commit = load_commit(dir.path(), &head_commit_id(dir.path()));
    assert_eq!(merge_commit.parents().len(), 2);
    assert!(!merge_commit.snapshot().contains_key("b.txt"));
    assert!(merge_commit.snapshot().contains_key("a.txt"));
    assert!(merge_commit.snapshot().contains_key("c.txt"));

    Ok(())
}
