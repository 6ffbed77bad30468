use crate::common::command::{head_commit_id, init_repository_dir, jot_commit, run_jot_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// The given branch's head is already in the current branch's history:
/// nothing to merge, reported as such, and no error.
#[rstest]
fn merge_already_ancestor_is_a_noop(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_jot_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();

    // advance master, leaving feature behind at the fork
    write_file(FileSpec::new(
        dir.path().join("c.txt"),
        "gamma\n".to_string(),
    ));
    run_jot_command(dir.path(), &["add", "c.txt"])
        .assert()
        .success();
    jot_commit(dir.path(), "add c on master").assert().success();
    let master_id = head_commit_id(dir.path());

    run_jot_command(dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Given branch is an ancestor of the current branch.",
        ));

    // no new commit, pointer unchanged
    assert_eq!(head_commit_id(dir.path()), master_id);

    Ok(())
}
