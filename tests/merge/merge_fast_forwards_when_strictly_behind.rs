use crate::common::command::{head_commit_id, init_repository_dir, jot_commit, load_commit, run_jot_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Master never moved past the fork, so merging the feature branch just
/// advances master's pointer; no merge commit is created.
#[rstest]
fn merge_fast_forwards_when_strictly_behind(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_jot_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    run_jot_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(
        dir.path().join("c.txt"),
        "gamma\n".to_string(),
    ));
    run_jot_command(dir.path(), &["add", "c.txt"])
        .assert()
        .success();
    jot_commit(dir.path(), "add c on feature").assert().success();
    let feature_id = head_commit_id(dir.path());

    run_jot_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    assert!(!dir.path().join("c.txt").exists());

    run_jot_command(dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current branch fast-forwarded."));

    // master now points at feature's head, still a single-parent commit
    assert_eq!(head_commit_id(dir.path()), feature_id);
    let head = load_commit(dir.path(), &feature_id);
    assert_eq!(head.parents().len(), 1);
    assert!(dir.path().join("c.txt").is_file());

    Ok(())
}
