use crate::common::command::{init_repository_dir, jot_commit, run_jot_command};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn checkout_switches_branches(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_jot_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();

    // advance master past the fork
    write_file(FileSpec::new(
        dir.path().join("a.txt"),
        "master edit\n".to_string(),
    ));
    run_jot_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    jot_commit(dir.path(), "edit a on master").assert().success();

    run_jot_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Switched to branch 'feature'"));
    assert_eq!(read_file(&dir.path().join("a.txt")), "alpha\n");

    run_jot_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    assert_eq!(read_file(&dir.path().join("a.txt")), "master edit\n");

    Ok(())
}

#[rstest]
fn checkout_of_the_current_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_jot_command(dir.path(), &["checkout", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "No need to checkout the current branch",
        ));

    Ok(())
}

#[rstest]
fn checkout_of_an_unknown_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_jot_command(dir.path(), &["checkout", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A branch with that name does not exist: missing",
        ));

    Ok(())
}

#[rstest]
fn checkout_discards_pending_changes(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_jot_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(
        dir.path().join("a.txt"),
        "staged but never committed\n".to_string(),
    ));
    run_jot_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    run_jot_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();

    run_jot_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\n\n"));
    assert_eq!(read_file(&dir.path().join("a.txt")), "alpha\n");

    Ok(())
}
