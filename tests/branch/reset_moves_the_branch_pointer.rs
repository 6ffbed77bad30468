use crate::common::command::{head_commit_id, init_repository_dir, jot_commit, run_jot_command};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn reset_moves_the_branch_pointer(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    let first_id = head_commit_id(dir.path());

    write_file(FileSpec::new(
        dir.path().join("a.txt"),
        "second version\n".to_string(),
    ));
    run_jot_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    jot_commit(dir.path(), "second version of a")
        .assert()
        .success();

    // stage something so reset has pending state to discard
    write_file(FileSpec::new(
        dir.path().join("a.txt"),
        "third version\n".to_string(),
    ));
    run_jot_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    run_jot_command(dir.path(), &["reset", &first_id[..7]])
        .assert()
        .success();

    assert_eq!(head_commit_id(dir.path()), first_id);
    assert_eq!(read_file(&dir.path().join("a.txt")), "alpha\n");
    run_jot_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\n\n"));

    // history is untouched: the abandoned commit is still in the store
    run_jot_command(dir.path(), &["global-log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("second version of a"));

    Ok(())
}

#[rstest]
fn reset_to_an_unknown_commit_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_jot_command(dir.path(), &["reset", "0123456"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No commit with that id exists"));

    Ok(())
}
