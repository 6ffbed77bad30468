use crate::common::command::{init_repository_dir, jot_commit, run_jot_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn committing_without_changes_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    jot_commit(dir.path(), "nothing here")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No changes added to the commit"));

    Ok(())
}

#[rstest]
fn committing_with_a_blank_message_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    write_file(FileSpec::new(
        dir.path().join("c.txt"),
        "gamma\n".to_string(),
    ));
    run_jot_command(dir.path(), &["add", "c.txt"])
        .assert()
        .success();

    jot_commit(dir.path(), "   ")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a commit message"));

    Ok(())
}
