use crate::common::command::{init_repository_dir, run_jot_command};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn checkout_restores_file_from_head(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    write_file(FileSpec::new(
        dir.path().join("a.txt"),
        "scribbled over\n".to_string(),
    ));

    run_jot_command(dir.path(), &["checkout", "--", "a.txt"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.path().join("a.txt")), "alpha\n");

    Ok(())
}

#[rstest]
fn checkout_of_an_untracked_file_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_jot_command(dir.path(), &["checkout", "--", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "File does not exist in that commit: missing.txt",
        ));

    Ok(())
}
