use crate::common::command::{init_repository_dir, jot_commit, run_jot_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn log_walks_first_parents(
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
    jot_commit(dir.path(), "add c").assert().success();

    let output = run_jot_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("add c"))
        .stdout(predicate::str::contains("Initial files"))
        .stdout(predicate::str::contains("initial commit"))
        .stdout(predicate::str::contains("Date: "))
        .get_output()
        .stdout
        .clone();

    // newest first
    let output = String::from_utf8(output)?;
    let newest = output.find("add c").expect("missing newest commit");
    let oldest = output.find("initial commit").expect("missing root commit");
    assert!(newest < oldest);

    Ok(())
}

#[rstest]
fn log_ignores_other_branches(
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
    jot_commit(dir.path(), "feature work").assert().success();
    run_jot_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();

    run_jot_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("feature work").not());

    Ok(())
}
