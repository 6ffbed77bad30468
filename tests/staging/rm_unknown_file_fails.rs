use crate::common::command::{init_repository_dir, run_jot_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn rm_unknown_file_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_jot_command(dir.path(), &["rm", "nope.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No reason to remove the file"));

    Ok(())
}
