use crate::common::command::{head_commit_id, jot_commit, load_commit, repository_dir, run_jot_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use bytes::Bytes;
use jot::artifacts::objects::blob::Blob;
use jot::artifacts::objects::object::Object;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn add_stages_file_for_the_next_commit(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;
    run_jot_command(dir.path(), &["init"]).assert().success();

    write_file(FileSpec::new(dir.path().join("a.txt"), "hello".to_string()));
    run_jot_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    run_jot_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt"));

    jot_commit(dir.path(), "add a").assert().success();

    // the committed snapshot tracks exactly the digest of ("a.txt", "hello")
    let head = load_commit(dir.path(), &head_commit_id(dir.path()));
    let expected = Blob::new("a.txt".to_string(), Bytes::from_static(b"hello"))
        .object_id()?;
    assert_eq!(head.snapshot().get("a.txt"), Some(&expected));

    // staging area is cleared by the commit
    run_jot_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\n\n"));

    Ok(())
}
