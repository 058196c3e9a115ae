use crate::common::command::{
    bantam_commit, branch_commit_id, head_commit_id, init_repository_dir, read_head,
    repository_with_commits, run_bantam_command,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
fn checkout_of_a_missing_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_bantam_command(repository_dir.path(), &["checkout", "haha"])
        .assert()
        .failure()
        .code(1)
        .stderr("ERROR: No branch haha exists\n");

    assert_eq!(read_head(repository_dir.path()), "ref: master");

    Ok(())
}

#[rstest]
fn branch_creation_is_exclusive(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_bantam_command(repository_dir.path(), &["checkout", "haha", "-b"])
        .assert()
        .success();

    run_bantam_command(repository_dir.path(), &["checkout", "master", "-b"])
        .assert()
        .failure()
        .code(2)
        .stderr("ERROR: A branch named master already exists\n");

    // the failed creation did not move HEAD or touch the table
    assert_eq!(read_head(repository_dir.path()), "ref: haha");
    let branches =
        std::fs::read_to_string(repository_dir.path().join(".bantam").join("branches"))?;
    assert_eq!(branches, "master\nhaha\n");

    Ok(())
}

#[rstest]
fn checkout_of_an_unknown_commit_id_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    let bogus_id = "6".repeat(40);

    run_bantam_command(repository_dir.path(), &["checkout", &bogus_id])
        .assert()
        .failure()
        .stderr(format!("ERROR: Commit {} does not exist\n", bogus_id));

    assert_eq!(read_head(repository_dir.path()), "ref: master");

    Ok(())
}

#[rstest]
fn checkout_discards_staged_but_uncommitted_files(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_bantam_command(repository_dir.path(), &["checkout", "zerobranch", "-b"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("poor.txt"),
        String::new(),
    ));
    run_bantam_command(repository_dir.path(), &["add", "poor.txt"])
        .assert()
        .success();

    run_bantam_command(repository_dir.path(), &["checkout", "master"])
        .assert()
        .success();

    assert!(!repository_dir.path().join("poor.txt").exists());
    run_bantam_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout("Tracked files:\n0 files total\n");

    Ok(())
}

#[rstest]
fn checkout_restores_tracked_content_and_spares_untracked_files(
    repository_with_commits: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = repository_with_commits;

    // dirty a tracked file and drop an untracked one next to it
    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "scribbled over".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("notes.txt"),
        "untracked".to_string(),
    ));

    run_bantam_command(repository_dir.path(), &["checkout", "master"])
        .assert()
        .success();

    let restored = std::fs::read_to_string(repository_dir.path().join("1.txt"))?;
    assert_eq!(restored, "one updated");
    let nested = std::fs::read_to_string(repository_dir.path().join("a").join("2.txt"))?;
    assert_eq!(nested, "two");
    assert!(repository_dir.path().join("3.txt").exists());

    // never added, never touched
    let untracked = std::fs::read_to_string(repository_dir.path().join("notes.txt"))?;
    assert_eq!(untracked, "untracked");

    Ok(())
}

#[rstest]
fn checkout_by_commit_id_detaches_head(
    repository_with_commits: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = repository_with_commits;
    let third = head_commit_id(repository_dir.path()).unwrap();

    // walk back to the first commit through the log output
    let log = run_bantam_command(repository_dir.path(), &["log"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let log = String::from_utf8(log)?;
    let first = log
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .last()
        .expect("log should list commits")
        .to_string();
    assert_ne!(first, third);

    run_bantam_command(repository_dir.path(), &["checkout", &first])
        .assert()
        .success();

    // HEAD is detached at the first commit
    assert_eq!(read_head(repository_dir.path()), first);

    // the working directory matches the first snapshot exactly
    assert_eq!(
        std::fs::read_to_string(repository_dir.path().join("1.txt"))?,
        "one"
    );
    assert_eq!(
        std::fs::read_to_string(repository_dir.path().join("a").join("2.txt"))?,
        "two"
    );
    assert!(!repository_dir.path().join("3.txt").exists());

    // switching back to the branch restores the newest snapshot
    run_bantam_command(repository_dir.path(), &["checkout", "master"])
        .assert()
        .success();
    assert_eq!(read_head(repository_dir.path()), "ref: master");
    assert_eq!(
        std::fs::read_to_string(repository_dir.path().join("1.txt"))?,
        "one updated"
    );
    assert!(repository_dir.path().join("3.txt").exists());

    Ok(())
}

#[rstest]
fn branches_diverge_and_reconcile_independently(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    // commit file1 on master, then untrack it in a second commit
    write_file(FileSpec::new(
        repository_dir.path().join("file1.txt"),
        "one".to_string(),
    ));
    run_bantam_command(repository_dir.path(), &["add", "file1.txt"])
        .assert()
        .success();
    bantam_commit(repository_dir.path(), "GO BEARS!1")
        .assert()
        .success();
    let first_commit = head_commit_id(repository_dir.path()).unwrap();

    // the commit cleared the index, so untracking means staging the path
    // again and removing it
    run_bantam_command(repository_dir.path(), &["add", "file1.txt"])
        .assert()
        .success();
    run_bantam_command(repository_dir.path(), &["rm", "file1.txt"])
        .assert()
        .success();
    assert!(!repository_dir.path().join("file1.txt").exists());
    bantam_commit(repository_dir.path(), "GO BEARS!2")
        .assert()
        .success();

    // a topic branch with its own file
    run_bantam_command(repository_dir.path(), &["checkout", "testbranch1", "-b"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("file2.txt"),
        "two".to_string(),
    ));
    run_bantam_command(repository_dir.path(), &["add", "file2.txt"])
        .assert()
        .success();
    bantam_commit(repository_dir.path(), "GO BEARS!3")
        .assert()
        .success();
    assert!(repository_dir.path().join("file2.txt").exists());

    // back on master the topic file is gone
    run_bantam_command(repository_dir.path(), &["checkout", "master"])
        .assert()
        .success();
    assert!(!repository_dir.path().join("file2.txt").exists());
    assert!(!repository_dir.path().join("file1.txt").exists());

    // the topic branch still has it
    run_bantam_command(repository_dir.path(), &["checkout", "testbranch1"])
        .assert()
        .success();
    assert!(repository_dir.path().join("file2.txt").exists());

    // and the first commit still has file1
    run_bantam_command(repository_dir.path(), &["checkout", &first_commit])
        .assert()
        .success();
    assert!(repository_dir.path().join("file1.txt").exists());
    assert!(!repository_dir.path().join("file2.txt").exists());

    Ok(())
}

#[rstest]
fn create_flag_switches_to_the_new_branch_in_place(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    write_file(FileSpec::new(
        repository_dir.path().join("file1.txt"),
        "one".to_string(),
    ));
    run_bantam_command(repository_dir.path(), &["add", "file1.txt"])
        .assert()
        .success();
    bantam_commit(repository_dir.path(), "First commit")
        .assert()
        .success();

    run_bantam_command(repository_dir.path(), &["checkout", "topic", "-b"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());

    assert_eq!(read_head(repository_dir.path()), "ref: topic");
    // the new branch points at the same commit
    assert_eq!(
        branch_commit_id(repository_dir.path(), "topic"),
        branch_commit_id(repository_dir.path(), "master"),
    );
    // committed content is untouched
    assert_eq!(
        std::fs::read_to_string(repository_dir.path().join("file1.txt"))?,
        "one"
    );
    run_bantam_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout("Tracked files:\n0 files total\n");

    Ok(())
}
