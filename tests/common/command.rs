use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_bantam_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// Repository with three commits on master. Each commit captures exactly
/// what is staged, and committing clears the staged set, so the whole tree
/// is re-staged with `add .` before every commit:
/// 1. "First commit": 1.txt ("one"), a/2.txt ("two")
/// 2. "Second commit": 1.txt ("one updated"), a/2.txt
/// 3. "Third commit": 1.txt, a/2.txt, 3.txt ("three")
#[fixture]
pub fn repository_with_commits(init_repository_dir: TempDir) -> TempDir {
    let repository_dir = init_repository_dir;

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    ));
    run_bantam_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();
    bantam_commit(repository_dir.path(), "First commit")
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one updated".to_string(),
    ));
    run_bantam_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();
    bantam_commit(repository_dir.path(), "Second commit")
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("3.txt"),
        "three".to_string(),
    ));
    run_bantam_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();
    bantam_commit(repository_dir.path(), "Third commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_bantam_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("bantam").expect("Failed to find bantam binary");
    cmd.env("NO_PAGER", "1");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn bantam_commit(dir: &Path, message: &str) -> Command {
    run_bantam_command(dir, &["commit", "-m", message])
}

/// Raw content of the HEAD file.
pub fn read_head(dir: &Path) -> String {
    let head_path = dir.join(".bantam").join("HEAD");
    std::fs::read_to_string(head_path)
        .expect("Failed to read HEAD")
        .trim()
        .to_string()
}

/// The commit id a branch currently points to, from the branch table.
pub fn branch_commit_id(dir: &Path, name: &str) -> Option<String> {
    let branches_path = dir.join(".bantam").join("branches");
    let table = std::fs::read_to_string(branches_path).expect("Failed to read branch table");

    table.lines().find_map(|line| {
        let (branch, oid) = line.split_once(' ')?;
        (branch == name).then(|| oid.to_string())
    })
}

/// The commit id HEAD resolves to, following the attached branch if needed.
pub fn head_commit_id(dir: &Path) -> Option<String> {
    let head = read_head(dir);
    match head.strip_prefix("ref: ") {
        Some(branch) => branch_commit_id(dir, branch),
        None => Some(head),
    }
}
