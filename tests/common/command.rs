use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// Commit date used by every test commit unless a test picks its own
pub const DEFAULT_COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository whose master branch holds `hello.txt` on top of the initial commit
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    commit_file(repository_dir.path(), "hello.txt", "hello\n", "add hello");

    repository_dir
}

pub fn run_gitlet_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitlet").expect("Failed to find the gitlet binary");
    cmd.current_dir(dir)
        .args(args)
        .env("NO_PAGER", "1")
        .env_remove("RUST_LOG")
        .env_remove("GITLET_COMMIT_DATE");
    cmd
}

pub fn gitlet_commit(dir: &Path, message: &str) -> Command {
    gitlet_commit_at(dir, message, DEFAULT_COMMIT_DATE)
}

/// `date` uses the `%Y-%m-%d %H:%M:%S %z` format
pub fn gitlet_commit_at(dir: &Path, message: &str, date: &str) -> Command {
    let mut cmd = run_gitlet_command(dir, &["commit", message]);
    cmd.env("GITLET_COMMIT_DATE", date);
    cmd
}

/// Write, stage and commit a single file
pub fn commit_file(dir: &Path, file: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(file), content.to_string()));
    run_gitlet_command(dir, &["add", file])
        .assert()
        .success()
        .stdout("");
    gitlet_commit(dir, message).assert().success().stdout("");
}

pub fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("Failed to run gitlet");
    String::from_utf8(output.stdout).expect("gitlet printed invalid UTF-8")
}

/// Id of the commit a branch of the repository in `dir` points at
pub fn branch_commit_id(dir: &Path, branch: &str) -> String {
    let ref_path = match branch.split_once('/') {
        Some((remote, branch)) => dir
            .join(".gitlet/refs/remotes")
            .join(remote)
            .join(branch),
        None => dir.join(".gitlet/refs/heads").join(branch),
    };

    std::fs::read_to_string(&ref_path)
        .unwrap_or_else(|e| panic!("Failed to read ref {:?}: {}", ref_path, e))
        .trim()
        .to_string()
}

pub fn head_commit_id(dir: &Path) -> String {
    let head = std::fs::read_to_string(dir.join(".gitlet/HEAD")).expect("Failed to read HEAD");
    branch_commit_id(dir, head.trim())
}

/// Parent ids listed by `cat-file` for a commit
pub fn commit_parents(dir: &Path, commit_id: &str) -> Vec<String> {
    stdout_of(&mut run_gitlet_command(dir, &["cat-file", commit_id]))
        .lines()
        .filter_map(|line| line.strip_prefix("parent "))
        .map(ToString::to_string)
        .collect()
}
