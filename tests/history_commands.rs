use assert_fs::TempDir;
use common::command::{
    branch_commit_id, commit_parents, gitlet_commit_at, init_repository_dir, run_gitlet_command,
    stdout_of,
};
use common::file::{FileSpec, write_file};
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::collections::BTreeSet;
use std::path::Path;

mod common;

fn commit_at(dir: &Path, file: &str, content: &str, message: &str, date: &str) -> String {
    write_file(FileSpec::new(dir.join(file), content.to_string()));
    run_gitlet_command(dir, &["add", file]).assert().success();
    gitlet_commit_at(dir, message, date).assert().success();

    branch_commit_id(dir, "master")
}

#[rstest]
fn log_follows_the_current_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let hello_id = branch_commit_id(dir.path(), "master");
    let initial_id = commit_parents(dir.path(), &hello_id).remove(0);

    let second_id = commit_at(
        dir.path(),
        "second.txt",
        "2",
        "second commit",
        "2024-03-05 14:07:09 -0800",
    );

    let expected = format!(
        "===\ncommit {second_id}\nDate: Tue Mar 05 14:07:09 2024 -0800\nsecond commit\n\n\
         ===\ncommit {hello_id}\nDate: Sun Jan 01 12:00:00 2023 +0000\nadd hello\n\n\
         ===\ncommit {initial_id}\nDate: Thu Jan 01 00:00:00 1970 +0000\ninitial commit\n\n"
    );
    run_gitlet_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(expected);
}

#[rstest]
fn global_log_lists_every_commit_newest_first(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let master_id = commit_at(
        dir.path(),
        "a.txt",
        "a",
        "on master",
        "2024-01-01 10:00:00 +0000",
    );
    run_gitlet_command(dir.path(), &["branch", "side"])
        .assert()
        .success();
    run_gitlet_command(dir.path(), &["checkout", "side"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("b.txt"), "b".to_string()));
    run_gitlet_command(dir.path(), &["add", "b.txt"])
        .assert()
        .success();
    gitlet_commit_at(dir.path(), "on side", "2024-02-01 10:00:00 +0000")
        .assert()
        .success();
    let side_id = branch_commit_id(dir.path(), "side");
    run_gitlet_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();

    let global_log = stdout_of(&mut run_gitlet_command(dir.path(), &["global-log"]));
    let commit_ids = global_log
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .collect::<Vec<_>>();

    assert_eq!(commit_ids.len(), 4);
    assert_eq!(commit_ids[0], side_id);
    assert_eq!(commit_ids[1], master_id);
    assert!(global_log.ends_with("initial commit\n\n"));
}

#[rstest]
fn find_prints_every_commit_with_the_message(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let first_id = commit_at(
        dir.path(),
        "a.txt",
        "a",
        "same message",
        "2024-01-01 10:00:00 +0000",
    );
    let second_id = commit_at(
        dir.path(),
        "b.txt",
        "b",
        "same message",
        "2024-01-02 10:00:00 +0000",
    );

    let found = stdout_of(&mut run_gitlet_command(
        dir.path(),
        &["find", "same message"],
    ));
    assert_eq!(
        found.lines().collect::<BTreeSet<_>>(),
        BTreeSet::from([first_id.as_str(), second_id.as_str()])
    );
}

#[rstest]
fn find_reports_unknown_messages(init_repository_dir: TempDir) {
    run_gitlet_command(init_repository_dir.path(), &["find", "never written"])
        .assert()
        .success()
        .stdout("Found no commit with that message.\n");
}

#[rstest]
fn cat_file_accepts_abbreviated_commit_ids(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let head_id = branch_commit_id(dir.path(), "master");

    run_gitlet_command(dir.path(), &["cat-file", &head_id[..6]])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("parent "))
        .stdout(predicate::str::contains("date 1672574400 +0000\n"))
        .stdout(predicate::str::ends_with("\n\nadd hello\n"));
}

#[rstest]
#[case::too_short("abcde")]
#[case::not_hex("zzzzzzzz")]
#[case::unknown("0123456789abcdef0123456789abcdef01234567")]
fn cat_file_reports_unknown_objects(init_repository_dir: TempDir, #[case] object_id: &str) {
    run_gitlet_command(init_repository_dir.path(), &["cat-file", object_id])
        .assert()
        .success()
        .stdout("No object with that id exists.\n");
}
