#![allow(dead_code)]

pub mod command;
pub mod file;

/// Status output of a repository with nothing to report besides its branches
pub fn clean_status(branches: &[&str]) -> String {
    let mut status = String::from("=== Branches ===\n");
    for branch in branches {
        status.push_str(branch);
        status.push('\n');
    }
    status.push_str(
        "\n=== Staged Files ===\n\n\
         === Removed Files ===\n\n\
         === Modifications Not Staged For Commit ===\n\n\
         === Untracked Files ===\n\n",
    );

    status
}
