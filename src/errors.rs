//! User-facing failure conditions
//!
//! Every condition a user can trigger through the command line has a variant here
//! whose `Display` output is the exact message printed. Internal failures (I/O,
//! corrupt objects) are not listed: they travel as plain `anyhow::Error`s with
//! context attached and are reported differently by the binary.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GitletError {
    // usage
    #[error("Please enter a command.")]
    NoCommand,
    #[error("No command with that name exists.")]
    UnknownCommand,
    #[error("Incorrect operands.")]
    IncorrectOperands,

    // repository
    #[error("Not in an initialized Gitlet directory.")]
    NotInitialized,
    #[error("A Gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,

    // staging and committing
    #[error("File does not exist.")]
    FileNotFound,
    #[error("Please enter a commit message.")]
    EmptyCommitMessage,
    #[error("No changes added to the commit.")]
    NothingToCommit,
    #[error("No reason to remove the file.")]
    NothingToRemove,

    // history lookups
    #[error("Found no commit with that message.")]
    NoCommitWithMessage,
    #[error("No commit with that id exists.")]
    CommitNotFound,
    #[error("Commit id is ambiguous.")]
    AmbiguousCommitId,
    #[error("File does not exist in that commit.")]
    FileNotInCommit,
    #[error("No object with that id exists.")]
    ObjectNotFound,

    // branches
    #[error("No such branch exists.")]
    NoSuchBranch,
    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,
    #[error("A branch with that name already exists.")]
    BranchAlreadyExists,
    #[error("A branch with that name does not exist.")]
    BranchNotFound,
    #[error("Cannot remove the current branch.")]
    RemoveCurrentBranch,
    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),

    // working directory safety
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileInTheWay,

    // merge
    #[error("You have uncommitted changes.")]
    UncommittedChanges,
    #[error("Cannot merge a branch with itself.")]
    MergeWithItself,
    #[error("Given branch is an ancestor of the current branch.")]
    AlreadyMerged,
    #[error("Given branch shares no history with the current branch.")]
    NoSplitPoint,

    // remotes
    #[error("A remote with that name already exists.")]
    RemoteAlreadyExists,
    #[error("A remote with that name does not exist.")]
    RemoteNotFound,
    #[error("Remote directory not found.")]
    RemoteDirectoryNotFound,
    #[error("That remote does not have that branch.")]
    RemoteBranchNotFound,
    #[error("Please pull down remote changes before pushing.")]
    PushRejected,
}

#[cfg(test)]
mod tests {
    use super::GitletError;

    #[test]
    fn messages_match_the_command_line_contract() {
        assert_eq!(
            GitletError::UntrackedFileInTheWay.to_string(),
            "There is an untracked file in the way; delete it, or add and commit it first."
        );
        assert_eq!(
            GitletError::PushRejected.to_string(),
            "Please pull down remote changes before pushing."
        );
        assert_eq!(
            GitletError::InvalidBranchName("a..b".to_string()).to_string(),
            "Invalid branch name: a..b"
        );
    }

    #[test]
    fn user_errors_survive_a_trip_through_anyhow() {
        let err: anyhow::Error = GitletError::AmbiguousCommitId.into();
        assert_eq!(
            err.downcast_ref::<GitletError>(),
            Some(&GitletError::AmbiguousCommitId)
        );
    }
}
