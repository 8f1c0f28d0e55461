use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::{BranchName, RefName, RemoteName};
use crate::artifacts::sync::transfer::Transfer;
use crate::errors::GitletError;

impl Repository {
    /// Copy a remote branch's history and record its tip as
    /// `<remote>/<branch>`
    ///
    /// Local branches and the working directory are left untouched.
    pub fn fetch(&self, remote: &str, branch: &str) -> anyhow::Result<()> {
        let remote_repository = self.open_remote(remote)?;
        let remote_name =
            RemoteName::try_parse(remote.to_string()).map_err(|_| GitletError::RemoteNotFound)?;
        let branch_name = BranchName::try_parse(branch.to_string())
            .map_err(|_| GitletError::RemoteBranchNotFound)?;

        let remote_tip = remote_repository
            .refs()
            .read_ref(&RefName::from(branch_name.clone()))?
            .ok_or(GitletError::RemoteBranchNotFound)?;

        Transfer::new(remote_repository.database(), self.database()).copy_history(&remote_tip)?;

        let tracking_ref = RefName::Remote {
            remote: remote_name,
            branch: branch_name,
        };
        self.refs().update_ref(&tracking_ref, &remote_tip)
    }

    pub async fn pull(&self, remote: &str, branch: &str) -> anyhow::Result<()> {
        self.fetch(remote, branch)?;

        self.merge(&format!("{remote}/{branch}")).await
    }
}
