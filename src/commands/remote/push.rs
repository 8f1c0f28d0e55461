use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::{BranchName, RefName};
use crate::artifacts::history::ancestors_of;
use crate::artifacts::sync::transfer::Transfer;
use crate::errors::GitletError;

impl Repository {
    /// Append the local history to a branch of the remote
    ///
    /// Only fast-forwards are accepted: the remote tip has to be in the
    /// history of the local head commit.
    pub fn push(&self, remote: &str, branch: &str) -> anyhow::Result<()> {
        let remote_repository = self.open_remote(remote)?;
        let branch_name = BranchName::try_parse(branch.to_string())
            .map_err(|_| GitletError::InvalidBranchName(branch.to_string()))?;
        let remote_ref = RefName::from(branch_name);

        let head_oid = self.refs().read_head()?;
        if let Some(remote_tip) = remote_repository.refs().read_ref(&remote_ref)?
            && !ancestors_of(self.database(), &head_oid)?.contains(&remote_tip)
        {
            return Err(GitletError::PushRejected.into());
        }

        Transfer::new(self.database(), remote_repository.database()).copy_history(&head_oid)?;
        remote_repository.refs().update_ref(&remote_ref, &head_oid)?;

        Ok(())
    }
}
