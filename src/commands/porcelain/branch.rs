use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::{BranchName, RefName};
use crate::errors::GitletError;

impl Repository {
    /// Create a branch at the head commit without switching to it
    pub fn create_branch(&self, name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(name.to_string())
            .map_err(|_| GitletError::InvalidBranchName(name.to_string()))?;
        let head_oid = self.refs().read_head()?;

        self.refs().create_branch(&branch_name, &head_oid)
    }

    /// Delete a branch pointer; its commits stay in the store
    pub fn delete_branch(&self, name: &str) -> anyhow::Result<()> {
        let ref_name = RefName::try_parse(name).map_err(|_| GitletError::BranchNotFound)?;
        let branch_oid = self.refs().delete_branch(&ref_name)?;

        log::debug!("branch {ref_name} was at {}", branch_oid.to_short_oid());
        Ok(())
    }
}
