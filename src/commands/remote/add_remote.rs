use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::RemoteName;
use crate::errors::GitletError;

impl Repository {
    pub fn add_remote(&self, name: &str, path: &str) -> anyhow::Result<()> {
        let remote_name =
            RemoteName::try_parse(name.to_string()).map_err(|_| GitletError::IncorrectOperands)?;

        self.remotes().add(&remote_name, path)
    }

    pub fn remove_remote(&self, name: &str) -> anyhow::Result<()> {
        let remote_name =
            RemoteName::try_parse(name.to_string()).map_err(|_| GitletError::RemoteNotFound)?;

        self.remotes().remove(&remote_name)
    }
}
