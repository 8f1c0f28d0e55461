use crate::areas::repository::Repository;
use crate::areas::stage::Stage;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::branch_name::RefName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::commit::Commit;
use crate::errors::GitletError;

impl Repository {
    /// Restore one file from the head commit, or from `commit` when given
    ///
    /// The stage is left alone.
    pub fn checkout_file(&self, commit: Option<&str>, file: &str) -> anyhow::Result<()> {
        let (_, source_commit) = match commit {
            Some(prefix) => self.resolve_commit(prefix)?,
            None => self.head_commit()?,
        };

        let path = Workspace::relative_path(file).ok_or(GitletError::FileNotInCommit)?;
        let blob_oid = source_commit
            .blob_for(&path)
            .ok_or(GitletError::FileNotInCommit)?;
        let blob = self.database().load_blob(blob_oid)?;

        self.workspace().write_file(&path, blob.content())
    }

    pub async fn checkout_branch(&self, name: &str) -> anyhow::Result<()> {
        let target_ref = RefName::try_parse(name).map_err(|_| GitletError::NoSuchBranch)?;
        let target_oid = self
            .refs()
            .read_ref(&target_ref)?
            .ok_or(GitletError::NoSuchBranch)?;
        if self.refs().is_current_branch(&target_ref)? {
            return Err(GitletError::AlreadyOnBranch.into());
        }

        let stage = self.stage();
        let mut stage = stage.lock().await;

        // Load the stage file from the disk
        stage.rehydrate()?;

        let (_, head_commit) = self.head_commit()?;
        let target_commit = self.database().load_commit(&target_oid)?;
        self.migrate_to(&mut stage, &head_commit, &target_commit)?;

        self.refs().set_head(&target_ref)
    }

    /// Replace the working snapshot of `current` with the one of `target` and
    /// clear the stage
    ///
    /// Nothing is touched when an untracked file is in the way.
    pub(crate) fn migrate_to(
        &self,
        stage: &mut Stage,
        current: &Commit,
        target: &Commit,
    ) -> anyhow::Result<()> {
        let migration = Migration::plan(self.database(), self.workspace(), current, target)?;
        self.workspace().apply_migration(&migration)?;

        stage.clear()
    }
}
