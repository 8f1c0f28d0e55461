use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::errors::GitletError;

impl Repository {
    pub async fn add(&self, file: &str) -> anyhow::Result<()> {
        let path = Workspace::relative_path(file).ok_or(GitletError::FileNotFound)?;
        if !self.workspace().contains(&path) {
            return Err(GitletError::FileNotFound.into());
        }

        let stage = self.stage();
        let mut stage = stage.lock().await;

        // Load the stage file from the disk
        stage.rehydrate()?;
        stage.unmark_removed(&path)?;

        let blob = self.workspace().parse_blob(&path)?;
        let (_, head_commit) = self.head_commit()?;

        let blob_oid = self.database().store(&blob)?;
        if head_commit.blob_for(&path) == Some(&blob_oid) {
            // identical to the committed version, nothing left to stage
            stage.unstage(&path)?;
        } else {
            stage.stage(&path, blob_oid)?;
        }

        Ok(())
    }
}
