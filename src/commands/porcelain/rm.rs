use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::errors::GitletError;

impl Repository {
    pub async fn rm(&self, file: &str) -> anyhow::Result<()> {
        let path = Workspace::relative_path(file).ok_or(GitletError::NothingToRemove)?;

        let stage = self.stage();
        let mut stage = stage.lock().await;

        // Load the stage file from the disk
        stage.rehydrate()?;

        let (_, head_commit) = self.head_commit()?;
        let is_tracked = head_commit.tracks(&path);
        if !stage.is_staged(&path) && !is_tracked {
            return Err(GitletError::NothingToRemove.into());
        }

        stage.unstage(&path)?;
        if is_tracked {
            stage.mark_removed(&path)?;
            self.workspace().remove_file(&path)?;
        }

        Ok(())
    }
}
