use crate::areas::repository::Repository;
use crate::artifacts::branch::DEFAULT_BRANCH;
use crate::artifacts::branch::branch_name::RefName;
use crate::artifacts::objects::commit::Commit;
use crate::errors::GitletError;
use anyhow::Context;
use std::fs;

impl Repository {
    pub async fn init(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(GitletError::AlreadyInitialized.into());
        }

        fs::create_dir_all(self.gitlet_path()).context("Failed to create .gitlet directory")?;
        self.database()
            .init()
            .context("Failed to create .gitlet object directories")?;
        self.refs()
            .init()
            .context("Failed to create .gitlet/refs directories")?;
        self.remotes()
            .init()
            .context("Failed to create .gitlet/remotes directory")?;

        let stage = self.stage();
        let stage = stage.lock().await;
        stage
            .write_updates()
            .context("Failed to create .gitlet/stage file")?;

        let initial_oid = self.database().store(&Commit::initial())?;
        let default_branch = RefName::try_parse(DEFAULT_BRANCH)?;
        self.refs().update_ref(&default_branch, &initial_oid)?;
        self.refs()
            .set_head(&default_branch)
            .context("Failed to create initial HEAD reference")?;

        log::info!("initialized repository in {}", self.path().display());
        Ok(())
    }
}
