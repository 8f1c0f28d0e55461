use crate::areas::repository::Repository;
use crate::areas::stage::Stage;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;

impl Repository {
    pub async fn commit(&self, message: Option<&str>) -> anyhow::Result<()> {
        let message = message
            .filter(|message| !message.trim().is_empty())
            .ok_or(GitletError::EmptyCommitMessage)?;

        let stage = self.stage();
        let mut stage = stage.lock().await;

        // Load the stage file from the disk
        stage.rehydrate()?;
        if stage.is_empty() {
            return Err(GitletError::NothingToCommit.into());
        }

        let (head_oid, head_commit) = self.head_commit()?;
        self.write_commit(&mut stage, &head_commit, vec![head_oid], message.to_string())?;

        Ok(())
    }

    /// Snapshot the parent's files plus the stage as a new commit on the
    /// checked-out branch, then clear the stage
    ///
    /// A single-parent commit that would track exactly what its parent tracks
    /// is refused; merge commits are always written.
    pub(crate) fn write_commit(
        &self,
        stage: &mut Stage,
        head_commit: &Commit,
        parents: Vec<ObjectId>,
        message: String,
    ) -> anyhow::Result<ObjectId> {
        let mut tracked = head_commit.tracked().clone();
        tracked.extend(
            stage
                .staged()
                .iter()
                .map(|(path, oid)| (path.clone(), oid.clone())),
        );
        for path in stage.removed() {
            tracked.remove(path);
        }

        if parents.len() < 2 && &tracked == head_commit.tracked() {
            return Err(GitletError::NothingToCommit.into());
        }

        let commit = Commit::new(parents, Commit::timestamp_from_env()?, tracked, message);
        let commit_oid = self.database().store(&commit)?;
        self.refs()
            .update_ref(&self.refs().current_ref()?, &commit_oid)?;
        stage.clear()?;

        Ok(commit_oid)
    }
}
