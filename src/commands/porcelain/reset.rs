use crate::areas::repository::Repository;

impl Repository {
    /// Check out the snapshot of an arbitrary commit and move the current
    /// branch to it
    pub async fn reset(&self, commit: &str) -> anyhow::Result<()> {
        let (target_oid, target_commit) = self.resolve_commit(commit)?;

        let stage = self.stage();
        let mut stage = stage.lock().await;

        // Load the stage file from the disk
        stage.rehydrate()?;

        let (_, head_commit) = self.head_commit()?;
        self.migrate_to(&mut stage, &head_commit, &target_commit)?;

        let current_ref = self.refs().current_ref()?;
        self.refs().update_ref(&current_ref, &target_oid)
    }
}
