use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::Status;

// Terminology:
// - staged files: additions recorded in the stage for the next commit
// - removed files: tracked files the next commit will drop
// - modifications not staged: working copies disagreeing with what the next
//   commit would record
// - untracked files: working files the next commit would not record
impl Repository {
    pub async fn status(&self) -> anyhow::Result<()> {
        let stage = self.stage();
        let mut stage = stage.lock().await;

        // Load the stage file from the disk
        stage.rehydrate()?;

        let status_info = Status::new(self).initialize(&stage)?;
        status_info.write_to(&mut *self.writer())?;

        Ok(())
    }
}
