use crate::areas::repository::Repository;
use crate::areas::stage::Stage;
use crate::artifacts::branch::branch_name::RefName;
use crate::artifacts::checkout::migration::check_untracked_files;
use crate::artifacts::merge::resolution::{FileResolution, conflict_content, resolve_commits};
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use std::path::Path;

impl Repository {
    pub async fn merge(&self, branch: &str) -> anyhow::Result<()> {
        let stage = self.stage();
        let mut stage = stage.lock().await;

        // Load the stage file from the disk
        stage.rehydrate()?;
        if !stage.is_empty() {
            return Err(GitletError::UncommittedChanges.into());
        }

        let target_ref = RefName::try_parse(branch).map_err(|_| GitletError::BranchNotFound)?;
        let target_oid = self
            .refs()
            .read_ref(&target_ref)?
            .ok_or(GitletError::BranchNotFound)?;
        let current_ref = self.refs().current_ref()?;
        if current_ref == target_ref {
            return Err(GitletError::MergeWithItself.into());
        }

        let (head_oid, head_commit) = self.head_commit()?;
        let target_commit = self.database().load_commit(&target_oid)?;

        let split_oid = SplitPointFinder::new(|oid: &ObjectId| {
            Ok(self.database().load_commit(oid)?.parents().to_vec())
        })
        .find(&head_oid, &target_oid)?
        .ok_or(GitletError::NoSplitPoint)?;

        if split_oid == target_oid {
            return Err(GitletError::AlreadyMerged.into());
        }
        if split_oid == head_oid {
            self.migrate_to(&mut stage, &head_commit, &target_commit)?;
            self.refs().update_ref(&current_ref, &target_oid)?;

            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        check_untracked_files(self.workspace(), &head_commit, target_commit.tracked())?;

        let split_commit = self.database().load_commit(&split_oid)?;
        log::debug!(
            "merging {} into {} at split point {}",
            target_oid.to_short_oid(),
            head_oid.to_short_oid(),
            split_oid.to_short_oid()
        );

        let mut conflicted = false;
        for (path, resolution) in resolve_commits(&split_commit, &head_commit, &target_commit) {
            match resolution {
                FileResolution::KeepCurrent => {}
                FileResolution::TakeTarget(blob_oid) => {
                    let blob = self.database().load_blob(&blob_oid)?;
                    self.workspace().write_file(&path, blob.content())?;
                    stage.stage(&path, blob_oid)?;
                }
                FileResolution::Delete => {
                    self.workspace().remove_file(&path)?;
                    stage.mark_removed(&path)?;
                }
                FileResolution::Conflict { current, target } => {
                    self.write_conflict(&mut stage, &path, current.as_ref(), target.as_ref())?;
                    conflicted = true;
                }
            }
        }

        let message = format!("Merged {branch} into {current_ref}.");
        self.write_commit(&mut stage, &head_commit, vec![head_oid, target_oid], message)?;

        if conflicted {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(())
    }

    fn write_conflict(
        &self,
        stage: &mut Stage,
        path: &Path,
        current: Option<&ObjectId>,
        target: Option<&ObjectId>,
    ) -> anyhow::Result<()> {
        let current = self.load_side(current)?;
        let target = self.load_side(target)?;

        let content = conflict_content(
            current.as_ref().map(|blob| &blob.content()[..]),
            target.as_ref().map(|blob| &blob.content()[..]),
        );
        self.workspace().write_file(path, &content)?;

        let blob_oid = self.database().store(&Blob::from(content.as_slice()))?;
        log::debug!("conflict in {}", path.display());

        stage.stage(path, blob_oid)
    }

    fn load_side(&self, blob_oid: Option<&ObjectId>) -> anyhow::Result<Option<Blob>> {
        blob_oid
            .map(|blob_oid| self.database().load_blob(blob_oid))
            .transpose()
    }
}
