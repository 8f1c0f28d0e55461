use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Commit, TrackedFiles};
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Planned transition of the working directory from one snapshot to another
pub struct Migration<'r> {
    database: &'r Database,
    /// Files to (re)write with the content of a blob
    writes: BTreeMap<PathBuf, ObjectId>,
    /// Files tracked by the source snapshot but not by the target
    deletions: BTreeSet<PathBuf>,
}

impl<'r> Migration<'r> {
    /// Plan the move from `current` to `target`
    ///
    /// Fails before anything is planned if an untracked file would be
    /// overwritten.
    pub fn plan(
        database: &'r Database,
        workspace: &Workspace,
        current: &Commit,
        target: &Commit,
    ) -> anyhow::Result<Self> {
        check_untracked_files(workspace, current, target.tracked())?;

        let writes = target.tracked().clone();
        let deletions = current
            .tracked()
            .keys()
            .filter(|path| !target.tracks(path))
            .cloned()
            .collect();

        Ok(Self {
            database,
            writes,
            deletions,
        })
    }

    pub fn writes(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.writes
    }

    pub fn deletions(&self) -> &BTreeSet<PathBuf> {
        &self.deletions
    }

    pub fn load_blob(&self, oid: &ObjectId) -> anyhow::Result<Blob> {
        self.database.load_blob(oid)
    }
}

/// Whether the working copy of `path` holds exactly the content `oid`
pub fn workspace_matches(workspace: &Workspace, path: &Path, oid: &ObjectId) -> anyhow::Result<bool> {
    if !workspace.contains(path) {
        return Ok(false);
    }

    Ok(&workspace.parse_blob(path)?.object_id()? == oid)
}

/// Refuse to continue if writing `incoming` would clobber a file the current
/// commit does not track
///
/// Only files whose working copy differs from the incoming version count: an
/// untracked file already holding that exact content is safe to overwrite.
pub fn check_untracked_files(
    workspace: &Workspace,
    current: &Commit,
    incoming: &TrackedFiles,
) -> anyhow::Result<()> {
    for (path, oid) in incoming {
        if !current.tracks(path)
            && workspace.contains(path)
            && !workspace_matches(workspace, path, oid)?
        {
            log::debug!("untracked file in the way: {}", path.display());
            return Err(GitletError::UntrackedFileInTheWay.into());
        }
    }

    Ok(())
}
