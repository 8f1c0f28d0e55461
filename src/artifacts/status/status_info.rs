use crate::areas::repository::Repository;
use crate::areas::stage::Stage;
use crate::artifacts::branch::branch_name::RefName;
use crate::artifacts::checkout::migration::workspace_matches;
use crate::artifacts::objects::commit::path_to_slash;
use crate::artifacts::status::file_change::WorkspaceChange;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::PathBuf;

pub type FileSet = BTreeSet<PathBuf>;
pub type ChangeSet = BTreeMap<PathBuf, WorkspaceChange>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub(crate) current_ref: RefName,
    pub(crate) branches: Vec<RefName>,
    pub(crate) staged_files: FileSet,
    pub(crate) removed_files: FileSet,
    pub(crate) workspace_changeset: ChangeSet,
    pub(crate) untracked_files: FileSet,
}

impl StatusInfo {
    pub fn write_to(&self, writer: &mut dyn Write) -> anyhow::Result<()> {
        writeln!(writer, "=== Branches ===")?;
        for branch in &self.branches {
            if branch == &self.current_ref {
                writeln!(writer, "*{branch}")?;
            } else {
                writeln!(writer, "{branch}")?;
            }
        }
        writeln!(writer)?;

        Self::write_section(writer, "Staged Files", self.staged_files.iter())?;
        Self::write_section(writer, "Removed Files", self.removed_files.iter())?;

        writeln!(writer, "=== Modifications Not Staged For Commit ===")?;
        for (path, change) in &self.workspace_changeset {
            writeln!(writer, "{} ({})", path_to_slash(path), change)?;
        }
        writeln!(writer)?;

        Self::write_section(writer, "Untracked Files", self.untracked_files.iter())?;

        Ok(())
    }

    fn write_section<'p>(
        writer: &mut dyn Write,
        title: &str,
        paths: impl Iterator<Item = &'p PathBuf>,
    ) -> anyhow::Result<()> {
        writeln!(writer, "=== {title} ===")?;
        for path in paths {
            writeln!(writer, "{}", path_to_slash(path))?;
        }
        writeln!(writer)?;

        Ok(())
    }
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self, stage: &Stage) -> anyhow::Result<StatusInfo> {
        let refs = self.repository.refs();
        let workspace = self.repository.workspace();
        let (_, head_commit) = self.repository.head_commit()?;

        let mut workspace_changeset = ChangeSet::new();

        for (path, oid) in head_commit.tracked() {
            if stage.is_staged(path) || stage.is_removed(path) {
                continue;
            }

            if !workspace.contains(path) {
                workspace_changeset.insert(path.clone(), WorkspaceChange::Deleted);
            } else if !workspace_matches(workspace, path, oid)? {
                workspace_changeset.insert(path.clone(), WorkspaceChange::Modified);
            }
        }

        for (path, oid) in stage.staged() {
            if !workspace.contains(path) {
                workspace_changeset.insert(path.clone(), WorkspaceChange::Deleted);
            } else if !workspace_matches(workspace, path, oid)? {
                workspace_changeset.insert(path.clone(), WorkspaceChange::Modified);
            }
        }

        let untracked_files = workspace
            .list_files()?
            .into_iter()
            .filter(|path| {
                stage.is_removed(path) || (!head_commit.tracks(path) && !stage.is_staged(path))
            })
            .collect();

        Ok(StatusInfo {
            current_ref: refs.current_ref()?,
            branches: refs.list_branches()?,
            staged_files: stage.staged().keys().cloned().collect(),
            removed_files: stage.removed().clone(),
            workspace_changeset,
            untracked_files,
        })
    }
}
