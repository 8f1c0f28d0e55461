//! Gitlet references (branches and HEAD)
//!
//! References are human-readable names pointing to commits:
//!
//! - HEAD: names the checked-out branch, `branch` or `remote/branch`
//! - Branches: `refs/heads/*` pointing to local branch tip commits
//! - Remote-tracking branches: `refs/remotes/<remote>/*`, updated by fetch
//!
//! ## File Format
//!
//! Branch files contain the 40-character commit id. HEAD contains a ref name,
//! never a commit id.

use crate::artifacts::branch::branch_name::{BranchName, RefName};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

/// Gitlet references manager
///
/// Handles reading and writing HEAD and branch refs.
/// Writes go through an exclusive file lock.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the `.gitlet` directory
    path: Box<Path>,
}

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

impl Refs {
    pub fn init(&self) -> anyhow::Result<()> {
        for dir in [self.heads_path(), self.remotes_path()] {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create refs directory at {:?}", dir))?;
        }

        Ok(())
    }

    /// Name of the checked-out branch
    pub fn current_ref(&self) -> anyhow::Result<RefName> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {:?}", head_path))?;

        RefName::try_parse(content.trim()).with_context(|| format!("corrupt HEAD at {:?}", head_path))
    }

    pub fn set_head(&self, ref_name: &RefName) -> anyhow::Result<()> {
        self.update_ref_file(&self.head_path(), ref_name.to_string())?;

        log::info!("HEAD -> {ref_name}");
        Ok(())
    }

    /// Commit the checked-out branch points at
    pub fn read_head(&self) -> anyhow::Result<ObjectId> {
        let current_ref = self.current_ref()?;

        self.read_ref(&current_ref)?
            .with_context(|| format!("HEAD names the missing branch {current_ref}"))
    }

    pub fn is_current_branch(&self, ref_name: &RefName) -> anyhow::Result<bool> {
        Ok(&self.current_ref()? == ref_name)
    }

    pub fn exists(&self, ref_name: &RefName) -> bool {
        self.path.join(ref_name.as_ref_path()).is_file()
    }

    pub fn read_ref(&self, ref_name: &RefName) -> anyhow::Result<Option<ObjectId>> {
        let ref_path = self.path.join(ref_name.as_ref_path());
        if !ref_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&ref_path)
            .with_context(|| format!("failed to read ref file at {:?}", ref_path))?;

        Ok(Some(ObjectId::try_parse(content.trim().to_string())?))
    }

    /// Move a branch (local or remote-tracking) to `oid`, creating it if needed
    pub fn update_ref(&self, ref_name: &RefName, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(&self.path.join(ref_name.as_ref_path()), oid.to_string())?;

        log::info!("{ref_name} -> {}", oid.to_short_oid());
        Ok(())
    }

    pub fn create_branch(&self, name: &BranchName, source_oid: &ObjectId) -> anyhow::Result<()> {
        let ref_name = RefName::from(name.clone());

        // check whether another branch with the same name already exists
        if self.exists(&ref_name) {
            return Err(GitletError::BranchAlreadyExists.into());
        }

        self.update_ref(&ref_name, source_oid)
    }

    pub fn delete_branch(&self, ref_name: &RefName) -> anyhow::Result<ObjectId> {
        if self.is_current_branch(ref_name)? {
            return Err(GitletError::RemoveCurrentBranch.into());
        }

        let branch_path = self.path.join(ref_name.as_ref_path());
        let oid = self
            .read_ref(ref_name)?
            .ok_or(GitletError::BranchNotFound)?;

        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))?;
        self.prune_branch_empty_parent_dirs(&branch_path)?;

        log::info!("deleted branch {ref_name}");
        Ok(oid)
    }

    /// Local branches then remote-tracking branches, each sorted by name
    pub fn list_branches(&self) -> anyhow::Result<Vec<RefName>> {
        let mut local = self.list_refs(&self.heads_path())?;
        let mut remote = self.list_refs(&self.remotes_path())?;
        local.sort();
        remote.sort();

        Ok(local.into_iter().chain(remote).collect())
    }

    fn list_refs(&self, path: &Path) -> anyhow::Result<Vec<RefName>> {
        let mut refs = Vec::new();

        for entry in WalkDir::new(path).min_depth(1) {
            let entry = entry.with_context(|| format!("failed to list refs at {:?}", path))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative_path = entry.path().strip_prefix(path)?;
            let name = relative_path
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            refs.push(RefName::try_parse(&name)?);
        }

        Ok(refs)
    }

    fn update_ref_file(&self, path: &Path, raw_ref: String) -> anyhow::Result<()> {
        // create all the parent directories if they don't exist
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path().as_ref()
            && parent != self.remotes_path().as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {:?}", parent)
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }

    pub fn remotes_path(&self) -> Box<Path> {
        self.refs_path().join("remotes").into_boxed_path()
    }
}

#[cfg(test)]
mod tests {
    use super::Refs;
    use crate::artifacts::branch::branch_name::{BranchName, RefName};
    use crate::artifacts::objects::object_id::ObjectId;
    use crate::errors::GitletError;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;

    fn refs(dir: &TempDir) -> Refs {
        let refs = Refs::new(dir.path().to_path_buf().into_boxed_path());
        refs.init().unwrap();
        refs.update_ref(&RefName::try_parse("master").unwrap(), &ObjectId::hash(b"root"))
            .unwrap();
        refs.set_head(&RefName::try_parse("master").unwrap()).unwrap();
        refs
    }

    #[test]
    fn head_resolves_through_the_current_branch() {
        let dir = TempDir::new().unwrap();
        let refs = refs(&dir);

        assert_eq!(refs.current_ref().unwrap().to_string(), "master");
        assert_eq!(refs.read_head().unwrap(), ObjectId::hash(b"root"));
    }

    #[test]
    fn duplicate_branches_are_rejected() {
        let dir = TempDir::new().unwrap();
        let refs = refs(&dir);
        let name = BranchName::try_parse("feature".to_string()).unwrap();

        refs.create_branch(&name, &ObjectId::hash(b"root")).unwrap();
        let err = refs
            .create_branch(&name, &ObjectId::hash(b"root"))
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<GitletError>(),
            Some(&GitletError::BranchAlreadyExists)
        );
    }

    #[test]
    fn the_current_branch_cannot_be_deleted() {
        let dir = TempDir::new().unwrap();
        let refs = refs(&dir);

        let err = refs
            .delete_branch(&RefName::try_parse("master").unwrap())
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<GitletError>(),
            Some(&GitletError::RemoveCurrentBranch)
        );

        let err = refs
            .delete_branch(&RefName::try_parse("nope").unwrap())
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<GitletError>(),
            Some(&GitletError::BranchNotFound)
        );
    }

    #[test]
    fn branches_list_local_before_remote_tracking() {
        let dir = TempDir::new().unwrap();
        let refs = refs(&dir);
        let oid = ObjectId::hash(b"root");

        refs.update_ref(&RefName::try_parse("origin/master").unwrap(), &oid)
            .unwrap();
        refs.create_branch(&BranchName::try_parse("alpha".to_string()).unwrap(), &oid)
            .unwrap();

        let names = refs
            .list_branches()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["alpha", "master", "origin/master"]);

        refs.delete_branch(&RefName::try_parse("origin/master").unwrap())
            .unwrap();
        assert!(!dir.path().join("refs/remotes/origin").exists());
        assert!(dir.path().join("refs/remotes").exists());
    }
}
