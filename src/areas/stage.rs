//! Staging area
//!
//! Records the files scheduled for inclusion in (`staged`) or removal from
//! (`removed`) the next commit. A path is never in both sets.
//!
//! ## Stage File Format
//!
//! ```text
//! GITLET-STAGE 1
//! add <blob-sha> <path>
//! rm <path>
//! checksum <sha of every preceding byte>
//! ```
//!
//! Every mutation is written back to disk before it returns.

use crate::artifacts::objects::commit::path_to_slash;
use crate::artifacts::objects::object::sha1_hex;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::{Context, anyhow};
use std::collections::{BTreeMap, BTreeSet};
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

/// Signature line opening every stage file
const SIGNATURE: &str = "GITLET-STAGE 1";

const CHECKSUM_PREFIX: &str = "checksum ";

#[derive(Debug, Clone)]
pub struct Stage {
    /// Path to the stage file (`.gitlet/stage`)
    path: Box<Path>,
    staged: BTreeMap<PathBuf, ObjectId>,
    removed: BTreeSet<PathBuf>,
}

impl Stage {
    pub fn new(path: Box<Path>) -> Self {
        Stage {
            path,
            staged: BTreeMap::new(),
            removed: BTreeSet::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn staged(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.staged
    }

    pub fn removed(&self) -> &BTreeSet<PathBuf> {
        &self.removed
    }

    pub fn is_staged(&self, path: &Path) -> bool {
        self.staged.contains_key(path)
    }

    pub fn is_removed(&self, path: &Path) -> bool {
        self.removed.contains(path)
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty() && self.removed.is_empty()
    }

    /// Schedule `path` with content `oid` for the next commit
    ///
    /// Clears a pending removal of the same path.
    pub fn stage(&mut self, path: &Path, oid: ObjectId) -> anyhow::Result<()> {
        self.removed.remove(path);
        self.staged.insert(path.to_path_buf(), oid);

        self.write_updates()
    }

    pub fn unstage(&mut self, path: &Path) -> anyhow::Result<()> {
        if self.staged.remove(path).is_some() {
            self.write_updates()?;
        }

        Ok(())
    }

    /// Schedule `path` for removal, dropping any staged addition
    pub fn mark_removed(&mut self, path: &Path) -> anyhow::Result<()> {
        self.staged.remove(path);
        self.removed.insert(path.to_path_buf());

        self.write_updates()
    }

    pub fn unmark_removed(&mut self, path: &Path) -> anyhow::Result<()> {
        if self.removed.remove(path) {
            self.write_updates()?;
        }

        Ok(())
    }

    pub fn clear(&mut self) -> anyhow::Result<()> {
        self.staged.clear();
        self.removed.clear();

        self.write_updates()
    }

    /// Load the staging area from disk
    ///
    /// A missing or empty stage file is an empty staging area.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the stage file during reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.staged.clear();
        self.removed.clear();

        if !self.path.exists() {
            return Ok(());
        }

        let mut stage_file = std::fs::OpenOptions::new()
            .read(true)
            .open(self.path())
            .with_context(|| format!("failed to open stage file at {:?}", self.path))?;
        let mut content = String::new();
        if stage_file.metadata()?.len() > 0 {
            let mut lock = file_guard::lock(&mut stage_file, file_guard::Lock::Shared, 0, 1)?;
            lock.deref_mut().read_to_string(&mut content)?;
        }

        if content.is_empty() {
            return Ok(());
        }

        self.parse(&content)
            .with_context(|| format!("corrupt stage file at {:?}", self.path))
    }

    fn parse(&mut self, content: &str) -> anyhow::Result<()> {
        let body_len = content
            .trim_end_matches('\n')
            .rfind('\n')
            .map(|index| index + 1)
            .ok_or_else(|| anyhow!("missing checksum trailer"))?;
        let (body, trailer) = content.split_at(body_len);

        let checksum = trailer
            .trim_end()
            .strip_prefix(CHECKSUM_PREFIX)
            .ok_or_else(|| anyhow!("missing checksum trailer"))?;
        if checksum != sha1_hex(body.as_bytes()) {
            return Err(anyhow!("checksum mismatch"));
        }

        let mut lines = body.lines();
        if lines.next() != Some(SIGNATURE) {
            return Err(anyhow!("invalid stage file signature"));
        }

        for line in lines {
            if let Some(entry) = line.strip_prefix("add ") {
                let (oid, path) = entry
                    .split_once(' ')
                    .ok_or_else(|| anyhow!("invalid staged entry {line:?}"))?;
                self.staged
                    .insert(PathBuf::from(path), ObjectId::try_parse(oid.to_string())?);
            } else if let Some(path) = line.strip_prefix("rm ") {
                self.removed.insert(PathBuf::from(path));
            } else {
                return Err(anyhow!("unexpected stage entry {line:?}"));
            }
        }

        Ok(())
    }

    fn serialize(&self) -> String {
        let mut body = format!("{SIGNATURE}\n");
        for (path, oid) in &self.staged {
            body.push_str(&format!("add {} {}\n", oid, path_to_slash(path)));
        }
        for path in &self.removed {
            body.push_str(&format!("rm {}\n", path_to_slash(path)));
        }

        let checksum = sha1_hex(body.as_bytes());
        body.push_str(&format!("{CHECKSUM_PREFIX}{checksum}\n"));
        body
    }

    /// Write the staging area to disk
    ///
    /// # Locking
    ///
    /// Acquires an exclusive lock on the stage file during writing.
    pub fn write_updates(&self) -> anyhow::Result<()> {
        let mut stage_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())
            .with_context(|| format!("failed to open stage file at {:?}", self.path))?;
        let mut lock = file_guard::lock(&mut stage_file, file_guard::Lock::Exclusive, 0, 1)?;

        lock.deref_mut()
            .write_all(self.serialize().as_bytes())
            .with_context(|| format!("failed to write stage file at {:?}", self.path))?;

        log::debug!(
            "stage updated: {} staged, {} removed",
            self.staged.len(),
            self.removed.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Stage;
    use crate::artifacts::objects::object_id::ObjectId;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn stage(dir: &TempDir) -> Stage {
        Stage::new(dir.path().join("stage").into_boxed_path())
    }

    #[test]
    fn missing_stage_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let mut stage = stage(&dir);

        stage.rehydrate().unwrap();
        assert!(stage.is_empty());
    }

    #[test]
    fn mutations_are_persisted() {
        let dir = TempDir::new().unwrap();
        let mut writer = stage(&dir);
        let oid = ObjectId::hash(b"content");

        writer.stage(Path::new("dir/a file.txt"), oid.clone()).unwrap();
        writer.mark_removed(Path::new("gone.txt")).unwrap();

        let mut reader = stage(&dir);
        reader.rehydrate().unwrap();
        assert_eq!(reader.staged().get(Path::new("dir/a file.txt")), Some(&oid));
        assert!(reader.is_removed(Path::new("gone.txt")));
    }

    #[test]
    fn a_path_is_never_both_staged_and_removed() {
        let dir = TempDir::new().unwrap();
        let mut stage = stage(&dir);
        let path = Path::new("f.txt");

        stage.stage(path, ObjectId::hash(b"v1")).unwrap();
        stage.mark_removed(path).unwrap();
        assert!(!stage.is_staged(path));
        assert!(stage.is_removed(path));

        stage.stage(path, ObjectId::hash(b"v2")).unwrap();
        assert!(stage.is_staged(path));
        assert!(!stage.is_removed(path));

        stage.clear().unwrap();
        assert!(stage.is_empty());
    }

    #[test]
    fn tampered_stage_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut writer = stage(&dir);
        writer
            .stage(Path::new("f.txt"), ObjectId::hash(b"v1"))
            .unwrap();

        let content = std::fs::read_to_string(writer.path()).unwrap();
        std::fs::write(writer.path(), content.replace("f.txt", "g.txt")).unwrap();

        let mut reader = stage(&dir);
        assert!(reader.rehydrate().is_err());
    }
}
