use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::blob::Blob;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 1] = [".gitlet"];

/// The working directory
///
/// Every path taken or returned is relative to the repository root. Nothing
/// here ever touches the `.gitlet` directory.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    /// Every regular file under the root, sorted by path
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.path)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !Self::is_ignored(entry.path()));
        for entry in walker {
            let entry = entry.with_context(|| format!("Failed to list {:?}", self.path))?;

            if entry.file_type().is_file() {
                files.push(entry.path().strip_prefix(self.path.as_ref())?.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    fn is_ignored(path: &Path) -> bool {
        path.file_name()
            .map(|name| IGNORED_PATHS.contains(&name.to_string_lossy().as_ref()))
            .unwrap_or(false)
    }

    /// Repository-relative form of a path given on the command line
    ///
    /// `.` components are dropped and `..` pops the previous component.
    /// `None` for absolute paths, paths climbing above the root, the root
    /// itself and anything inside a `.gitlet` directory.
    pub fn relative_path(file: &str) -> Option<PathBuf> {
        let mut path = PathBuf::new();

        for component in Path::new(file).components() {
            match component {
                Component::Normal(name) => path.push(name),
                Component::ParentDir => {
                    if !path.pop() {
                        return None;
                    }
                }
                Component::CurDir => {}
                Component::RootDir | Component::Prefix(_) => return None,
            }
        }

        let reaches_ignored = path
            .components()
            .any(|component| Self::is_ignored(Path::new(component.as_os_str())));
        if path.as_os_str().is_empty() || reaches_ignored {
            return None;
        }

        Some(path)
    }

    pub fn contains(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let content = std::fs::read(self.path.join(file_path))
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(content.into())
    }

    pub fn parse_blob(&self, file_path: &Path) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.read_file(file_path)?))
    }

    pub fn write_file(&self, file_path: &Path, content: &[u8]) -> anyhow::Result<()> {
        let path = self.path.join(file_path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for: {:?}", file_path))?;
        }
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))?;

        Ok(())
    }

    /// Delete a file, then any directories it leaves empty
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let path = self.path.join(file_path);

        if path.is_file() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }
        self.prune_empty_parent_dirs(&path)
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.path.as_ref()
            && parent.is_dir()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent)
                .with_context(|| format!("Failed to remove empty directory: {:?}", parent))?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    // Deletions are applied before writes, so a file may replace a directory
    // emptied by the same migration.
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        for file_path in migration.deletions() {
            self.remove_file(file_path)?;
        }

        for (file_path, blob_oid) in migration.writes() {
            let blob = migration.load_blob(blob_oid)?;
            self.write_file(file_path, blob.content())?;
        }

        log::debug!(
            "workspace migrated: {} written, {} deleted",
            migration.writes().len(),
            migration.deletions().len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Workspace;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;
    use std::path::{Path, PathBuf};

    #[test]
    fn lists_files_recursively_without_the_repository_directory() {
        let dir = TempDir::new().unwrap();
        dir.child("b.txt").write_str("b").unwrap();
        dir.child("a/c.txt").write_str("c").unwrap();
        dir.child(".gitlet/HEAD").write_str("master").unwrap();

        let workspace = Workspace::new(dir.path().to_path_buf().into_boxed_path());

        assert_eq!(
            workspace.list_files().unwrap(),
            vec![PathBuf::from("a/c.txt"), PathBuf::from("b.txt")]
        );
    }

    #[test]
    fn command_line_paths_are_made_relative() {
        assert_eq!(
            Workspace::relative_path("./a/b.txt"),
            Some(PathBuf::from("a/b.txt"))
        );
        assert_eq!(
            Workspace::relative_path("a/../c.txt"),
            Some(PathBuf::from("c.txt"))
        );
    }

    #[test]
    fn paths_outside_the_working_tree_are_rejected() {
        for file in [
            ".gitlet/HEAD",
            "./.gitlet/refs/heads/master",
            "a/../.gitlet/stage",
            "../hello.txt",
            "a/../../hello.txt",
            "/etc/hosts",
            "nested/.gitlet/HEAD",
            ".",
        ] {
            assert_eq!(Workspace::relative_path(file), None, "{file}");
        }
        assert_eq!(
            Workspace::relative_path("a/.gitlet.txt"),
            Some(PathBuf::from("a/.gitlet.txt"))
        );
    }

    #[test]
    fn removing_the_last_file_prunes_its_directories() {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::new(dir.path().to_path_buf().into_boxed_path());

        workspace
            .write_file(Path::new("x/y/z.txt"), b"nested")
            .unwrap();
        assert_eq!(
            workspace.read_file(Path::new("x/y/z.txt")).unwrap(),
            &b"nested"[..]
        );

        workspace.remove_file(Path::new("x/y/z.txt")).unwrap();
        assert!(!dir.path().join("x").exists());
        assert!(dir.path().exists());
    }
}
