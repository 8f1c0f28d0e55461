//! Remote registry
//!
//! A remote is another repository's `.gitlet` directory reachable by filesystem
//! path. Each registered remote is one file under `remotes/` holding that path.

use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::artifacts::branch::branch_name::RemoteName;
use crate::errors::GitletError;
use anyhow::Context;
use derive_new::new;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

const GITLET_DIR_NAME: &str = ".gitlet";

#[derive(Debug, new)]
pub struct Remotes {
    /// Path to the `remotes` directory
    path: Box<Path>,
}

impl Remotes {
    pub fn init(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.path)
            .with_context(|| format!("failed to create remotes directory at {:?}", self.path))
    }

    /// Convert `/` to the platform separator and make sure the path names a
    /// `.gitlet` directory
    pub fn normalize_path(raw_path: &str) -> String {
        let path = raw_path.replace('/', &MAIN_SEPARATOR.to_string());
        let trimmed = path.trim_end_matches(MAIN_SEPARATOR);

        if trimmed.ends_with(GITLET_DIR_NAME) {
            trimmed.to_string()
        } else if trimmed.is_empty() {
            GITLET_DIR_NAME.to_string()
        } else {
            format!("{trimmed}{MAIN_SEPARATOR}{GITLET_DIR_NAME}")
        }
    }

    pub fn add(&self, name: &RemoteName, raw_path: &str) -> anyhow::Result<()> {
        let remote_file = self.path.join(name.as_ref());
        if remote_file.exists() {
            return Err(GitletError::RemoteAlreadyExists.into());
        }

        let path = Self::normalize_path(raw_path);
        std::fs::write(&remote_file, &path)
            .with_context(|| format!("failed to write remote file at {:?}", remote_file))?;

        log::info!("added remote {name} at {path}");
        Ok(())
    }

    pub fn remove(&self, name: &RemoteName) -> anyhow::Result<()> {
        let remote_file = self.path.join(name.as_ref());
        if !remote_file.is_file() {
            return Err(GitletError::RemoteNotFound.into());
        }

        std::fs::remove_file(&remote_file)
            .with_context(|| format!("failed to delete remote file at {:?}", remote_file))?;

        log::info!("removed remote {name}");
        Ok(())
    }

    /// Registered `.gitlet` path of a remote, as stored
    pub fn get(&self, name: &RemoteName) -> anyhow::Result<Option<PathBuf>> {
        let remote_file = self.path.join(name.as_ref());
        if !remote_file.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&remote_file)
            .with_context(|| format!("failed to read remote file at {:?}", remote_file))?;

        Ok(Some(PathBuf::from(content.trim_end_matches('\n'))))
    }
}

/// The object store and refs of a remote repository
///
/// Remote sync never touches a remote's working directory, HEAD or stage, so
/// nothing else is opened.
#[derive(Debug)]
pub struct RemoteRepository {
    database: Database,
    refs: Refs,
}

impl RemoteRepository {
    /// Open the remote whose `.gitlet` directory is `gitlet_path`
    pub fn open(gitlet_path: &Path) -> anyhow::Result<Self> {
        if !gitlet_path.is_dir() {
            return Err(GitletError::RemoteDirectoryNotFound.into());
        }

        Ok(RemoteRepository {
            database: Database::new(gitlet_path.to_path_buf().into_boxed_path()),
            refs: Refs::new(gitlet_path.to_path_buf().into_boxed_path()),
        })
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }
}

#[cfg(test)]
mod tests {
    use super::Remotes;
    use crate::artifacts::branch::branch_name::RemoteName;
    use crate::errors::GitletError;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;
    use std::path::{MAIN_SEPARATOR, PathBuf};

    #[test]
    fn paths_are_normalized_to_gitlet_directories() {
        let sep = MAIN_SEPARATOR;
        assert_eq!(
            Remotes::normalize_path("../other/.gitlet"),
            format!("..{sep}other{sep}.gitlet")
        );
        assert_eq!(
            Remotes::normalize_path("../other"),
            format!("..{sep}other{sep}.gitlet")
        );
        assert_eq!(
            Remotes::normalize_path("../other/"),
            format!("..{sep}other{sep}.gitlet")
        );
    }

    #[test]
    fn remotes_register_once() {
        let dir = TempDir::new().unwrap();
        let remotes = Remotes::new(dir.path().join("remotes").into_boxed_path());
        remotes.init().unwrap();
        let origin = RemoteName::try_parse("origin".to_string()).unwrap();

        remotes.add(&origin, "../origin/.gitlet").unwrap();
        let err = remotes.add(&origin, "../elsewhere").unwrap_err();
        assert_eq!(
            err.downcast_ref::<GitletError>(),
            Some(&GitletError::RemoteAlreadyExists)
        );
        assert_eq!(
            remotes.get(&origin).unwrap(),
            Some(PathBuf::from(Remotes::normalize_path("../origin/.gitlet")))
        );

        remotes.remove(&origin).unwrap();
        assert_eq!(remotes.get(&origin).unwrap(), None);
        let err = remotes.remove(&origin).unwrap_err();
        assert_eq!(
            err.downcast_ref::<GitletError>(),
            Some(&GitletError::RemoteNotFound)
        );
    }
}
