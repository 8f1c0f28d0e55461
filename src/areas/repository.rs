use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::remotes::{RemoteRepository, Remotes};
use crate::areas::stage::Stage;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::branch_name::RemoteName;
use crate::artifacts::objects::MIN_ABBREVIATION_LENGTH;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Name of the repository directory under the working directory root
pub const GITLET_DIR: &str = ".gitlet";

/// Handle on one repository, built once per invocation and passed to every
/// command
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    stage: Arc<Mutex<Stage>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
    remotes: Remotes,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path).canonicalize()?;
        let gitlet_path = path.join(GITLET_DIR);

        let stage = Stage::new(gitlet_path.join("stage").into_boxed_path());
        let database = Database::new(gitlet_path.clone().into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(gitlet_path.clone().into_boxed_path());
        let remotes = Remotes::new(gitlet_path.join("remotes").into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            stage: Arc::new(Mutex::new(stage)),
            database,
            workspace,
            refs,
            remotes,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn gitlet_path(&self) -> PathBuf {
        self.path.join(GITLET_DIR)
    }

    pub fn is_initialized(&self) -> bool {
        self.gitlet_path().is_dir()
    }

    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if !self.is_initialized() {
            return Err(GitletError::NotInitialized.into());
        }

        Ok(())
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn stage(&self) -> Arc<Mutex<Stage>> {
        self.stage.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn remotes(&self) -> &Remotes {
        &self.remotes
    }

    /// Id and content of the commit HEAD resolves to
    pub fn head_commit(&self) -> anyhow::Result<(ObjectId, Commit)> {
        let head_oid = self.refs.read_head()?;
        let head_commit = self.database.load_commit(&head_oid)?;

        Ok((head_oid, head_commit))
    }

    /// Commit named by a full id or an abbreviation of at least six hex digits
    pub fn resolve_commit(&self, prefix: &str) -> anyhow::Result<(ObjectId, Commit)> {
        if prefix.len() < MIN_ABBREVIATION_LENGTH || !ObjectId::is_valid_prefix(prefix) {
            return Err(GitletError::CommitNotFound.into());
        }

        let mut candidates = self.database.find_commits_by_prefix(prefix)?;
        let commit_oid = match candidates.len() {
            0 => return Err(GitletError::CommitNotFound.into()),
            1 => candidates.remove(0),
            _ => return Err(GitletError::AmbiguousCommitId.into()),
        };
        let commit = self.database.load_commit(&commit_oid)?;

        Ok((commit_oid, commit))
    }

    /// Open a registered remote
    ///
    /// Relative remote paths are resolved against the repository root.
    pub fn open_remote(&self, name: &str) -> anyhow::Result<RemoteRepository> {
        let name = RemoteName::try_parse(name.to_string()).map_err(|_| GitletError::RemoteNotFound)?;
        let remote_path = self
            .remotes
            .get(&name)?
            .ok_or(GitletError::RemoteNotFound)?;

        RemoteRepository::open(&self.path.join(remote_path))
    }
}

#[cfg(test)]
mod tests {
    use super::Repository;
    use crate::errors::GitletError;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;

    fn gitlet_error(err: anyhow::Error) -> Option<GitletError> {
        err.downcast_ref::<GitletError>().cloned()
    }

    #[tokio::test]
    async fn abbreviated_commit_ids_must_be_unique() {
        let dir = TempDir::new().unwrap();
        let repository =
            Repository::new(dir.path().to_str().unwrap(), Box::new(std::io::sink())).unwrap();
        repository.init().await.unwrap();

        let fan_out = dir.path().join(".gitlet/commits/ab");
        std::fs::create_dir_all(&fan_out).unwrap();
        for rest in [
            "cdef0123456789abcdef0123456789abcdef01",
            "cdef1123456789abcdef0123456789abcdef01",
        ] {
            std::fs::write(fan_out.join(rest), b"").unwrap();
        }

        let err = repository.resolve_commit("abcdef").unwrap_err();
        assert_eq!(gitlet_error(err), Some(GitletError::AmbiguousCommitId));

        let err = repository.resolve_commit("abcdef2").unwrap_err();
        assert_eq!(gitlet_error(err), Some(GitletError::CommitNotFound));

        let err = repository.resolve_commit("abcde").unwrap_err();
        assert_eq!(gitlet_error(err), Some(GitletError::CommitNotFound));
    }

    #[tokio::test]
    async fn the_initial_commit_resolves_by_prefix() {
        let dir = TempDir::new().unwrap();
        let repository =
            Repository::new(dir.path().to_str().unwrap(), Box::new(std::io::sink())).unwrap();
        repository.init().await.unwrap();

        let (head_oid, head_commit) = repository.head_commit().unwrap();
        let (resolved_oid, resolved_commit) =
            repository.resolve_commit(&head_oid.as_ref()[..6]).unwrap();

        assert_eq!(resolved_oid, head_oid);
        assert_eq!(resolved_commit.message(), head_commit.message());
        assert_eq!(resolved_commit.message(), "initial commit");
    }
}
