//! Object store
//!
//! Append-only, content-addressed storage for blobs and commits. Each object is
//! kept zlib-compressed under `<kind>/<xx>/<rest-of-id>`, where the id is the
//! SHA-1 of the uncompressed serialized form.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Database {
    /// The `.gitlet` directory holding the `blobs/` and `commits/` stores
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    /// Create the per-kind object directories
    pub fn init(&self) -> anyhow::Result<()> {
        for object_type in [ObjectType::Blob, ObjectType::Commit] {
            let dir = self.path.join(object_type.dir_name());
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Unable to create object directory {}", dir.display()))?;
        }

        Ok(())
    }

    /// Persist an object and return its id
    ///
    /// Storing an object that already exists is a no-op.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object.object_path()?);

        if !object_path.exists() {
            let object_content = Self::compress(object.serialize()?)?;
            self.write_object(&object_path, &object_content)?;

            log::debug!("stored {} {}", object.object_type(), object_id);
        }

        Ok(object_id)
    }

    pub fn contains(&self, object_type: ObjectType, object_id: &ObjectId) -> bool {
        self.object_file(object_type, object_id).is_file()
    }

    /// Read the uncompressed serialized form of an object
    pub fn load(&self, object_type: ObjectType, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.object_file(object_type, object_id);

        if !object_path.is_file() {
            anyhow::bail!("{object_type} {object_id} not found in the object store");
        }

        self.read_object(&object_path)
    }

    pub fn load_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        Blob::deserialize(self.load(ObjectType::Blob, object_id)?)
    }

    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        Commit::deserialize(self.load(ObjectType::Commit, object_id)?)
            .with_context(|| format!("Unable to parse commit {object_id}"))
    }

    /// Copy an object verbatim from another store
    ///
    /// The compressed bytes are transferred as they are, so the id is preserved.
    pub fn copy_from(
        &self,
        source: &Database,
        object_type: ObjectType,
        object_id: &ObjectId,
    ) -> anyhow::Result<()> {
        if self.contains(object_type, object_id) {
            return Ok(());
        }

        let source_path = source.object_file(object_type, object_id);
        let object_content = std::fs::read(&source_path).with_context(|| {
            format!("Unable to read object file {}", source_path.display())
        })?;
        self.write_object(&self.object_file(object_type, object_id), &object_content)?;

        log::debug!("copied {object_type} {object_id}");
        Ok(())
    }

    /// Find all commits whose id starts with the given prefix
    ///
    /// Only the fan-out directory named by the first two characters is scanned.
    pub fn find_commits_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        if !ObjectId::is_valid_prefix(&prefix) || prefix.len() < 2 {
            return Ok(Vec::new());
        }

        let (dir_name, file_prefix) = prefix.split_at(2);
        let dir_path = self.path.join(ObjectType::Commit.dir_name()).join(dir_name);

        if !dir_path.is_dir() {
            return Ok(Vec::new());
        }

        let mut matches = Vec::new();
        for entry in std::fs::read_dir(&dir_path)? {
            let file_name = entry?.file_name();
            let file_name = file_name.to_string_lossy();

            if file_name.starts_with(file_prefix)
                && let Ok(oid) = ObjectId::try_parse(format!("{dir_name}{file_name}"))
            {
                matches.push(oid);
            }
        }

        Ok(matches)
    }

    /// Every commit in the store
    pub fn list_commits(&self) -> anyhow::Result<Vec<ObjectId>> {
        let commits_path = self.path.join(ObjectType::Commit.dir_name());

        let mut commits = Vec::new();
        for entry in WalkDir::new(&commits_path)
            .min_depth(2)
            .max_depth(2)
            .sort_by_file_name()
        {
            let entry = entry.with_context(|| {
                format!("Unable to list commits in {}", commits_path.display())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let dir_name = entry
                .path()
                .parent()
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default();
            let candidate = format!("{dir_name}{}", entry.file_name().to_string_lossy());

            // temporary files left behind by an interrupted write are skipped
            if candidate.len() == OBJECT_ID_LENGTH
                && let Ok(oid) = ObjectId::try_parse(candidate)
            {
                commits.push(oid);
            }
        }

        Ok(commits)
    }

    fn object_file(&self, object_type: ObjectType, object_id: &ObjectId) -> PathBuf {
        self.path
            .join(object_type.dir_name())
            .join(object_id.to_path())
    }

    fn read_object(&self, object_path: &Path) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: &Path, object_content: &[u8]) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        std::fs::create_dir_all(object_dir).context(format!(
            "Unable to create object directory {}",
            object_dir.display()
        ))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;
        file.sync_all()?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Vec<u8>> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}

#[cfg(test)]
mod tests {
    use super::Database;
    use crate::artifacts::objects::blob::Blob;
    use crate::artifacts::objects::commit::Commit;
    use crate::artifacts::objects::object::Object;
    use crate::artifacts::objects::object_type::ObjectType;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;

    fn database(dir: &TempDir) -> Database {
        let database = Database::new(dir.path().join(".gitlet").into_boxed_path());
        database.init().unwrap();
        database
    }

    #[test]
    fn stored_objects_load_back() {
        let dir = TempDir::new().unwrap();
        let database = database(&dir);

        let blob = Blob::from(&b"some content\n"[..]);
        let blob_oid = database.store(&blob).unwrap();
        let commit_oid = database.store(&Commit::initial()).unwrap();

        assert_eq!(database.load_blob(&blob_oid).unwrap(), blob);
        assert_eq!(database.load_commit(&commit_oid).unwrap(), Commit::initial());
        assert!(database.contains(ObjectType::Blob, &blob_oid));
        assert!(!database.contains(ObjectType::Commit, &blob_oid));
    }

    #[test]
    fn storing_twice_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let database = database(&dir);

        let blob = Blob::from(&b"twice"[..]);
        let first = database.store(&blob).unwrap();
        let second = database.store(&blob).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            std::fs::read_dir(dir.path().join(".gitlet/blobs").join(&first.as_ref()[..2]))
                .unwrap()
                .count(),
            1
        );
    }

    #[test]
    fn missing_objects_are_reported() {
        let dir = TempDir::new().unwrap();
        let database = database(&dir);

        let oid = Blob::from(&b"never stored"[..]).object_id().unwrap();
        assert!(database.load_blob(&oid).is_err());
    }

    #[test]
    fn commit_prefixes_resolve_only_commits() {
        let dir = TempDir::new().unwrap();
        let database = database(&dir);

        let commit_oid = database.store(&Commit::initial()).unwrap();
        database.store(&Blob::from(&b"blob"[..])).unwrap();

        assert_eq!(
            database
                .find_commits_by_prefix(&commit_oid.as_ref()[..6])
                .unwrap(),
            vec![commit_oid.clone()]
        );
        assert_eq!(database.list_commits().unwrap(), vec![commit_oid]);
        assert!(database.find_commits_by_prefix("zz").unwrap().is_empty());
    }

    #[test]
    fn copy_preserves_object_ids() {
        let source_dir = TempDir::new().unwrap();
        let target_dir = TempDir::new().unwrap();
        let source = database(&source_dir);
        let target = database(&target_dir);

        let blob = Blob::from(&b"shared"[..]);
        let oid = source.store(&blob).unwrap();
        target.copy_from(&source, ObjectType::Blob, &oid).unwrap();

        assert_eq!(target.load_blob(&oid).unwrap(), blob);
    }
}
