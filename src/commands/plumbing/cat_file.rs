use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::GitletError;

impl Repository {
    /// Print the describable form of a stored object
    ///
    /// Commits may be abbreviated; blobs need their full id.
    pub fn cat_file(&self, object_id: &str) -> anyhow::Result<()> {
        match self.resolve_commit(object_id) {
            Ok((_, commit)) => {
                writeln!(self.writer(), "{}", commit.display())?;
                return Ok(());
            }
            Err(err) if err.downcast_ref::<GitletError>() != Some(&GitletError::CommitNotFound) => {
                return Err(err);
            }
            Err(_) => {}
        }

        let blob_oid =
            ObjectId::try_parse(object_id.to_string()).map_err(|_| GitletError::ObjectNotFound)?;
        if !self.database().contains(ObjectType::Blob, &blob_oid) {
            return Err(GitletError::ObjectNotFound.into());
        }

        let blob = self.database().load_blob(&blob_oid)?;
        write!(self.writer(), "{}", blob.display())?;

        Ok(())
    }
}
