use crate::areas::database::Database;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use derive_new::new;
use std::collections::HashSet;

/// Copies the history behind a commit into another object store
#[derive(new)]
pub struct Transfer<'d> {
    source: &'d Database,
    destination: &'d Database,
}

impl Transfer<'_> {
    /// Copy every commit reachable from `tip`, with its blobs, that the
    /// destination lacks
    ///
    /// The walk stops descending at commits the destination already has: their
    /// history is present by construction. Parents are copied before their
    /// children, so an interrupted transfer never leaves a commit whose
    /// ancestry is missing.
    ///
    /// # Returns
    ///
    /// The number of commits copied
    pub fn copy_history(&self, tip: &ObjectId) -> anyhow::Result<usize> {
        let mut visited = HashSet::new();
        let mut stack = vec![(tip.clone(), false)];
        let mut copied = 0;

        while let Some((oid, expanded)) = stack.pop() {
            if expanded {
                self.copy_commit(&oid)?;
                copied += 1;
                continue;
            }

            if visited.contains(&oid) || self.destination.contains(ObjectType::Commit, &oid) {
                continue;
            }
            visited.insert(oid.clone());

            let commit = self.source.load_commit(&oid)?;
            stack.push((oid, true));
            for parent in commit.parents() {
                if !visited.contains(parent) {
                    stack.push((parent.clone(), false));
                }
            }
        }

        log::info!("copied {copied} commits up to {}", tip.to_short_oid());
        Ok(copied)
    }

    fn copy_commit(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let commit = self.source.load_commit(oid)?;

        for blob_oid in commit.tracked().values() {
            self.destination
                .copy_from(self.source, ObjectType::Blob, blob_oid)?;
        }

        self.destination
            .copy_from(self.source, ObjectType::Commit, oid)
    }
}
