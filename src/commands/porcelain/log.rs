use crate::areas::repository::Repository;
use crate::artifacts::history::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// History of the checked-out branch, following first parents only
    pub fn log(&self) -> anyhow::Result<()> {
        let head_oid = self.refs().read_head()?;

        for entry in RevList::new(self.database(), head_oid) {
            let (commit_oid, commit) = entry?;
            self.display_commit(&commit_oid, &commit)?;
        }

        Ok(())
    }

    /// Every commit in the object store, newest first
    pub fn global_log(&self) -> anyhow::Result<()> {
        let mut commits = self
            .database()
            .list_commits()?
            .into_iter()
            .map(|oid| {
                let commit = self.database().load_commit(&oid)?;
                Ok((oid, commit))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        // ties are broken by id to keep the output stable
        commits.sort_by(|(a_oid, a), (b_oid, b)| {
            b.timestamp()
                .cmp(&a.timestamp())
                .then_with(|| a_oid.cmp(b_oid))
        });

        for (commit_oid, commit) in &commits {
            self.display_commit(commit_oid, commit)?;
        }

        Ok(())
    }

    pub fn display_commit(&self, commit_oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "commit {commit_oid}")?;
        if commit.is_merge() {
            let parents = commit
                .parents()
                .iter()
                .map(ObjectId::to_short_oid)
                .collect::<Vec<_>>();
            writeln!(writer, "Merge: {}", parents.join(" "))?;
        }
        writeln!(writer, "Date: {}", commit.readable_timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
