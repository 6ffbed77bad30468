use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Show the history of the head commit, following first parents only
    /// (the second parent of a merge belongs to the merged-in branch).
    pub fn log(&self) -> anyhow::Result<()> {
        let mut current = Some(self.state().head_commit_id()?.clone());

        while let Some(commit_oid) = current {
            let commit = self.database().load_commit(&commit_oid)?;
            self.show_commit(&commit_oid, &commit)?;

            current = commit.parent().cloned();
        }

        Ok(())
    }

    /// Show every commit in the object store, in digest order.
    pub fn global_log(&self) -> anyhow::Result<()> {
        for (commit_oid, commit) in self.database().list_commits()? {
            self.show_commit(&commit_oid, &commit)?;
        }

        Ok(())
    }

    fn show_commit(&self, commit_oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(self.writer(), "===")?;
        writeln!(
            self.writer(),
            "commit {}",
            commit_oid.as_ref().yellow()
        )?;
        if commit.is_merge() {
            let short_parents = commit
                .parents()
                .iter()
                .map(|parent| parent.to_short_oid())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(self.writer(), "Merge: {}", short_parents)?;
        }
        writeln!(self.writer(), "Date: {}", commit.readable_timestamp())?;
        writeln!(self.writer(), "{}", commit.message())?;
        writeln!(self.writer())?;

        Ok(())
    }
}
