use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::collections::BTreeMap;
use std::io::Write;

impl Repository {
    /// Show the branch table, the pending changes, and the working tree
    /// state: files changed or deleted without being staged, and files the
    /// repository knows nothing about.
    pub fn status(&self) -> anyhow::Result<()> {
        let head_snapshot = self.head_snapshot()?;
        let state = self.state();

        writeln!(self.writer(), "=== Branches ===")?;
        for branch in state.branches().keys() {
            if branch == state.head_branch() {
                writeln!(self.writer(), "*{}", branch.as_str().green())?;
            } else {
                writeln!(self.writer(), "{}", branch)?;
            }
        }

        writeln!(self.writer(), "\n=== Staged Files ===")?;
        for file_name in state.staging().keys() {
            writeln!(self.writer(), "{}", file_name)?;
        }

        writeln!(self.writer(), "\n=== Removed Files ===")?;
        for file_name in state.removed() {
            writeln!(self.writer(), "{}", file_name)?;
        }

        // expected working content: staged entries shadow the head snapshot
        let mut expected = head_snapshot;
        for (file_name, blob_oid) in state.staging() {
            expected.insert(file_name.clone(), blob_oid.clone());
        }

        writeln!(self.writer(), "\n=== Modifications Not Staged For Commit ===")?;
        for (file_name, blob_oid) in &expected {
            match self.working_digest(file_name)? {
                None if !state.removed().contains(file_name) => {
                    writeln!(self.writer(), "{} (deleted)", file_name)?;
                }
                Some(working_oid) if &working_oid != blob_oid => {
                    writeln!(self.writer(), "{} (modified)", file_name)?;
                }
                _ => {}
            }
        }

        writeln!(self.writer(), "\n=== Untracked Files ===")?;
        for file_name in self.untracked_files(&expected)? {
            writeln!(self.writer(), "{}", file_name)?;
        }
        writeln!(self.writer())?;

        Ok(())
    }

    /// Digest the working copy of a file would have if staged now.
    fn working_digest(&self, file_name: &str) -> anyhow::Result<Option<ObjectId>> {
        if !self.workspace().file_exists(file_name) {
            return Ok(None);
        }

        let content = self.workspace().read_file(file_name)?;
        Ok(Some(Blob::new(file_name.to_string(), content).object_id()?))
    }

    fn untracked_files(
        &self,
        expected: &BTreeMap<String, ObjectId>,
    ) -> anyhow::Result<Vec<String>> {
        Ok(self
            .workspace()
            .list_files()?
            .into_iter()
            .filter(|file_name| !expected.contains_key(file_name))
            .collect())
    }
}
