use crate::areas::repository::Repository;
use crate::errors::JotError;
use std::io::Write;

impl Repository {
    /// Print the ids of every commit whose message matches exactly.
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        let mut found = false;

        for (commit_oid, commit) in self.database().list_commits()? {
            if commit.message() == message {
                writeln!(self.writer(), "{}", commit_oid)?;
                found = true;
            }
        }

        if !found {
            return Err(JotError::NoMatchingCommit(message.to_string()).into());
        }

        Ok(())
    }
}
