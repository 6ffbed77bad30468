use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::JotError;
use std::io::Write;

impl Repository {
    /// Record a plain commit from the staged changes.
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        let commit_oid = self.write_commit(message, Vec::new())?;
        let state = self.state();

        writeln!(
            self.writer(),
            "[{} {}] {}",
            state.head_branch(),
            commit_oid.to_short_oid(),
            message.trim().lines().next().unwrap_or("")
        )?;

        Ok(())
    }

    /// Shared commit path for plain and merge commits: parents are the head
    /// commit plus `extra_parents` (exactly one for a merge).
    pub(crate) fn write_commit(
        &mut self,
        message: &str,
        extra_parents: Vec<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        if message.trim().is_empty() {
            return Err(JotError::EmptyMessage.into());
        }
        if !self.state().has_pending_changes() {
            return Err(JotError::NothingToCommit.into());
        }

        let head_commit = self.head_commit()?;
        let snapshot = self.state().next_snapshot(head_commit.snapshot());

        let mut parents = vec![self.state().head_commit_id()?.clone()];
        parents.extend(extra_parents);

        let commit = Commit::new(
            message.trim().to_string(),
            commit_timestamp(),
            self.state().head_branch().to_string(),
            parents,
            snapshot,
        );
        let commit_oid = commit.object_id()?;
        self.database().store(commit)?;

        {
            let mut state = self.state_mut();
            state.advance_head(commit_oid.clone());
            state.clear_pending();
        }
        self.persist_state()?;

        Ok(commit_oid)
    }
}

/// Commit timestamp, honoring the `JOT_COMMIT_DATE` override so tests and
/// scripts can produce deterministic digests. Falls back to the current
/// local time when the variable is unset or unparsable.
fn commit_timestamp() -> chrono::DateTime<chrono::FixedOffset> {
    std::env::var("JOT_COMMIT_DATE")
        .ok()
        .and_then(|date_str| {
            chrono::DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| chrono::DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .ok()
        })
        .unwrap_or_else(|| chrono::Local::now().fixed_offset())
}
