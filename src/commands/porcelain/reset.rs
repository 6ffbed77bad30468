use crate::areas::repository::Repository;

impl Repository {
    /// Move the head branch pointer to an earlier (or any) commit and
    /// replace the working tree with that commit's snapshot. History is
    /// untouched; staged and pending removals are discarded.
    pub fn reset(&mut self, commit_ref: &str) -> anyhow::Result<()> {
        let target_oid = self.database().resolve_commit_prefix(commit_ref)?;
        let target_commit = self.database().load_commit(&target_oid)?;

        let head_snapshot = self.head_snapshot()?;
        self.workspace()
            .check_for_untracked(&head_snapshot, self.state().staging())?;

        self.workspace()
            .replace_with_snapshot(target_commit.snapshot(), |oid| self.blob_content(oid))?;

        {
            let mut state = self.state_mut();
            state.advance_head(target_oid);
            state.clear_pending();
        }
        self.persist_state()
    }
}
