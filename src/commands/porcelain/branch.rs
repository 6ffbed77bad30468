use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;

impl Repository {
    /// Bind a new branch name to the current head commit.
    pub fn branch(&mut self, name: &str) -> anyhow::Result<()> {
        let name = BranchName::try_parse(name.to_string())?;
        let head_oid = self.state().head_commit_id()?.clone();

        self.state_mut().create_branch(name.into_inner(), head_oid)?;
        self.persist_state()
    }

    /// Delete a branch binding. The branch's commits stay in the store.
    pub fn rm_branch(&mut self, name: &str) -> anyhow::Result<()> {
        self.state_mut().delete_branch(name)?;
        self.persist_state()
    }
}
