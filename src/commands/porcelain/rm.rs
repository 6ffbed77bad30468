use crate::areas::repository::Repository;
use crate::errors::JotError;

impl Repository {
    /// Unstage a file, and mark it for removal when the head commit tracks
    /// it (deleting it from the working tree). A file that is neither
    /// staged nor tracked cannot be removed.
    pub fn rm(&mut self, file_name: &str) -> anyhow::Result<()> {
        let tracked = self.head_commit()?.tracks(file_name);
        let staged = self.state_mut().unstage(file_name);

        if tracked {
            self.state_mut().mark_removed(file_name.to_string());
            self.workspace().delete_file(file_name)?;
        } else if !staged {
            return Err(JotError::NothingToRemove(file_name.to_string()).into());
        }

        self.persist_state()
    }
}
