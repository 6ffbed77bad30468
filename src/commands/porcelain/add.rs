use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;

impl Repository {
    /// Stage one file for the next commit.
    ///
    /// Staging cancels a pending removal of the same name. When the head
    /// commit already tracks a blob with the identical digest, staging is a
    /// no-op and any previously staged, now redundant entry is dropped.
    pub fn add(&mut self, file_name: &str) -> anyhow::Result<()> {
        let content = self.workspace().read_file(file_name)?;
        let blob = Blob::new(file_name.to_string(), content);
        let blob_oid = blob.object_id()?;

        let head_snapshot = self.head_snapshot()?;
        self.state_mut().cancel_removal(file_name);

        if head_snapshot.values().any(|oid| oid == &blob_oid) {
            self.state_mut().unstage(file_name);
        } else {
            self.database().store(blob)?;
            self.state_mut()
                .stage_entry(file_name.to_string(), blob_oid);
        }

        self.persist_state()
    }
}
