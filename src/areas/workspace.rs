//! Working directory file system operations
//!
//! The working tree model is flat: tracked files are the plain files at the
//! top level of the repository directory, with `.jot` ignored. The
//! synchronizer copies bytes in and out and enforces the untracked-file
//! safety check before any operation that replaces the working tree.

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::JotError;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::path::Path;
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [".jot", ".", ".."];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of the plain files at the top level, in name order.
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = WalkDir::new(&self.path)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                if IGNORED_PATHS.contains(&name.as_str()) {
                    None
                } else {
                    Some(name)
                }
            })
            .collect::<Vec<_>>();

        files.sort();
        Ok(files)
    }

    pub fn file_exists(&self, file_name: &str) -> bool {
        self.path.join(file_name).is_file()
    }

    pub fn read_file(&self, file_name: &str) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(file_name);
        if !file_path.is_file() {
            return Err(JotError::FileNotFound(file_name.to_string()).into());
        }

        let content = std::fs::read(&file_path)
            .with_context(|| format!("Unable to read file {}", file_path.display()))?;

        Ok(content.into())
    }

    pub fn write_file(&self, file_name: &str, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.path.join(file_name);

        std::fs::write(&file_path, content)
            .with_context(|| format!("Unable to write file {}", file_path.display()))
    }

    /// Delete a working file; a missing file is not an error.
    pub fn delete_file(&self, file_name: &str) -> anyhow::Result<()> {
        let file_path = self.path.join(file_name);
        if !file_path.exists() {
            return Ok(());
        }

        std::fs::remove_file(&file_path)
            .with_context(|| format!("Unable to delete file {}", file_path.display()))
    }

    /// Fail when a working file is neither tracked by the head snapshot nor
    /// staged: replacing the tree would silently overwrite it.
    pub fn check_for_untracked(
        &self,
        head_snapshot: &BTreeMap<String, ObjectId>,
        staging: &BTreeMap<String, ObjectId>,
    ) -> anyhow::Result<()> {
        for file_name in self.list_files()? {
            if !head_snapshot.contains_key(&file_name) && !staging.contains_key(&file_name) {
                return Err(JotError::UntrackedFileConflict(file_name).into());
            }
        }

        Ok(())
    }

    /// Replace the working tree with a snapshot: every listed working file
    /// is removed, then every snapshot entry is written out. Callers run
    /// [`Workspace::check_for_untracked`] first.
    pub fn replace_with_snapshot<LoadBlobFn>(
        &self,
        snapshot: &BTreeMap<String, ObjectId>,
        load_blob: LoadBlobFn,
    ) -> anyhow::Result<()>
    where
        LoadBlobFn: Fn(&ObjectId) -> anyhow::Result<Bytes>,
    {
        for file_name in self.list_files()? {
            self.delete_file(&file_name)?;
        }

        for (file_name, blob_id) in snapshot {
            self.write_file(file_name, &load_blob(blob_id)?)?;
        }

        Ok(())
    }
}
