//! Commit object
//!
//! Commits are the nodes of the history DAG. Each records a message, a
//! timestamp, the branch it was created on, its parent ids (none for the
//! root, one for a plain commit, two for a merge) and a full snapshot
//! mapping every tracked file name to its blob digest.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0branch <branch>
//! timestamp <unix-seconds> <offset>
//! parent <parent-id>
//! entry <blob-id> <file-name>
//!
//! <message>
//! ```
//!
//! Snapshot entries are written in file-name order, so the digest of the
//! serialized form is independent of insertion order.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::{format_timestamp, parse_timestamp};
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// Message of the commit every repository starts from.
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Slim projection of a commit for the split-point search: just the id,
/// the parent ids, and the timestamp used for tie-breaking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlimCommit {
    pub oid: ObjectId,
    pub parents: Vec<ObjectId>,
    pub timestamp: chrono::DateTime<chrono::FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    message: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
    branch: String,
    /// Empty for the root commit, one entry for a plain commit, two for a merge.
    parents: Vec<ObjectId>,
    snapshot: BTreeMap<String, ObjectId>,
}

impl Commit {
    pub fn new(
        message: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
        branch: String,
        parents: Vec<ObjectId>,
        snapshot: BTreeMap<String, ObjectId>,
    ) -> Self {
        Commit {
            message,
            timestamp,
            branch,
            parents,
            snapshot,
        }
    }

    /// The parentless commit created by `init`: fixed message, epoch
    /// timestamp, empty snapshot. Every repository shares its digest.
    pub fn root(branch: String) -> Self {
        Commit {
            message: ROOT_COMMIT_MESSAGE.to_string(),
            timestamp: chrono::DateTime::UNIX_EPOCH.fixed_offset(),
            branch,
            parents: Vec::new(),
            snapshot: BTreeMap::new(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First line of the message, for short-form display.
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }

    /// Human-readable timestamp for log output.
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn snapshot(&self) -> &BTreeMap<String, ObjectId> {
        &self.snapshot
    }

    pub fn tracks(&self, file_name: &str) -> bool {
        self.snapshot.contains_key(file_name)
    }

    pub fn slim(&self, oid: ObjectId) -> SlimCommit {
        SlimCommit {
            oid,
            parents: self.parents.clone(),
            timestamp: self.timestamp,
        }
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = vec![];

        object_content.push(format!("branch {}", self.branch));
        object_content.push(format!("timestamp {}", format_timestamp(&self.timestamp)));
        for parent in &self.parents {
            object_content.push(format!("parent {}", parent.as_ref()));
        }
        for (name, oid) in &self.snapshot {
            object_content.push(format!("entry {} {}", oid.as_ref(), name));
        }
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        let object_content = object_content.join("\n");

        let mut content_bytes = Vec::new();
        content_bytes.write_all(object_content.as_bytes())?;

        let mut commit_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), content_bytes.len());
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let content = String::from_utf8(content)?;
        let mut lines = content.lines();

        let branch_line = lines
            .next()
            .context("Invalid commit object: missing branch line")?;
        let branch = branch_line
            .strip_prefix("branch ")
            .context("Invalid commit object: invalid branch line")?
            .to_string();

        let timestamp_line = lines
            .next()
            .context("Invalid commit object: missing timestamp line")?;
        let timestamp = parse_timestamp(
            timestamp_line
                .strip_prefix("timestamp ")
                .context("Invalid commit object: invalid timestamp line")?,
        )?;

        let mut parents = Vec::new();
        let mut snapshot = BTreeMap::new();
        for line in lines.by_ref() {
            if line.is_empty() {
                break;
            }

            if let Some(parent_oid) = line.strip_prefix("parent ") {
                parents.push(ObjectId::try_parse(parent_oid.to_string())?);
            } else if let Some(entry) = line.strip_prefix("entry ") {
                let (oid, name) = entry
                    .split_once(' ')
                    .context("Invalid commit object: invalid entry line")?;
                snapshot.insert(name.to_string(), ObjectId::try_parse(oid.to_string())?);
            } else {
                anyhow::bail!("Invalid commit object: unexpected line {:?}", line);
            }
        }

        let message = lines.collect::<Vec<&str>>().join("\n");
        Ok(Self::new(message, timestamp, branch, parents, snapshot))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
