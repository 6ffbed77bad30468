//! Blob object
//!
//! A blob is one file's bytes captured at the moment it was staged, together
//! with the file name and a capture timestamp.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! blob <size>\0name <file-name>
//! timestamp <unix-seconds> <offset>
//!
//! <content bytes>
//! ```
//!
//! The digest covers the file name followed by the raw content; the capture
//! timestamp is not part of blob identity. Identical content staged under two
//! names is stored as two distinct objects.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::{format_timestamp, parse_timestamp};
use anyhow::Context;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    name: String,
    content: Bytes,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Blob {
    /// Capture a file's bytes now.
    pub fn new(name: String, content: Bytes) -> Self {
        Blob {
            name,
            content,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    pub fn new_with_timestamp(
        name: String,
        content: Bytes,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> Self {
        Blob {
            name,
            content,
            timestamp,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut content_bytes = Vec::new();
        writeln!(content_bytes, "name {}", self.name)?;
        writeln!(content_bytes, "timestamp {}", format_timestamp(&self.timestamp))?;
        writeln!(content_bytes)?;
        content_bytes.write_all(&self.content)?;

        let mut blob_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), content_bytes.len());
        blob_bytes.write_all(header.as_bytes())?;
        blob_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(blob_bytes))
    }
}

impl Unpackable for Blob {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let mut name_line = String::new();
        reader
            .read_line(&mut name_line)
            .context("Invalid blob object: missing name line")?;
        let name = name_line
            .trim_end_matches('\n')
            .strip_prefix("name ")
            .context("Invalid blob object: invalid name line")?
            .to_string();

        let mut timestamp_line = String::new();
        reader
            .read_line(&mut timestamp_line)
            .context("Invalid blob object: missing timestamp line")?;
        let timestamp = parse_timestamp(
            timestamp_line
                .trim_end_matches('\n')
                .strip_prefix("timestamp ")
                .context("Invalid blob object: invalid timestamp line")?,
        )?;

        // skip the blank separator line
        let mut blank = String::new();
        reader.read_line(&mut blank)?;

        let mut content = Vec::new();
        reader
            .read_to_end(&mut content)
            .context("Invalid blob object: unreadable content")?;

        Ok(Self::new_with_timestamp(
            name,
            Bytes::from(content),
            timestamp,
        ))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    // identity = SHA-1(name ‖ content); the timestamp stays out of the digest
    fn object_id(&self) -> anyhow::Result<ObjectId> {
        let mut hasher = Sha1::new();
        hasher.update(self.name.as_bytes());
        hasher.update(&self.content);

        let oid = hasher.finalize();
        ObjectId::try_parse(format!("{oid:x}"))
    }
}
