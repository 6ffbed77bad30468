//! Object type tags
//!
//! Every stored object starts with a `<type> <size>\0` header; the tag tells
//! the database how to parse the body.

use anyhow::Context;
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Commit => "commit",
        }
    }

    pub fn try_parse(value: &str) -> anyhow::Result<Self> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "commit" => Ok(ObjectType::Commit),
            _ => Err(anyhow::anyhow!("Unknown object type: {}", value)),
        }
    }

    /// Consume the `<type> <size>\0` header from a reader and return the tag.
    pub fn parse_object_type(reader: &mut impl BufRead) -> anyhow::Result<Self> {
        let mut header = Vec::new();
        reader
            .read_until(0, &mut header)
            .context("Unable to read object header")?;

        let header = std::str::from_utf8(&header)
            .context("Invalid object header: not UTF-8")?
            .trim_end_matches('\0');
        let (object_type, _size) = header
            .split_once(' ')
            .context("Invalid object header: missing size")?;

        Self::try_parse(object_type)
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
