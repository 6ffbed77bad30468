//! Three-way snapshot reconciliation
//!
//! Given the split-point snapshot and the two divergent head snapshots, the
//! engine classifies every file name appearing in any of the three and
//! produces the merged snapshot plus the set of conflicted names. A change
//! is detected by blob digest, so "modified" includes "removed": a file
//! edited on one side and deleted on the other is a conflict with an empty
//! section for the deleting side.
//!
//! Conflicts never abort the run; every file is classified and the full
//! conflict set is reported at the end. Preconditions (clean staging area,
//! no untracked files in the way) are the caller's responsibility.

use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};

pub const CONFLICT_HEADER: &str = "<<<<<<< HEAD\n";
pub const CONFLICT_SEPARATOR: &str = "=======\n";
pub const CONFLICT_FOOTER: &str = ">>>>>>>\n";

/// One file's fate in the merged snapshot. Names absent from the merged map
/// are removals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergedFile {
    /// Keep the current branch's entry; nothing to stage or write.
    Unchanged(ObjectId),
    /// Take the given branch's blob; stage it and write it out.
    Updated(ObjectId),
    /// Both sides changed the file in different ways; the payload is the
    /// marker-framed content to store, stage, and write out.
    Conflicted(Bytes),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// The complete merged snapshot, keyed by file name.
    pub merged: BTreeMap<String, MergedFile>,
    pub conflicts: BTreeSet<String>,
}

/// Reconcile the three snapshots into a merged one.
///
/// `load_blob` fetches a blob's raw content by digest; it is only consulted
/// for conflicted files, to build the marker-framed content.
pub fn reconcile<LoadBlobFn>(
    split: &BTreeMap<String, ObjectId>,
    current: &BTreeMap<String, ObjectId>,
    given: &BTreeMap<String, ObjectId>,
    load_blob: LoadBlobFn,
) -> anyhow::Result<Reconciliation>
where
    LoadBlobFn: Fn(&ObjectId) -> anyhow::Result<Bytes>,
{
    let mut merged = BTreeMap::new();
    let mut conflicts = BTreeSet::new();

    let names = split
        .keys()
        .chain(current.keys())
        .chain(given.keys())
        .collect::<BTreeSet<_>>();

    for name in names {
        let split_entry = split.get(name);
        let current_entry = current.get(name);
        let given_entry = given.get(name);

        let changed_in_current = current_entry != split_entry;
        let changed_in_given = given_entry != split_entry;

        match (changed_in_current, changed_in_given) {
            // the given side did not move; the current entry (or its
            // removal) stands
            (_, false) => {
                if let Some(oid) = current_entry {
                    merged.insert(name.clone(), MergedFile::Unchanged(oid.clone()));
                }
            }
            // only the given side moved; adopt its entry (or its removal)
            (false, true) => {
                if let Some(oid) = given_entry {
                    merged.insert(name.clone(), MergedFile::Updated(oid.clone()));
                }
            }
            (true, true) if current_entry == given_entry => {
                // both sides made the same change; removal on both sides
                // leaves the name out of the merged snapshot
                if let Some(oid) = current_entry {
                    merged.insert(name.clone(), MergedFile::Unchanged(oid.clone()));
                }
            }
            (true, true) => {
                let current_content = current_entry.map(&load_blob).transpose()?;
                let given_content = given_entry.map(&load_blob).transpose()?;

                merged.insert(
                    name.clone(),
                    MergedFile::Conflicted(conflict_content(current_content, given_content)),
                );
                conflicts.insert(name.clone());
            }
        }
    }

    Ok(Reconciliation { merged, conflicts })
}

/// Frame the two sides of a conflict with markers. Each present section is
/// forced to end with a newline; an absent or empty side contributes
/// nothing between its markers.
fn conflict_content(current: Option<Bytes>, given: Option<Bytes>) -> Bytes {
    let mut content = Vec::new();

    content.extend_from_slice(CONFLICT_HEADER.as_bytes());
    push_section(&mut content, current);
    content.extend_from_slice(CONFLICT_SEPARATOR.as_bytes());
    push_section(&mut content, given);
    content.extend_from_slice(CONFLICT_FOOTER.as_bytes());

    Bytes::from(content)
}

fn push_section(content: &mut Vec<u8>, section: Option<Bytes>) {
    if let Some(bytes) = section
        && !bytes.is_empty()
    {
        content.extend_from_slice(&bytes);
        if !bytes.ends_with(b"\n") {
            content.push(b'\n');
        }
    }
}
