//! Split-point (nearest common ancestor) search
//!
//! Merging two branches needs a third commit to compare against: the split
//! point, the common ancestor nearest to both heads. The history is a DAG
//! (every commit has up to two parents), so a commit can be reachable over
//! several paths and only the shortest one counts.
//!
//! ## Algorithm
//!
//! One breadth-first traversal per head walks the parent-reachability
//! relation and records each reachable commit's minimum distance from that
//! head; the two distance maps are intersected and the commit minimizing
//! `dist_current + dist_given` wins. Ties are broken by earliest commit
//! timestamp, then by lowest digest, so the result is fully deterministic.
//!
//! Each call builds its distance maps from scratch and returns them as local
//! values; the finder keeps no state between calls.
//!
//! ## Fast-forward detection
//!
//! Callers compare the split point against the two heads: equal to the given
//! head means there is nothing to merge; equal to the current head means the
//! current branch can fast-forward instead of creating a merge commit.
//!
//! ## Debug Logging
//!
//! Build with the `debug_merge` feature to trace the traversal and the
//! candidate selection on stderr.

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashMap, VecDeque};

/// Macro for debug logging, enabled with the debug_merge feature flag
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            eprintln!($($arg)*);
        }
    };
}

/// Finds the split point between two commits.
///
/// The finder is generic over a loader function so it works against any
/// backing store (the object database in production, an in-memory graph in
/// tests). The loader must return a [`SlimCommit`] with an empty parent list
/// for root commits.
pub struct SplitFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> SplitFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Find the split point of `current` and `given`.
    ///
    /// Returns `None` when the two commits share no ancestor (disjoint
    /// roots). A commit is an ancestor of itself, so
    /// `find_split_point(x, x) == Some(x)` and the split point of a commit
    /// and one of its ancestors is that ancestor.
    pub fn find_split_point(
        &self,
        current: &ObjectId,
        given: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let current_distances = self.distances_from(current)?;
        let given_distances = self.distances_from(given)?;

        debug_log!(
            "split search: {} commits reachable from current, {} from given",
            current_distances.len(),
            given_distances.len()
        );

        let mut best: Option<(u64, chrono::DateTime<chrono::FixedOffset>, ObjectId)> = None;
        for (oid, current_distance) in &current_distances {
            let Some(given_distance) = given_distances.get(oid) else {
                continue;
            };

            let total = u64::from(*current_distance) + u64::from(*given_distance);
            let timestamp = (self.commit_loader)(oid)?.timestamp;
            debug_log!("  candidate {}: combined distance {}", oid, total);

            let candidate = (total, timestamp, oid.clone());
            if best.as_ref().is_none_or(|current_best| candidate < *current_best) {
                best = Some(candidate);
            }
        }

        debug_log!(
            "split result: {}",
            best.as_ref()
                .map(|(_, _, oid)| oid.to_string())
                .unwrap_or_else(|| "none".to_string())
        );

        Ok(best.map(|(_, _, oid)| oid))
    }

    /// Minimum distance (in parent edges) from `start` to every reachable
    /// commit, the start itself included at distance zero.
    ///
    /// Breadth-first with memoized distances: a commit reachable over two
    /// paths keeps the shorter one and is expanded once, which keeps the
    /// walk linear in the number of reachable commits.
    fn distances_from(&self, start: &ObjectId) -> anyhow::Result<HashMap<ObjectId, u32>> {
        let mut distances = HashMap::from([(start.clone(), 0u32)]);
        let mut queue = VecDeque::from([start.clone()]);

        while let Some(oid) = queue.pop_front() {
            let commit = (self.commit_loader)(&oid)?;
            let next_distance = distances[&oid] + 1;

            for parent in commit.parents {
                match distances.get(&parent) {
                    Some(&known) if known <= next_distance => {}
                    _ => {
                        distances.insert(parent.clone(), next_distance);
                        queue.push_back(parent);
                    }
                }
            }
        }

        Ok(distances)
    }
}
