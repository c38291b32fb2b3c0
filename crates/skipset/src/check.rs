//! Structural self-check.

use std::collections::HashSet;

use crate::node::{NodeId, Payload};
use crate::{LevelGenerator, SkipSet, SkipSetError};

fn corrupted(level: usize, reason: &'static str) -> SkipSetError {
    SkipSetError::Corrupted { level, reason }
}

impl<T: Ord, L: LevelGenerator> SkipSet<T, L> {
    /// Verify every structural invariant of the skip list.
    ///
    /// Checks, level 0 first: strictly increasing elements on every level,
    /// towers linked downwards into the level below (so each level is a
    /// subset of the one beneath it), a head chain as long as
    /// `level_count()`, no empty level above level 0, a level-0 length equal
    /// to `len()`, and no allocated node outside the lists.
    ///
    /// Meant for tests and fuzzing; it walks the whole structure.
    pub fn check_structure(&self) -> Result<(), SkipSetError> {
        let mut heads = Vec::with_capacity(self.levels);
        let mut cursor = Some(self.head);
        while let Some(id) = cursor {
            if !matches!(self.nodes[id].payload, Payload::Head) {
                let level = self.levels.saturating_sub(heads.len() + 1);
                return Err(corrupted(level, "head chain holds an element"));
            }
            heads.push(id);
            cursor = self.nodes[id].down;
        }
        heads.reverse();

        if heads.len() != self.levels {
            return Err(corrupted(heads.len(), "head chain length differs from level count"));
        }
        if heads.first() != Some(&self.bottom) {
            return Err(corrupted(0, "head chain does not end at the level-0 head"));
        }
        if self.levels > self.max_level() {
            return Err(corrupted(self.levels - 1, "level count exceeds the cap"));
        }

        let mut allocated = heads.len();
        let mut below: HashSet<NodeId> = HashSet::new();
        for (level, &head) in heads.iter().enumerate() {
            let mut members = HashSet::new();
            let mut previous: Option<&T> = None;
            let mut cursor = self.nodes[head].next;
            while let Some(id) = cursor {
                let node = &self.nodes[id];
                match (&node.payload, level) {
                    (Payload::Element(_), 0) => {
                        if node.down.is_some() {
                            return Err(corrupted(level, "level-0 node links downwards"));
                        }
                    }
                    (Payload::Index(base), _) if level > 0 => {
                        let Some(down) = node.down.filter(|down| below.contains(down)) else {
                            return Err(corrupted(level, "tower is not linked into the level below"));
                        };
                        if self.nodes.base(down) != Some(*base) {
                            return Err(corrupted(level, "tower links to a different element"));
                        }
                    }
                    _ => return Err(corrupted(level, "node kind does not match its level")),
                }

                let value = self.nodes.value(id);
                if value.is_none() {
                    return Err(corrupted(level, "express node refers to a missing element"));
                }
                if previous.is_some() && previous >= value {
                    return Err(corrupted(level, "elements are not strictly increasing"));
                }
                previous = value;
                members.insert(id);
                cursor = node.next;
            }

            if level == 0 && members.len() != self.len {
                return Err(corrupted(0, "level 0 length differs from len"));
            }
            if level > 0 && members.is_empty() {
                return Err(corrupted(level, "empty level above level 0"));
            }
            allocated += members.len();
            below = members;
        }

        if allocated != self.nodes.len() {
            return Err(corrupted(0, "allocated nodes are unreachable"));
        }
        Ok(())
    }
}
