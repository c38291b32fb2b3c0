//! Reference model: replays operations on a [`SkipSet`] and a
//! [`BTreeSet`] side by side and compares every observable result.

use std::collections::BTreeSet;
use std::ops::Bound;

use skipset::{LevelGenerator, Position, SkipSet};

use crate::assert_sound;

/// One step of a generated workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Insert(i32),
    Erase(i32),
    /// `erase_at(begin())`
    EraseFirst,
    Find(i32),
    LowerBound(i32),
    UpperBound(i32),
    Count(i32),
    Clear,
    /// Replace the set with a clone of itself.
    Reclone,
    /// Save the position of a value and re-check it after every later op
    /// until the value is erased.
    Pin(i32),
}

/// A skip set paired with the ordered set it must agree with.
#[derive(Debug)]
pub struct Model<L: LevelGenerator> {
    pub set: SkipSet<i32, L>,
    pub reference: BTreeSet<i32>,
    pinned: Option<(Position, i32)>,
}

fn first_above(reference: &BTreeSet<i32>, value: i32) -> Option<i32> {
    reference
        .range((Bound::Excluded(value), Bound::Unbounded))
        .next()
        .copied()
}

fn expect_eq<V>(op: Op, actual: V, expected: V) -> Result<(), String>
where
    V: PartialEq + std::fmt::Debug,
{
    if actual == expected {
        Ok(())
    } else {
        Err(format!("{op:?}: expected {expected:?}, got {actual:?}"))
    }
}

impl<L: LevelGenerator + Clone> Model<L> {
    pub fn new(set: SkipSet<i32, L>) -> Self {
        let reference = set.iter().copied().collect();
        Self {
            set,
            reference,
            pinned: None,
        }
    }

    /// Value whose position is currently saved.
    pub fn pinned(&self) -> Option<i32> {
        self.pinned.map(|(_, value)| value)
    }

    fn unpin(&mut self, erased: Option<i32>) {
        if erased.is_some() && self.pinned() == erased {
            self.pinned = None;
        }
    }

    /// Apply `op` to both sides and compare what each reports.
    pub fn apply(&mut self, op: Op) -> Result<(), String> {
        match op {
            Op::Insert(value) => {
                let position = self.set.insert(value);
                self.reference.insert(value);
                expect_eq(op, self.set.get(position).copied(), Some(value))
            }
            Op::Erase(value) => {
                let after = self.set.erase(&value);
                self.reference.remove(&value);
                self.unpin(Some(value));
                expect_eq(
                    op,
                    self.set.get(after).copied(),
                    first_above(&self.reference, value),
                )
            }
            Op::EraseFirst => {
                let after = self.set.erase_at(self.set.begin());
                let erased = self.reference.pop_first();
                self.unpin(erased);
                expect_eq(
                    op,
                    self.set.get(after).copied(),
                    self.reference.first().copied(),
                )
            }
            Op::Find(value) => expect_eq(
                op,
                self.set.get(self.set.find(&value)).copied(),
                self.reference.get(&value).copied(),
            ),
            Op::LowerBound(value) => expect_eq(
                op,
                self.set.get(self.set.lower_bound(&value)).copied(),
                self.reference.range(value..).next().copied(),
            ),
            Op::UpperBound(value) => expect_eq(
                op,
                self.set.get(self.set.upper_bound(&value)).copied(),
                first_above(&self.reference, value),
            ),
            Op::Count(value) => expect_eq(
                op,
                self.set.count(&value),
                usize::from(self.reference.contains(&value)),
            ),
            Op::Clear => {
                self.set.clear();
                self.reference.clear();
                self.pinned = None;
                Ok(())
            }
            Op::Reclone => {
                let copy = self.set.clone();
                expect_eq(
                    op,
                    copy.iter().collect::<Vec<_>>(),
                    self.set.iter().collect::<Vec<_>>(),
                )?;
                self.set = copy;
                self.pinned = None;
                Ok(())
            }
            Op::Pin(value) => {
                let position = self.set.find(&value);
                if !position.is_end() {
                    self.pinned = Some((position, value));
                }
                expect_eq(
                    op,
                    self.set.get(position).copied(),
                    self.reference.get(&value).copied(),
                )
            }
        }
    }

    /// Compare full contents and check the skip list's structure.
    pub fn check(&self) -> Result<(), String> {
        let contents: Vec<i32> = self.set.iter().copied().collect();
        let expected: Vec<i32> = self.reference.iter().copied().collect();
        if contents != expected {
            return Err(format!("contents {contents:?} differ from {expected:?}"));
        }
        if let Some((position, value)) = self.pinned {
            if self.set.get(position) != Some(&value) {
                return Err(format!("saved position of {value} no longer reaches it"));
            }
            let next = self.set.get(self.set.advance(position)).copied();
            if next != first_above(&self.reference, value) {
                return Err(format!("saved position of {value} advances to {next:?}"));
            }
        }
        assert_sound(&self.set)
    }

    /// Apply every op, checking the whole state after each one.
    pub fn run(&mut self, ops: &[Op]) -> Result<(), String> {
        for (step, &op) in ops.iter().enumerate() {
            self.apply(op).map_err(|err| format!("step {step}: {err}"))?;
            self.check()
                .map_err(|err| format!("after step {step} ({op:?}): {err}"))?;
        }
        Ok(())
    }
}
