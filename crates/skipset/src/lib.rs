//! Ordered set backed by a randomized skip list.
//!
//! A [`SkipSet`] keeps a stack of sorted singly-linked levels. Level 0 holds
//! every element exactly once; each level above it is a thinned "express
//! lane" over the level below, where an element is promoted with probability
//! `1/skip_factor` when it is inserted. Searches start at the top level, run
//! right while the next element is still before the target and drop down a
//! level otherwise, giving expected `O(log n)` find, insert, erase and bound
//! queries.
//!
//! Element positions are exposed as copyable [`Position`] handles, the way
//! ordered-set cursors work in other languages: `begin`, `find`,
//! `lower_bound`, `upper_bound`, `insert` and `erase` all return one, and
//! [`SkipSet::advance`] steps it forward. Ordinary Rust iteration is
//! available through [`SkipSet::iter`] and [`SkipSet::range`].
//!
//! ```
//! use skipset::SkipSet;
//!
//! let mut set = SkipSet::with_seed(7);
//! for value in [4, 2, 6] {
//!     set.insert(value);
//! }
//!
//! assert_eq!(set.get(set.lower_bound(&3)), Some(&4));
//! assert_eq!(set.get(set.upper_bound(&4)), Some(&6));
//! assert!(set.lower_bound(&7).is_end());
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![2, 4, 6]);
//! ```
//!
//! The set is single-threaded. It owns every element; nothing is shared
//! between levels except through arena keys.

mod check;
mod error;
mod iter;
mod node;
mod position;

use std::borrow::Borrow;
use std::fmt;
use std::mem;
use std::ops::{Bound, RangeBounds};

pub use error::SkipSetError;
pub use iter::{IntoIter, Iter, Range};
pub use position::Position;
pub use skipset_levels::{
    CoinFlip, DEFAULT_MAX_LEVEL, DEFAULT_SKIP_FACTOR, LevelConfig, LevelConfigError,
    LevelGenerator, Scripted,
};

use node::{Node, NodeId, Nodes, Payload};

/// Ordered set of unique elements stored in a skip list.
///
/// `L` decides tower heights for new elements; the default [`CoinFlip`]
/// promotes with probability 1/2 up to 32 levels.
pub struct SkipSet<T, L = CoinFlip> {
    nodes: Nodes<T>,
    /// Head sentinel of the topmost level.
    head: NodeId,
    /// Head sentinel of level 0; survives level shrinking.
    bottom: NodeId,
    levels: usize,
    len: usize,
    generator: L,
    /// Scratch buffer for per-level predecessors.
    trail: Vec<NodeId>,
}

impl<T> SkipSet<T, CoinFlip> {
    /// Create an empty set seeded from operating system entropy.
    pub fn new() -> Self {
        Self::with_levels(CoinFlip::default())
    }

    /// Create an empty set whose promotion draws are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_levels(CoinFlip::with_seed(seed))
    }

    /// Create an empty set from promotion settings.
    pub fn with_config(config: &LevelConfig) -> Result<Self, SkipSetError> {
        Ok(Self::with_levels(config.build()?))
    }

    /// Build a set from a strictly ascending sequence by appending at the tail.
    ///
    /// The input order is a contract, not a check: feeding unsorted or
    /// duplicated values produces a set whose queries return unspecified
    /// (but memory-safe) results. [`SkipSet::check_structure`] reports the
    /// damage; [`SkipSet::try_from_sorted_iter`] validates as it goes, and
    /// `collect()` accepts any order.
    pub fn from_sorted_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = Self::new();
        set.extend_sorted(iter);
        set
    }
}

impl<T: Ord> SkipSet<T, CoinFlip> {
    /// Like [`SkipSet::from_sorted_iter`], but rejects input that is not
    /// strictly ascending.
    pub fn try_from_sorted_iter<I>(iter: I) -> Result<Self, SkipSetError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = Self::new();
        set.try_extend_sorted(iter)?;
        Ok(set)
    }
}

impl<T, L> SkipSet<T, L> {
    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels currently in use, at least 1.
    pub fn level_count(&self) -> usize {
        self.levels
    }

    /// Nodes currently allocated, head sentinels included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Data nodes per level, level 0 first.
    pub fn level_lengths(&self) -> Vec<usize> {
        let mut lengths = Vec::with_capacity(self.levels);
        let mut head = Some(self.head);
        while let Some(id) = head {
            let mut count = 0;
            let mut cursor = self.nodes[id].next;
            while let Some(node) = cursor {
                count += 1;
                cursor = self.nodes[node].next;
            }
            lengths.push(count);
            head = self.nodes[id].down;
        }
        lengths.reverse();
        lengths
    }

    /// Position of the smallest element, or [`Position::END`] when empty.
    pub fn begin(&self) -> Position {
        Position::from_node(self.nodes[self.bottom].next)
    }

    /// The past-the-end marker.
    pub fn end(&self) -> Position {
        Position::END
    }

    /// Position following `position`; the end marker stays at the end.
    pub fn advance(&self, position: Position) -> Position {
        let next = position
            .node()
            .filter(|&id| self.nodes.element(id).is_some())
            .and_then(|id| self.nodes.get(id))
            .and_then(|node| node.next);
        Position::from_node(next)
    }

    /// Element at `position`, or `None` for the end marker.
    pub fn get(&self, position: Position) -> Option<&T> {
        position.node().and_then(|id| self.nodes.element(id))
    }

    /// Mutable access to the element at `position`.
    ///
    /// The set is not re-sorted afterwards. Changing the element so that it
    /// no longer sits strictly between its neighbours breaks every later
    /// query.
    pub fn get_mut(&mut self, position: Position) -> Option<&mut T> {
        position.node().and_then(|id| self.nodes.element_mut(id))
    }

    pub fn first(&self) -> Option<&T> {
        self.get(self.begin())
    }

    /// Largest element, found by running right along the express lanes.
    pub fn last(&self) -> Option<&T> {
        let tail = self.descend(|_| true, None);
        self.nodes.element(tail)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.nodes, self.nodes[self.bottom].next, self.len)
    }

    /// Remove every element, leaving one empty level.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.bottom = self.nodes.alloc(Node::head(None));
        self.head = self.bottom;
        self.levels = 1;
        self.len = 0;
        self.trail.clear();
    }

    /// Walk from the top head down to level 0, moving right at each level
    /// while `before` holds for the next element. Returns the level-0 node
    /// reached; `trail` receives the last node visited on every level, top
    /// level first.
    fn descend<F>(&self, mut before: F, mut trail: Option<&mut Vec<NodeId>>) -> NodeId
    where
        F: FnMut(&T) -> bool,
    {
        let mut cursor = self.head;
        loop {
            while let Some(next) = self.nodes[cursor].next {
                match self.nodes.value(next) {
                    Some(value) if before(value) => cursor = next,
                    _ => break,
                }
            }
            if let Some(trail) = trail.as_deref_mut() {
                trail.push(cursor);
            }
            match self.nodes[cursor].down {
                Some(down) => cursor = down,
                None => return cursor,
            }
        }
    }

    fn take_trail(&mut self) -> Vec<NodeId> {
        let mut trail = mem::take(&mut self.trail);
        trail.clear();
        trail
    }

    fn link_after(&mut self, pred: NodeId, payload: Payload<T>, down: Option<NodeId>) -> NodeId {
        let next = self.nodes[pred].next;
        let id = self.nodes.alloc(Node {
            payload,
            next,
            down,
        });
        self.nodes[pred].next = Some(id);
        id
    }

    /// Add an empty level on top of the current one.
    fn grow(&mut self) -> NodeId {
        let head = self.nodes.alloc(Node::head(Some(self.head)));
        self.head = head;
        self.levels += 1;
        head
    }

    /// Drop empty levels from the top, keeping at least one.
    fn shrink(&mut self) {
        while self.levels > 1 && self.nodes[self.head].next.is_none() {
            let Some(down) = self.nodes[self.head].down else {
                break;
            };
            self.nodes.release(self.head);
            self.head = down;
            self.levels -= 1;
        }
    }

    /// Unlink every node of the tower rooted at `target`, bottom level first.
    /// `preds` holds the predecessor on each level, level 0 first.
    fn unlink_tower(&mut self, target: NodeId, preds: &[NodeId]) -> Option<T> {
        let mut value = None;
        for &pred in preds {
            let Some(node) = self.nodes[pred].next else {
                break;
            };
            if self.nodes.base(node) != Some(target) {
                break;
            }
            let removed = self.nodes.release(node);
            self.nodes[pred].next = removed.next;
            if let Payload::Element(element) = removed.payload {
                value = Some(element);
            }
        }
        self.len -= 1;
        self.shrink();
        value
    }

    fn finish_removal(
        &mut self,
        pred: NodeId,
        hit: Option<NodeId>,
        mut trail: Vec<NodeId>,
    ) -> (Option<T>, Position) {
        trail.reverse();
        let value = match hit {
            Some(target) => self.unlink_tower(target, &trail),
            None => None,
        };
        let after = Position::from_node(self.nodes[pred].next);
        self.trail = trail;
        (value, after)
    }
}

impl<T, L: LevelGenerator> SkipSet<T, L> {
    /// Create an empty set drawing tower heights from `generator`.
    pub fn with_levels(generator: L) -> Self {
        let mut nodes = Nodes::new();
        let bottom = nodes.alloc(Node::head(None));
        Self {
            nodes,
            head: bottom,
            bottom,
            levels: 1,
            len: 0,
            generator,
            trail: Vec::new(),
        }
    }

    /// Cap on the number of levels.
    pub fn max_level(&self) -> usize {
        self.generator.max_level().max(1)
    }

    /// Append a strictly ascending sequence after the current last element.
    ///
    /// Every value must be greater than everything already in the set and
    /// than the values before it; see [`SkipSet::from_sorted_iter`] for what
    /// happens otherwise.
    pub fn extend_sorted<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut tails = self.tails();
        for value in iter {
            self.link_tower(&mut tails, value);
        }
        self.trail = tails;
    }

    /// Last node of every level, level 0 first.
    fn tails(&mut self) -> Vec<NodeId> {
        let mut tails = self.take_trail();
        self.descend(|_| true, Some(&mut tails));
        tails.reverse();
        tails
    }

    fn draw_height(&mut self) -> usize {
        let cap = self.max_level();
        self.generator.height().clamp(1, cap)
    }

    /// Link a new element after `preds[0]` and promote it, one node per
    /// level, after `preds[level]`. Levels are added on top as needed; `preds`
    /// is updated to point at the new tower.
    fn link_tower(&mut self, preds: &mut Vec<NodeId>, value: T) -> NodeId {
        let height = self.draw_height();
        let base = self.link_after(preds[0], Payload::Element(value), None);
        preds[0] = base;
        self.len += 1;

        let mut below = base;
        for level in 1..height {
            if level == self.levels {
                let head = self.grow();
                preds.push(head);
            }
            below = self.link_after(preds[level], Payload::Index(base), Some(below));
            preds[level] = below;
        }
        base
    }
}

impl<T: Ord, L: LevelGenerator> SkipSet<T, L> {
    /// Position of `value`, or [`Position::END`] if absent.
    pub fn find<Q>(&self, value: &Q) -> Position
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let pred = self.descend(|x| x.borrow() < value, None);
        let hit = self.nodes[pred]
            .next
            .filter(|&id| self.nodes.value(id).is_some_and(|x| x.borrow() == value));
        Position::from_node(hit)
    }

    /// Position of the first element not less than `value`.
    pub fn lower_bound<Q>(&self, value: &Q) -> Position
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let pred = self.descend(|x| x.borrow() < value, None);
        Position::from_node(self.nodes[pred].next)
    }

    /// Position of the first element greater than `value`.
    pub fn upper_bound<Q>(&self, value: &Q) -> Position
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let pred = self.descend(|x| x.borrow() <= value, None);
        Position::from_node(self.nodes[pred].next)
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        !self.find(value).is_end()
    }

    /// 1 if `value` is present, otherwise 0.
    pub fn count<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        usize::from(self.contains(value))
    }

    /// Insert `value` unless an equal element is present.
    ///
    /// Returns the position of the element equal to `value`, whether it was
    /// just inserted or already there. An existing element is left untouched.
    pub fn insert(&mut self, value: T) -> Position {
        let mut trail = self.take_trail();
        let pred = self.descend(|x| x < &value, Some(&mut trail));
        if let Some(next) = self.nodes[pred].next
            && self.nodes.value(next) == Some(&value)
        {
            self.trail = trail;
            return Position::from_node(Some(next));
        }
        trail.reverse();
        let base = self.link_tower(&mut trail, value);
        self.trail = trail;
        Position::from_node(Some(base))
    }

    /// Erase `value` if present.
    ///
    /// Returns the position of the first element after the erased one. When
    /// `value` is absent nothing changes and the result is the position of
    /// the first element greater than it.
    pub fn erase<Q>(&mut self, value: &Q) -> Position
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_value(value).1
    }

    /// Erase the element at `position`, returning the position after it.
    ///
    /// Erasing the end marker changes nothing and returns [`Position::END`].
    /// A stale position usually does the same, but if its slot has been
    /// reused by a later insert it names that new element, which is then
    /// erased. See [`Position`].
    pub fn erase_at(&mut self, position: Position) -> Position {
        let Some(target) = position.node() else {
            return Position::END;
        };
        let mut trail = self.take_trail();
        let pred = match self.nodes.element(target) {
            Some(key) => self.descend(|x| x < key, Some(&mut trail)),
            None => {
                self.trail = trail;
                return Position::END;
            }
        };
        let hit = self.nodes[pred].next.filter(|&id| id == target);
        self.finish_removal(pred, hit, trail).1
    }

    /// Remove `value`, reporting whether it was present.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.take(value).is_some()
    }

    /// Remove and return the element equal to `value`.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_value(value).0
    }

    fn remove_value<Q>(&mut self, value: &Q) -> (Option<T>, Position)
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut trail = self.take_trail();
        let pred = self.descend(|x| x.borrow() < value, Some(&mut trail));
        let hit = self.nodes[pred]
            .next
            .filter(|&id| self.nodes.value(id).is_some_and(|x| x.borrow() == value));
        self.finish_removal(pred, hit, trail)
    }

    /// Iterate over the elements inside `range`, in ascending order.
    ///
    /// An inverted or empty range yields nothing.
    pub fn range<Q, R>(&self, range: R) -> Range<'_, T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
        R: RangeBounds<Q>,
    {
        let start = match range.start_bound() {
            Bound::Included(value) => self.lower_bound(value),
            Bound::Excluded(value) => self.upper_bound(value),
            Bound::Unbounded => self.begin(),
        };
        let stop = match range.end_bound() {
            Bound::Included(value) => self.upper_bound(value),
            Bound::Excluded(value) => self.lower_bound(value),
            Bound::Unbounded => Position::END,
        };
        let empty = match (start.node(), stop.node()) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(first), Some(last)) => self.nodes.value(first) >= self.nodes.value(last),
        };
        if empty {
            Range::new(&self.nodes, None, None)
        } else {
            Range::new(&self.nodes, start.node(), stop.node())
        }
    }

    /// Checked counterpart of [`SkipSet::extend_sorted`].
    ///
    /// Stops at the first value that is not greater than its predecessor
    /// and reports its index within `iter`; values before it stay appended.
    pub fn try_extend_sorted<I>(&mut self, iter: I) -> Result<(), SkipSetError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut tails = self.tails();
        for (position, value) in iter.into_iter().enumerate() {
            if self.nodes.value(tails[0]).is_some_and(|last| *last >= value) {
                self.trail = tails;
                return Err(SkipSetError::Unsorted { position });
            }
            self.link_tower(&mut tails, value);
        }
        self.trail = tails;
        Ok(())
    }
}

impl<T> Default for SkipSet<T, CoinFlip> {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies replay the elements in order with fresh promotion draws, so the
/// copy's level layout is independent of the source's.
impl<T: Clone, L: LevelGenerator + Clone> Clone for SkipSet<T, L> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_levels(self.generator.clone());
        copy.extend_sorted(self.iter().cloned());
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.extend_sorted(source.iter().cloned());
    }
}

impl<T: fmt::Debug, L> fmt::Debug for SkipSet<T, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, L, M> PartialEq<SkipSet<T, M>> for SkipSet<T, L> {
    fn eq(&self, other: &SkipSet<T, M>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, L> Eq for SkipSet<T, L> {}

impl<T: Ord, L: LevelGenerator + Default> FromIterator<T> for SkipSet<T, L> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::with_levels(L::default());
        set.extend(iter);
        set
    }
}

impl<T: Ord, L: LevelGenerator> Extend<T> for SkipSet<T, L> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T, L> IntoIterator for &'a SkipSet<T, L> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, L> IntoIterator for SkipSet<T, L> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        let mut values = Vec::with_capacity(self.len);
        let mut cursor = self.nodes[self.bottom].next;
        while let Some(id) = cursor {
            let node = self.nodes.release(id);
            cursor = node.next;
            if let Payload::Element(value) = node.payload {
                values.push(value);
            }
        }
        IntoIter::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(values: &[i32]) -> SkipSet<i32> {
        let mut set = SkipSet::with_seed(0x5eed);
        set.extend_sorted(values.iter().copied());
        set
    }

    fn contents<L>(set: &SkipSet<i32, L>) -> Vec<i32> {
        set.iter().copied().collect()
    }

    fn walk<L>(set: &SkipSet<i32, L>) -> Vec<i32> {
        let mut out = Vec::new();
        let mut position = set.begin();
        while position != set.end() {
            out.extend(set.get(position).copied());
            position = set.advance(position);
        }
        out
    }

    #[test]
    fn new_set_is_empty() {
        let set: SkipSet<i32> = SkipSet::new();
        assert_eq!(set.len(), 0);
        assert!(set.is_empty());
        assert_eq!(set.level_count(), 1);
        assert_eq!(set.node_count(), 1);
        assert_eq!(set.begin(), set.end());
        assert_eq!(set.check_structure(), Ok(()));
    }

    #[test]
    fn build_from_sorted_values() {
        let values = [1, 2, 3, 4];
        let set = SkipSet::from_sorted_iter(values);
        assert_eq!(set.len(), values.len());
        assert!(!set.is_empty());
        assert_eq!(walk(&set), values);
        assert_eq!(set.check_structure(), Ok(()));

        let empty = SkipSet::<i32>::from_sorted_iter(std::iter::empty());
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
    }

    #[test]
    fn checked_build_rejects_unsorted_input() {
        assert_eq!(
            SkipSet::try_from_sorted_iter([1, 3, 2]).unwrap_err(),
            SkipSetError::Unsorted { position: 2 }
        );
        assert_eq!(
            SkipSet::try_from_sorted_iter([1, 1]).unwrap_err(),
            SkipSetError::Unsorted { position: 1 }
        );
        let set = SkipSet::try_from_sorted_iter([1, 5, 9]).unwrap();
        assert_eq!(contents(&set), vec![1, 5, 9]);
    }

    #[test]
    fn unsorted_build_is_detected_by_structure_check() {
        let set = SkipSet::from_sorted_iter([3, 1, 2]);
        assert_eq!(set.len(), 3);
        assert!(matches!(
            set.check_structure(),
            Err(SkipSetError::Corrupted { level: 0, .. })
        ));
    }

    #[test]
    fn clone_copies_elements_not_layout() {
        let source = set_of(&[1, 2, 3, 4, 5]);
        let copy = source.clone();
        assert_eq!(copy.len(), source.len());
        assert_eq!(contents(&copy), contents(&source));
        assert_eq!(copy, source);
        assert_eq!(copy.check_structure(), Ok(()));
    }

    #[test]
    fn clone_replays_elements_with_fresh_heights() {
        let mut source = SkipSet::with_levels(Scripted::new([1, 2, 3, 4]));
        source.extend_sorted([1, 2]);
        assert_eq!(source.level_lengths(), vec![2, 1]);

        // the copy continues the script: heights 3 and 4
        let copy = source.clone();
        assert_eq!(contents(&copy), vec![1, 2]);
        assert_eq!(copy.level_lengths(), vec![2, 2, 2, 1]);
        assert_eq!(copy.check_structure(), Ok(()));

        // clone_from draws from the target's own generator: heights 1 and 4
        let mut target = SkipSet::with_levels(Scripted::new([4, 1]));
        target.insert(9);
        target.clone_from(&source);
        assert_eq!(contents(&target), vec![1, 2]);
        assert_eq!(target.level_lengths(), vec![2, 1, 1, 1]);
        assert_eq!(target.check_structure(), Ok(()));
        assert_eq!(source.level_lengths(), vec![2, 1]);
    }

    #[test]
    fn seeded_clones_are_reproducible() {
        let source = set_of(&(0..200).collect::<Vec<_>>());
        let first = source.clone();
        let second = source.clone();
        assert_eq!(first.level_lengths(), second.level_lengths());
        assert_eq!(first, source);
    }

    #[test]
    fn positions_survive_unrelated_mutations() {
        let mut set = SkipSet::with_seed(21);
        set.extend(0..50);
        let pinned = set.find(&25);

        for value in 100..1_000 {
            set.insert(value);
        }
        for value in 0..25 {
            set.erase(&value);
        }
        set.erase(&40);
        set.insert(-1);

        assert_eq!(set.get(pinned), Some(&25));
        assert_eq!(set.get(set.advance(pinned)), Some(&26));
        assert_eq!(set.find(&25), pinned);
        assert_eq!(set.check_structure(), Ok(()));
    }

    #[test]
    fn assignment_replaces_contents() {
        let mut a = set_of(&[1, 2, 3]);
        let b = set_of(&[4, 5, 6, 7]);
        a.clone_from(&b);
        assert_eq!(a.len(), 4);
        assert_eq!(contents(&a), contents(&b));

        let first = a.begin();
        if let Some(value) = a.get_mut(first) {
            *value = 0;
        }
        assert_ne!(a.first(), b.first());
        assert_eq!(a.check_structure(), Ok(()));

        a.clear();
        assert!(a.is_empty());
        assert!(!b.is_empty());

        let mut c = b.clone();
        c.clone_from(&SkipSet::new());
        assert!(c.is_empty());
        c.clone_from(&b);
        assert_eq!(c.len(), 4);
    }

    #[test]
    fn begin_and_end() {
        let mut set = SkipSet::with_seed(1);
        assert_eq!(set.begin(), set.end());
        let old_begin = set.begin();
        let old_end = set.end();

        set.clone_from(&set_of(&[1, 2, 3]));
        assert_ne!(set.begin(), set.end());
        assert_ne!(set.begin(), old_begin);
        assert_eq!(set.end(), old_end);
        assert_eq!(set.get(set.begin()), Some(&1));
        assert_eq!(set.get(set.end()), None);
        assert_eq!(set.advance(set.end()), set.end());
        assert_eq!(Position::default(), Position::END);
    }

    #[test]
    fn lower_bound_finds_first_not_less() {
        let set = set_of(&[2, 4, 6]);
        assert_eq!(set.get(set.lower_bound(&1)), Some(&2));
        assert_eq!(set.get(set.lower_bound(&2)), Some(&2));
        assert_eq!(set.get(set.lower_bound(&3)), Some(&4));
        assert_eq!(set.get(set.lower_bound(&4)), Some(&4));
        assert_eq!(set.get(set.lower_bound(&5)), Some(&6));
        assert_eq!(set.get(set.lower_bound(&6)), Some(&6));
        assert_eq!(set.lower_bound(&7), set.end());
    }

    #[test]
    fn upper_bound_finds_first_greater() {
        let set = set_of(&[2, 4, 6]);
        assert_eq!(set.get(set.upper_bound(&1)), Some(&2));
        assert_eq!(set.get(set.upper_bound(&2)), Some(&4));
        assert_eq!(set.get(set.upper_bound(&3)), Some(&4));
        assert_eq!(set.get(set.upper_bound(&4)), Some(&6));
        assert_eq!(set.get(set.upper_bound(&5)), Some(&6));
        assert_eq!(set.upper_bound(&6), set.end());
    }

    #[test]
    fn bounds_of_present_value_are_one_step_apart() {
        let set = set_of(&[2, 4, 6]);
        for value in [2, 4, 6] {
            assert_eq!(set.advance(set.lower_bound(&value)), set.upper_bound(&value));
        }
    }

    #[test]
    fn empty_and_size_track_contents() {
        let mut set = SkipSet::new();
        assert!(set.is_empty());
        set.clone_from(&set_of(&[0, 10, 100]));
        assert!(!set.is_empty());
        assert_eq!(set.len(), 3);
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn clear_resets_to_one_level() {
        let mut set = SkipSet::with_levels(Scripted::new([4]));
        set.extend_sorted([1.1, 2.2, 3.3]);
        assert_ne!(set.begin(), set.end());
        assert_eq!(set.level_count(), 4);
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.begin(), set.end());
        assert_eq!(set.level_count(), 1);
        assert_eq!(set.node_count(), 1);
    }

    #[test]
    fn find_present_and_absent() {
        let set = set_of(&[2, 4, 6, 8, 10]);
        for value in (2..=10).step_by(2) {
            let position = set.find(&value);
            assert_ne!(position, set.end());
            assert_eq!(set.get(position), Some(&value));
        }
        for value in (1..=11).step_by(2) {
            assert_eq!(set.find(&value), set.end());
        }
    }

    #[test]
    fn find_on_empty_set() {
        let set: SkipSet<i32> = SkipSet::new();
        for value in [-1, 0, 1, i32::MAX] {
            assert!(set.find(&value).is_end());
        }
    }

    #[test]
    fn insert_keeps_order_and_uniqueness() {
        let mut set = SkipSet::with_seed(9);
        for i in 1..10 {
            set.insert(i);
            assert_eq!(set.len(), i as usize);
            assert_eq!(set.get(set.find(&i)), Some(&i));
        }
        let before = set.len();
        for i in 0..=10 {
            set.insert(i);
        }
        assert_eq!(set.len(), before + 2);
        for i in (11..=20).rev() {
            set.insert(i);
        }
        assert_eq!(walk(&set), (0..=20).collect::<Vec<_>>());
        assert_eq!(set.len(), 21);
        assert_eq!(set.check_structure(), Ok(()));
    }

    #[test]
    fn duplicate_insert_returns_existing_position() {
        let mut set = SkipSet::with_seed(3);
        let first = set.insert(5);
        let second = set.insert(5);
        assert_eq!(first, second);
        assert_eq!(set.get(second), Some(&5));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn insert_returns_position_of_new_element() {
        let mut set = set_of(&[1, 3]);
        let position = set.insert(2);
        assert_eq!(set.get(position), Some(&2));
        assert_eq!(set.get(set.advance(position)), Some(&3));
    }

    #[test]
    fn erase_by_value() {
        let mut set = set_of(&[0, 1, 2, 3, 4, 5]);
        assert_eq!(set.len(), 6);
        let after = set.erase(&0);
        assert_eq!(set.get(after), Some(&1));
        assert_eq!(set.len(), 5);
        assert_eq!(set.find(&0), set.end());

        set.erase(&0);
        assert_eq!(set.len(), 5);

        let mut copy = set.clone();
        for i in 1..6 {
            copy.erase(&i);
        }
        assert_eq!(copy.len(), 0);

        for i in (1..6).rev() {
            set.erase(&i);
        }
        assert!(set.is_empty());
        assert_eq!(set.level_count(), 1);
        assert_eq!(set.node_count(), 1);
    }

    #[test]
    fn erase_missing_value_returns_successor() {
        let mut set = set_of(&[2, 4, 6]);
        let pos = set.erase(&3);
        assert_eq!(set.get(pos), Some(&4));
        assert_eq!(set.erase(&7), set.end());
        assert_eq!(contents(&set), vec![2, 4, 6]);
    }

    #[test]
    fn erase_at_front_until_empty() {
        let mut set = set_of(&[1, 2, 3, 4, 5]);
        while set.begin() != set.end() {
            set.erase_at(set.begin());
        }
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn erase_at_saved_positions_back_to_front() {
        let mut set = set_of(&[1, 2, 3, 4, 5]);
        let mut positions = Vec::new();
        let mut position = set.begin();
        while position != set.end() {
            positions.push(position);
            position = set.advance(position);
        }
        for position in positions.into_iter().rev() {
            assert_eq!(set.erase_at(position), set.end());
        }
        assert!(set.is_empty());
    }

    #[test]
    fn erase_at_end_is_a_no_op() {
        let mut set = set_of(&[1, 2]);
        assert_eq!(set.erase_at(set.end()), set.end());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn erase_at_stale_position() {
        let mut set = SkipSet::with_levels(Scripted::new([1]));
        set.extend([1, 2, 3]);
        let stale = set.find(&2);
        set.erase(&2);
        assert_eq!(set.erase_at(stale), set.end());
        assert_eq!(contents(&set), vec![1, 3]);
        // single-node towers: the next insert takes the freed slot
        assert_eq!(set.insert(5), stale);
        assert_eq!(set.get(stale), Some(&5));
        assert_eq!(set.erase_at(stale), set.end());
        assert_eq!(contents(&set), vec![1, 3]);
        assert_eq!(set.check_structure(), Ok(()));
    }

    #[test]
    fn count_reports_membership() {
        let set = set_of(&[2, 4, 6, 8, 10]);
        for i in (1..12).step_by(2) {
            assert_eq!(set.count(&i), 0);
        }
        for i in (2..12).step_by(2) {
            assert_eq!(set.count(&i), 1);
        }
    }

    #[test]
    fn take_and_remove() {
        let mut set: SkipSet<String> = SkipSet::with_seed(4);
        set.insert("b".to_string());
        set.insert("a".to_string());
        assert!(set.contains("a"));
        assert_eq!(set.take("a"), Some("a".to_string()));
        assert!(!set.remove("a"));
        assert!(set.remove("b"));
        assert!(set.is_empty());
    }

    #[test]
    fn levels_grow_with_tall_towers() {
        let mut set = SkipSet::with_levels(Scripted::new([1, 3, 1, 5]));
        for value in [10, 20, 30, 40] {
            set.insert(value);
        }
        assert_eq!(set.level_count(), 5);
        assert_eq!(set.level_lengths(), vec![4, 2, 2, 1, 1]);
        assert_eq!(set.node_count(), 4 + 2 + 2 + 1 + 1 + 5);
        assert_eq!(set.check_structure(), Ok(()));
    }

    #[test]
    fn levels_are_capped_at_max_level() {
        let mut set = SkipSet::with_levels(Scripted::new([40]).with_max_level(6));
        set.extend([1, 2, 3]);
        assert_eq!(set.level_count(), 6);
        assert_eq!(set.max_level(), 6);
        assert_eq!(set.check_structure(), Ok(()));
    }

    #[test]
    fn erasing_tallest_tower_shrinks_levels() {
        let mut set = SkipSet::with_levels(Scripted::new([2, 5, 1]));
        set.extend([1, 2, 3]);
        assert_eq!(set.level_count(), 5);

        set.erase(&2);
        assert_eq!(set.level_count(), 2);
        assert_eq!(set.level_lengths(), vec![2, 1]);
        assert_eq!(set.check_structure(), Ok(()));

        set.erase(&1);
        assert_eq!(set.level_count(), 1);
        assert_eq!(set.node_count(), 2);
    }

    #[test]
    fn first_and_last() {
        let mut set = SkipSet::with_seed(11);
        assert_eq!(set.first(), None);
        assert_eq!(set.last(), None);
        set.extend([5, 1, 9, 3]);
        assert_eq!(set.first(), Some(&1));
        assert_eq!(set.last(), Some(&9));
    }

    #[test]
    fn range_queries() {
        fn collect(range: Range<'_, i32>) -> Vec<i32> {
            range.copied().collect()
        }

        let set = set_of(&[1, 3, 5, 7, 9]);
        assert_eq!(collect(set.range(3..7)), vec![3, 5]);
        assert_eq!(collect(set.range(3..=7)), vec![3, 5, 7]);
        assert_eq!(collect(set.range(2..)), vec![3, 5, 7, 9]);
        assert_eq!(collect(set.range(..4)), vec![1, 3]);
        assert_eq!(collect(set.range(..)), vec![1, 3, 5, 7, 9]);
        assert_eq!(
            collect(set.range((Bound::Excluded(3), Bound::Excluded(9)))),
            vec![5, 7]
        );
        assert!(collect(set.range(4..4)).is_empty());
        assert!(collect(set.range(10..)).is_empty());
        assert!(collect(set.range((Bound::Excluded(5), Bound::Included(4)))).is_empty());
    }

    #[test]
    fn iterators_agree() {
        let set: SkipSet<i32> = [5, 3, 8, 1].into_iter().collect();
        assert_eq!(set.iter().len(), 4);
        assert_eq!(contents(&set), vec![1, 3, 5, 8]);
        assert_eq!((&set).into_iter().count(), 4);
        assert_eq!(set.into_iter().rev().collect::<Vec<_>>(), vec![8, 5, 3, 1]);
    }

    #[test]
    fn debug_formats_as_set() {
        let set = set_of(&[1, 2]);
        assert_eq!(format!("{set:?}"), "{1, 2}");
    }

    #[test]
    fn config_builds_seeded_set() {
        let config = LevelConfig::new().with_seed(5).with_max_level(4);
        let mut set = SkipSet::with_config(&config).unwrap();
        set.extend(0..100);
        assert!(set.level_count() <= 4);
        assert_eq!(set.len(), 100);

        let bad = LevelConfig::new().with_skip_factor(0);
        assert_eq!(
            SkipSet::<i32>::with_config(&bad).unwrap_err(),
            SkipSetError::Levels(LevelConfigError::InvalidSkipFactor(0))
        );
    }

    #[test]
    fn values_are_dropped_once() {
        use std::rc::Rc;

        let marker = Rc::new(());
        let mut set = SkipSet::with_levels(Scripted::new([3, 1, 2]));
        for i in 0..10 {
            set.insert((i, Rc::clone(&marker)));
        }
        assert_eq!(Rc::strong_count(&marker), 11);
        set.erase(&(3, Rc::clone(&marker)));
        assert_eq!(Rc::strong_count(&marker), 10);
        drop(set);
        assert_eq!(Rc::strong_count(&marker), 1);
    }
}
