//! Test helpers shared by skipset's property tests and fuzz targets.

pub mod model;
pub mod proptest;

use skipset::{LevelGenerator, Scripted, SkipSet};

pub use model::{Model, Op};

/// Seed used by fixtures unless a test picks its own.
pub const FIXTURE_SEED: u64 = 0x5eed_5e7;

/// Set holding `values` (in any order), with reproducible promotion.
pub fn seeded_set(values: &[i32]) -> SkipSet<i32> {
    let mut set = SkipSet::with_seed(FIXTURE_SEED);
    set.extend(values.iter().copied());
    set
}

/// Set whose towers follow `heights` cyclically, in insertion order.
pub fn scripted_set(values: &[i32], heights: &[usize]) -> SkipSet<i32, Scripted> {
    let mut set = SkipSet::with_levels(Scripted::new(heights.iter().copied()));
    set.extend(values.iter().copied());
    set
}

/// Elements visited by stepping a position from `begin()` to `end()`.
pub fn walk<T: Clone, L>(set: &SkipSet<T, L>) -> Vec<T> {
    let mut out = Vec::with_capacity(set.len());
    let mut position = set.begin();
    while position != set.end() {
        match set.get(position) {
            Some(value) => out.push(value.clone()),
            None => break,
        }
        position = set.advance(position);
    }
    out
}

/// Check the properties every reachable state must have: strictly
/// increasing iteration, position walk equal to iteration, `len()` equal to
/// the number of elements visited, and a sound level structure.
pub fn assert_sound<T, L>(set: &SkipSet<T, L>) -> Result<(), String>
where
    T: Ord + Clone + std::fmt::Debug,
    L: LevelGenerator,
{
    let items: Vec<T> = set.iter().cloned().collect();
    if let Some(pair) = items.windows(2).find(|pair| pair[0] >= pair[1]) {
        return Err(format!("iteration is not strictly increasing at {pair:?}"));
    }
    if items.len() != set.len() {
        return Err(format!(
            "len() is {} but iteration visited {}",
            set.len(),
            items.len()
        ));
    }
    let walked = walk(set);
    if walked != items {
        return Err(format!("position walk {walked:?} differs from iteration {items:?}"));
    }
    set.check_structure().map_err(|err| err.to_string())
}
