//! Reusable strategies for generating skip set workloads.

use proptest::prelude::*;

use crate::model::Op;

// ============================================================================
// Base Strategies
// ============================================================================

/// Values from a narrow band, so inserts and erases collide often.
pub fn strategy_value() -> impl Strategy<Value = i32> {
    -64..64i32
}

/// Unordered values, duplicates allowed.
pub fn strategy_values() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(strategy_value(), 0..128)
}

/// Strictly ascending values drawn from the full `i32` range.
pub fn strategy_sorted_unique() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::btree_set(any::<i32>(), 0..256)
        .prop_map(|values| values.into_iter().collect())
}

pub fn strategy_seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Tower-height scripts for `Scripted`, including heights past any cap.
pub fn strategy_heights() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(1..12usize, 1..16)
}

// ============================================================================
// Operation Strategies
// ============================================================================

/// One operation, weighted towards mutations.
pub fn strategy_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => strategy_value().prop_map(Op::Insert),
        4 => strategy_value().prop_map(Op::Erase),
        1 => Just(Op::EraseFirst),
        2 => strategy_value().prop_map(Op::Find),
        2 => strategy_value().prop_map(Op::LowerBound),
        2 => strategy_value().prop_map(Op::UpperBound),
        1 => strategy_value().prop_map(Op::Count),
        1 => Just(Op::Reclone),
        1 => strategy_value().prop_map(Op::Pin),
        // rare, or sets never get big
        1 => Just(Op::Clear),
    ]
}

pub fn strategy_ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(strategy_op(), 0..200)
}
