//! Proptest strategies for skipset property-based testing.

pub mod strategies;

pub use strategies::{
    strategy_heights, strategy_op, strategy_ops, strategy_seed, strategy_sorted_unique,
    strategy_value, strategy_values,
};
