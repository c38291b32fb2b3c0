//! Fuzz harness replaying byte-decoded operations against BTreeSet.
//!
//! The first eight bytes seed promotion; every following pair of bytes is
//! one operation (opcode, operand). Any disagreement or structural damage
//! panics.

#![no_main]

use libfuzzer_sys::fuzz_target;
use skipset::{CoinFlip, LevelConfig, SkipSet};
use skipset_testkit::{Model, Op};

fn decode(opcode: u8, operand: u8) -> Op {
    // narrow band so values collide
    let value = i32::from(operand % 64) - 32;
    match opcode % 16 {
        0..=4 => Op::Insert(value),
        5..=7 => Op::Erase(value),
        8 => Op::EraseFirst,
        9 => Op::Find(value),
        10 => Op::LowerBound(value),
        11 => Op::UpperBound(value),
        12 => Op::Count(value),
        13 => Op::Reclone,
        14 if operand == 0 => Op::Clear,
        15 => Op::Pin(value),
        _ => Op::Find(value),
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((seed, rest)) = data.split_first_chunk::<8>() else {
        return;
    };
    let seed = u64::from_le_bytes(*seed);
    // low caps exercise the level clamp
    let max_level = usize::from(seed as u8 % 8) + 1;
    let generator = LevelConfig::new()
        .with_max_level(max_level)
        .with_seed(seed)
        .build()
        .unwrap_or_else(|_| CoinFlip::with_seed(seed));

    let ops: Vec<Op> = rest
        .chunks_exact(2)
        .map(|pair| decode(pair[0], pair[1]))
        .collect();
    let mut model = Model::new(SkipSet::with_levels(generator));
    if let Err(err) = model.run(&ops) {
        panic!("{err}");
    }
});
