//! Fuzz harness for building from arbitrary, possibly unsorted input.
//!
//! The unchecked build must stay memory-safe and its damage must be
//! reported; the checked build must accept exactly the ascending inputs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use skipset::SkipSet;

fuzz_target!(|data: &[u8]| {
    let values: Vec<i16> = data
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    let ascending = values.windows(2).all(|pair| pair[0] < pair[1]);

    let set = SkipSet::from_sorted_iter(values.iter().copied());
    assert_eq!(set.len(), values.len());
    assert_eq!(set.check_structure().is_ok(), ascending);

    // queries on a damaged set return something, never crash
    for probe in values.iter().take(16) {
        let _ = set.get(set.find(probe));
        let _ = set.get(set.lower_bound(probe));
        let _ = set.get(set.upper_bound(probe));
    }
    assert_eq!(set.iter().count(), values.len());

    let checked = SkipSet::try_from_sorted_iter(values.iter().copied());
    assert_eq!(checked.is_ok(), ascending);

    let collected: SkipSet<i16> = values.iter().copied().collect();
    assert_eq!(collected.check_structure(), Ok(()));
});
