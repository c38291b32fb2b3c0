//! Fuzz harness for level settings read from YAML or JSON.
//!
//! Whatever parses must either build a generator or fail validation, never
//! panic, and a built set must respect the level cap.

#![no_main]

use libfuzzer_sys::fuzz_target;
use skipset::{LevelConfig, SkipSet};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let parsed: Option<LevelConfig> = serde_yaml::from_str(input)
        .ok()
        .or_else(|| serde_json::from_str(input).ok());
    let Some(config) = parsed else {
        return;
    };

    if let Ok(mut set) = SkipSet::with_config(&config) {
        set.extend(0..64u32);
        assert!(set.level_count() <= config.max_level);
        assert_eq!(set.check_structure(), Ok(()));
    }
});
