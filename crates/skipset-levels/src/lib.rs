//! Tower-height generators for the skipset skip list.
//!
//! Every element of a skip list occupies level 0 and is promoted to each
//! further level with probability `1/skip_factor`, stopping at the first
//! failed flip or at the level cap. The resulting height is drawn once, when
//! the element is inserted, by a [`LevelGenerator`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default cap on tower height and level count.
pub const DEFAULT_MAX_LEVEL: usize = 32;

/// Default promotion denominator (promotion probability 1/2).
pub const DEFAULT_SKIP_FACTOR: u32 = 2;

/// Largest level cap a configuration may ask for.
pub const MAX_LEVEL_LIMIT: usize = 64;

/// Level configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LevelConfigError {
    #[error("max_level must be between 1 and {MAX_LEVEL_LIMIT}, got {0}")]
    InvalidMaxLevel(usize),
    #[error("skip_factor must be at least 2, got {0}")]
    InvalidSkipFactor(u32),
}

/// Source of tower heights for newly inserted elements.
pub trait LevelGenerator {
    /// Hard cap on tower height; the list never grows more levels than this.
    fn max_level(&self) -> usize;

    /// Draw the height of a new tower.
    ///
    /// Must return a value in `[1, self.max_level()]`. Containers clamp
    /// anything outside that range.
    fn height(&mut self) -> usize;
}

/// Geometric heights from repeated biased coin flips.
#[derive(Debug)]
pub struct CoinFlip {
    rng: StdRng,
    skip_factor: u32,
    max_level: usize,
}

impl CoinFlip {
    /// Create a generator seeded from operating system entropy.
    pub fn new(skip_factor: u32, max_level: usize) -> Result<Self, LevelConfigError> {
        validate(skip_factor, max_level)?;
        Ok(Self {
            rng: StdRng::from_os_rng(),
            skip_factor,
            max_level,
        })
    }

    /// Create a reproducible generator from a fixed seed.
    pub fn seeded(seed: u64, skip_factor: u32, max_level: usize) -> Result<Self, LevelConfigError> {
        validate(skip_factor, max_level)?;
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            skip_factor,
            max_level,
        })
    }

    /// Seeded generator with the default skip factor and level cap.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            skip_factor: DEFAULT_SKIP_FACTOR,
            max_level: DEFAULT_MAX_LEVEL,
        }
    }

    pub fn skip_factor(&self) -> u32 {
        self.skip_factor
    }

    /// Flip the biased coin once: `true` with probability `1/skip_factor`.
    pub fn flip(&mut self) -> bool {
        self.rng.random_ratio(1, self.skip_factor)
    }
}

/// A clone gets its own stream, seeded from the source's current state: it
/// never replays the draws the source makes next, and cloning a seeded
/// generator is still reproducible.
impl Clone for CoinFlip {
    fn clone(&self) -> Self {
        let mut parent = self.rng.clone();
        Self {
            rng: StdRng::from_rng(&mut parent),
            skip_factor: self.skip_factor,
            max_level: self.max_level,
        }
    }
}

impl Default for CoinFlip {
    fn default() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            skip_factor: DEFAULT_SKIP_FACTOR,
            max_level: DEFAULT_MAX_LEVEL,
        }
    }
}

impl LevelGenerator for CoinFlip {
    fn max_level(&self) -> usize {
        self.max_level
    }

    fn height(&mut self) -> usize {
        let mut height = 1;
        while height < self.max_level && self.flip() {
            height += 1;
        }
        height
    }
}

/// Replays a fixed cycle of heights.
///
/// Lets tests lay out an exact level structure instead of sampling one.
#[derive(Debug, Clone)]
pub struct Scripted {
    heights: Vec<usize>,
    cursor: usize,
    max_level: usize,
}

impl Scripted {
    /// Cycle through `heights`; an empty script always yields height 1.
    pub fn new(heights: impl IntoIterator<Item = usize>) -> Self {
        Self {
            heights: heights.into_iter().collect(),
            cursor: 0,
            max_level: DEFAULT_MAX_LEVEL,
        }
    }

    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level.max(1);
        self
    }
}

impl LevelGenerator for Scripted {
    fn max_level(&self) -> usize {
        self.max_level
    }

    fn height(&mut self) -> usize {
        if self.heights.is_empty() {
            return 1;
        }
        let height = self.heights[self.cursor % self.heights.len()];
        self.cursor += 1;
        height.clamp(1, self.max_level)
    }
}

/// Promotion settings for a skip list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Cap on tower height and level count
    #[serde(default = "default_max_level")]
    pub max_level: usize,
    /// Promotion probability denominator
    #[serde(default = "default_skip_factor")]
    pub skip_factor: u32,
    /// Fixed seed; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_max_level() -> usize {
    DEFAULT_MAX_LEVEL
}

fn default_skip_factor() -> u32 {
    DEFAULT_SKIP_FACTOR
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            skip_factor: DEFAULT_SKIP_FACTOR,
            seed: None,
        }
    }
}

impl LevelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn with_skip_factor(mut self, skip_factor: u32) -> Self {
        self.skip_factor = skip_factor;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), LevelConfigError> {
        validate(self.skip_factor, self.max_level)
    }

    /// Build the coin-flip generator these settings describe.
    pub fn build(&self) -> Result<CoinFlip, LevelConfigError> {
        match self.seed {
            Some(seed) => CoinFlip::seeded(seed, self.skip_factor, self.max_level),
            None => CoinFlip::new(self.skip_factor, self.max_level),
        }
    }
}

fn validate(skip_factor: u32, max_level: usize) -> Result<(), LevelConfigError> {
    if max_level == 0 || max_level > MAX_LEVEL_LIMIT {
        return Err(LevelConfigError::InvalidMaxLevel(max_level));
    }
    if skip_factor < 2 {
        return Err(LevelConfigError::InvalidSkipFactor(skip_factor));
    }
    Ok(())
}
