//! Timed workloads, each run against `BTreeSet` and `SkipSet` on the same input.

use std::collections::BTreeSet;
use std::hint::black_box;
use std::time::Instant;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use skipset::{LevelConfig, SkipSet};

use crate::config::{BenchConfig, Workload};
use crate::log::{LogLevel, Logger};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Container {
    BTreeSet,
    SkipSet,
}

impl Container {
    pub fn name(self) -> &'static str {
        match self {
            Container::BTreeSet => "btreeset",
            Container::SkipSet => "skipset",
        }
    }
}

/// One timed measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub workload: Workload,
    pub size: usize,
    pub round: usize,
    pub container: Container,
    pub elapsed_ms: f64,
    /// Elements in the container once the workload finished
    pub elements: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_count: Option<usize>,
}

struct Runner<'a> {
    rng: StdRng,
    levels: &'a LevelConfig,
    logger: &'a Logger,
}

/// Run every configured workload, size and round in that order.
pub fn run(config: &BenchConfig, seed: u64, logger: &Logger) -> Result<Vec<Record>> {
    let mut runner = Runner {
        rng: StdRng::seed_from_u64(seed),
        levels: &config.levels,
        logger,
    };
    let mut records = Vec::new();
    for &workload in &config.workloads {
        logger.info("bench", format!("starting {}", workload.title()));
        for &size in &config.sizes {
            for round in 0..config.rounds {
                let [baseline, skip] = runner.measure(workload, size, round)?;
                logger.debug(
                    "bench",
                    format!(
                        "{} n={size} round={round}: btreeset {:.3} ms, skipset {:.3} ms",
                        workload.title(),
                        baseline.elapsed_ms,
                        skip.elapsed_ms
                    ),
                );
                records.push(baseline);
                records.push(skip);
            }
        }
    }
    Ok(records)
}

fn timed<R>(f: impl FnOnce() -> R) -> (R, f64) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed().as_secs_f64() * 1_000.0)
}

impl Runner<'_> {
    fn random_values(&mut self, n: usize) -> Vec<i32> {
        (0..n).map(|_| self.rng.random()).collect()
    }

    /// An empty skip set; unseeded level settings draw their seed from the
    /// run's generator so a seeded run is reproducible end to end.
    fn skip_set(&mut self) -> Result<SkipSet<i32>> {
        let levels = match self.levels.seed {
            Some(_) => self.levels.clone(),
            None => self.levels.clone().with_seed(self.rng.random()),
        };
        Ok(SkipSet::with_config(&levels)?)
    }

    fn measure(&mut self, workload: Workload, size: usize, round: usize) -> Result<[Record; 2]> {
        let mut skip = self.skip_set()?;
        let mut btree = BTreeSet::new();

        let (btree_ms, skip_ms) = match workload {
            Workload::Insert => {
                let values = self.random_values(size);
                let ((), btree_ms) = timed(|| {
                    for &x in &values {
                        black_box(btree.insert(x));
                    }
                });
                let ((), skip_ms) = timed(|| {
                    for &x in &values {
                        black_box(skip.insert(x));
                    }
                });
                (btree_ms, skip_ms)
            }
            Workload::Erase => {
                let values = self.random_values(size);
                let erasing = self.random_values(size);
                btree.extend(values.iter().copied());
                skip.extend(values.iter().copied());
                let ((), btree_ms) = timed(|| {
                    for x in &erasing {
                        black_box(btree.remove(x));
                    }
                });
                let ((), skip_ms) = timed(|| {
                    for x in &erasing {
                        black_box(skip.erase(x));
                    }
                });
                (btree_ms, skip_ms)
            }
            Workload::Find => {
                let values = self.random_values(size);
                let probes = self.random_values(size);
                btree.extend(values.iter().copied());
                skip.extend(values.iter().copied());
                let (btree_hits, btree_ms) =
                    timed(|| probes.iter().filter(|x| btree.contains(*x)).count());
                let (skip_hits, skip_ms) =
                    timed(|| probes.iter().filter(|x| !skip.find(*x).is_end()).count());
                if btree_hits != skip_hits {
                    anyhow::bail!(
                        "find disagrees at n={size}: btreeset hit {btree_hits}, skipset hit {skip_hits}"
                    );
                }
                (btree_ms, skip_ms)
            }
            Workload::Iterate => {
                let upper = i32::try_from(size)?;
                btree.extend(0..upper);
                skip.extend_sorted(0..upper);
                let (btree_seen, btree_ms) = timed(|| btree.iter().map(black_box).count());
                let (skip_seen, skip_ms) = timed(|| skip.iter().map(black_box).count());
                if btree_seen != skip_seen {
                    anyhow::bail!(
                        "iteration disagrees at n={size}: btreeset saw {btree_seen}, skipset saw {skip_seen}"
                    );
                }
                (btree_ms, skip_ms)
            }
        };

        if btree.len() != skip.len() {
            anyhow::bail!(
                "{} left btreeset with {} elements but skipset with {}",
                workload.title(),
                btree.len(),
                skip.len()
            );
        }
        if self.logger.enabled(LogLevel::Trace) {
            skip.check_structure()?;
            self.logger.log(
                LogLevel::Trace,
                "bench",
                format!("level lengths {:?}", skip.level_lengths()),
            );
        }

        let record = |container, elapsed_ms| Record {
            workload,
            size,
            round,
            container,
            elapsed_ms,
            elements: btree.len(),
            level_count: None,
            node_count: None,
        };
        Ok([
            record(Container::BTreeSet, btree_ms),
            Record {
                level_count: Some(skip.level_count()),
                node_count: Some(skip.node_count()),
                ..record(Container::SkipSet, skip_ms)
            },
        ])
    }
}
