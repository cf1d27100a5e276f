use super::*;
use alloc::{vec, vec::Vec};
use rand::prelude::*;

/// Purely random mine placement driven by a fixed seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
    sampling: Sampling,
}

impl RandomMineGenerator {
    pub fn new(seed: u64, sampling: Sampling) -> Self {
        Self { seed, sampling }
    }

    fn sample_independent(rng: &mut SmallRng, total: CellCount, count: CellCount) -> Vec<CellIndex> {
        (0..count).map(|_| rng.random_range(0..total)).collect()
    }

    fn sample_distinct(rng: &mut SmallRng, total: CellCount, count: CellCount) -> Vec<CellIndex> {
        // optimize for full boards
        if count >= total {
            if count > total {
                log::warn!(
                    "Board already full, requested {} mines but only {} fit",
                    count,
                    total
                );
            }
            return (0..total).collect();
        }

        let mut taken = vec![false; total];
        let mut samples = Vec::with_capacity(count);
        let mut free_cells = total;
        while samples.len() < count {
            let mut place = rng.random_range(0..free_cells);
            for (i, slot) in taken.iter_mut().enumerate() {
                if *slot {
                    place += 1;
                }
                if i == place {
                    *slot = true;
                    samples.push(i);
                    free_cells -= 1;
                    break;
                }
            }
        }
        samples
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig) -> MineSet {
        let total_cells = config.total_cells();
        if total_cells == 0 {
            log::warn!("Cannot place mines on an empty board");
            return MineSet::from_samples(config, Vec::new());
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let samples = match self.sampling {
            Sampling::Independent => {
                Self::sample_independent(&mut rng, total_cells, config.mine_count)
            }
            Sampling::Distinct => Self::sample_distinct(&mut rng, total_cells, config.mine_count),
        };

        let mines = MineSet::from_samples(config, samples);
        if mines.distinct_count() != config.mine_count {
            log::warn!(
                "Generated mine count mismatch, distinct: {}, requested: {}",
                mines.distinct_count(),
                config.mine_count
            );
        }
        mines
    }
}
