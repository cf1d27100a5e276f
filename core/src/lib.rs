#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::RangeInclusive;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod snapshot;
mod types;

/// Board shape and requested mine count, fixed for the lifetime of one board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Dim,
    pub cols: Dim,
    pub mine_count: CellCount,
}

impl GameConfig {
    pub const DEFAULT_ROWS: Dim = 10;
    pub const DEFAULT_COLS: Dim = 10;
    pub const DEFAULT_MINES: CellCount = 10;

    /// Largest board (and largest mine request) a config may describe.
    pub const MAX_CELLS: CellCount = u16::MAX as CellCount;

    /// Mine counts offered to the player when picking a configuration.
    pub const MINE_COUNT_RANGE: RangeInclusive<CellCount> = 5..=20;

    pub const fn new_unchecked(rows: Dim, cols: Dim, mine_count: CellCount) -> Self {
        Self {
            rows,
            cols,
            mine_count,
        }
    }

    pub fn new(rows: Dim, cols: Dim, mine_count: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(rows, cols, mine_count);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::InvalidConfig("rows and cols must be positive"));
        }
        match self.rows.checked_mul(self.cols) {
            Some(total) if total <= Self::MAX_CELLS => {}
            _ => return Err(GameError::InvalidConfig("board has too many cells")),
        }
        if self.mine_count > Self::MAX_CELLS {
            return Err(GameError::InvalidConfig("too many mines requested"));
        }
        Ok(())
    }

    /// Same board shape with `mine_count` clamped into [`Self::MINE_COUNT_RANGE`].
    pub fn with_clamped_mines(self, mine_count: CellCount) -> Self {
        let mine_count = mine_count.clamp(
            *Self::MINE_COUNT_RANGE.start(),
            *Self::MINE_COUNT_RANGE.end(),
        );
        Self { mine_count, ..self }
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        self.rows.saturating_mul(self.cols)
    }

    pub fn check_index(&self, index: CellIndex) -> Result<CellIndex> {
        if index < self.total_cells() {
            Ok(index)
        } else {
            Err(GameError::OutOfRange {
                index,
                total: self.total_cells(),
            })
        }
    }

    pub const fn coords(&self, index: CellIndex) -> Coord2 {
        to_coords(index, self.cols)
    }

    pub const fn index(&self, coords: Coord2) -> CellIndex {
        to_index(coords, self.cols)
    }

    /// Neighbors of an index already known to be in range.
    pub(crate) fn iter_neighbors(&self, index: CellIndex) -> NeighborIter {
        NeighborIter::new(index, self.size())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(Self::DEFAULT_ROWS, Self::DEFAULT_COLS, Self::DEFAULT_MINES)
    }
}

/// Mine positions for one board.
///
/// Keeps the raw samples exactly as drawn, duplicates included, next to a
/// per-cell mask. All gameplay questions (adjacency, win check) go through the
/// mask, so an index sampled twice is still a single mine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineSet {
    samples: Vec<CellIndex>,
    mine_mask: Array2<bool>,
    distinct_count: CellCount,
}

impl MineSet {
    pub fn from_indices(config: GameConfig, indices: &[CellIndex]) -> Result<Self> {
        config.validate()?;
        for &index in indices {
            config.check_index(index)?;
        }
        Ok(Self::from_samples(config, indices.to_vec()))
    }

    /// Builds the mask from samples already known to be in range.
    pub(crate) fn from_samples(config: GameConfig, samples: Vec<CellIndex>) -> Self {
        let mut mine_mask: Array2<bool> = Array2::default(config.size().to_nd_index());
        let mut distinct_count = 0;
        for &index in &samples {
            let slot = &mut mine_mask[config.coords(index).to_nd_index()];
            if !*slot {
                *slot = true;
                distinct_count += 1;
            }
        }
        Self {
            samples,
            mine_mask,
            distinct_count,
        }
    }

    pub fn size(&self) -> Coord2 {
        self.mine_mask.dim()
    }

    /// Number of samples drawn, which is the requested mine count.
    pub fn len(&self) -> CellCount {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[CellIndex] {
        &self.samples
    }

    /// Number of cells that actually hold a mine.
    pub fn distinct_count(&self) -> CellCount {
        self.distinct_count
    }

    pub fn contains(&self, index: CellIndex) -> bool {
        let (rows, cols) = self.size();
        index < rows * cols && self.mine_mask[to_coords(index, cols).to_nd_index()]
    }

    /// Distinct mine indices in row-major order.
    pub fn iter_distinct(&self) -> impl Iterator<Item = CellIndex> + '_ {
        let cols = self.size().1;
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(move |(coords, _)| to_index(coords, cols))
    }
}

/// Which terminal transition the caller should announce.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    GameOver,
    Victory,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Lost,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            Lost => true,
            Won => true,
        }
    }

    pub const fn notification(self) -> Option<Notification> {
        match self {
            Self::Lost => Some(Notification::GameOver),
            Self::Won => Some(Notification::Victory),
            Self::NoChange | Self::Revealed => None,
        }
    }
}
