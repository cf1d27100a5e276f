use alloc::collections::VecDeque;
use hashbrown::HashSet;
use ndarray::Array2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
/// - any -> Playing, only through a restart
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Up-to-8 neighbor indices of a cell.
pub type Neighbors = SmallVec<[CellIndex; 8]>;

/// Owns one board: its mines, the player-visible cells and the game status.
///
/// All mutation goes through [`reveal`](Self::reveal),
/// [`toggle_flag`](Self::toggle_flag) and [`restart`](Self::restart); a
/// renderer reads the result back with [`snapshot`](Self::snapshot).
#[derive(Clone, Debug)]
pub struct BoardEngine {
    config: GameConfig,
    sampling: Sampling,
    seeds: SmallRng,
    mines: MineSet,
    board: Array2<Cell>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    status: GameStatus,
    triggered_mine: Option<CellIndex>,
}

impl BoardEngine {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_sampling(config, seed, Sampling::default())
    }

    pub fn with_sampling(config: GameConfig, seed: u64, sampling: Sampling) -> Result<Self> {
        config.validate()?;
        let mut seeds = SmallRng::seed_from_u64(seed);
        let mines = RandomMineGenerator::new(seeds.next_u64(), sampling).generate(config);
        Ok(Self::from_parts(config, sampling, seeds, mines))
    }

    /// Starts a board on an explicit mine layout.
    ///
    /// The stored config requests as many mines as `mines` holds samples, so
    /// a later restart draws the same amount.
    pub fn with_mines(config: GameConfig, mines: MineSet) -> Result<Self> {
        config.validate()?;
        if mines.size() != config.size() {
            return Err(GameError::InvalidConfig(
                "mine layout does not match board size",
            ));
        }
        let config = GameConfig {
            mine_count: mines.len(),
            ..config
        };
        Ok(Self::from_parts(
            config,
            Sampling::default(),
            SmallRng::seed_from_u64(0),
            mines,
        ))
    }

    fn from_parts(config: GameConfig, sampling: Sampling, seeds: SmallRng, mines: MineSet) -> Self {
        let mut engine = Self {
            config,
            sampling,
            seeds,
            mines,
            board: Array2::default(config.size().to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
            status: Default::default(),
            triggered_mine: None,
        };
        engine.start();
        engine
    }

    fn start(&mut self) {
        log::debug!(
            "New {}x{} board, {} mines requested, {} distinct",
            self.config.rows,
            self.config.cols,
            self.config.mine_count,
            self.mines.distinct_count()
        );
        if self.safe_cell_count() == 0 {
            log::debug!("Board has no safe cells, won without a move");
            self.end_game(true);
        }
    }

    /// Discards the current board and starts over with freshly sampled mines.
    ///
    /// Legal in any status. A new `config` replaces the current one; an
    /// invalid one is rejected and the running board is left untouched.
    pub fn restart(&mut self, config: Option<GameConfig>) -> Result<()> {
        let config = config.unwrap_or(self.config);
        config.validate()?;

        let mines = RandomMineGenerator::new(self.seeds.next_u64(), self.sampling).generate(config);
        self.config = config;
        self.mines = mines;
        self.board = Array2::default(config.size().to_nd_index());
        self.revealed_count = 0;
        self.flagged_count = 0;
        self.status = GameStatus::Playing;
        self.triggered_mine = None;
        self.start();
        Ok(())
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn mines(&self) -> &MineSet {
        &self.mines
    }

    pub fn has_mine_at(&self, index: CellIndex) -> bool {
        self.mines.contains(index)
    }

    pub fn cell_at(&self, index: CellIndex) -> Result<Cell> {
        let index = self.config.check_index(index)?;
        Ok(self.cell(index))
    }

    /// Index of the mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<CellIndex> {
        self.triggered_mine
    }

    pub fn flags_placed(&self) -> CellCount {
        self.flagged_count
    }

    pub fn mines_left(&self) -> isize {
        (self.mines.distinct_count() as isize) - (self.flagged_count as isize)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.config.total_cells() - self.mines.distinct_count()
    }

    pub fn neighbors(&self, index: CellIndex) -> Result<Neighbors> {
        let index = self.config.check_index(index)?;
        Ok(self.config.iter_neighbors(index).collect())
    }

    pub fn adjacent_mine_count(&self, index: CellIndex) -> Result<u8> {
        let index = self.config.check_index(index)?;
        Ok(self.count_adjacent_mines(index))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            rows: self.config.rows,
            cols: self.config.cols,
            cells: self.board.iter().copied().collect(),
            status: self.status,
        }
    }

    pub fn toggle_flag(&mut self, index: CellIndex) -> Result<FlagOutcome> {
        use Cell::*;
        use FlagOutcome::*;

        let index = self.config.check_index(index)?;
        self.check_playing()?;

        let slot = &mut self.board[self.config.coords(index).to_nd_index()];
        Ok(match *slot {
            Hidden => {
                *slot = Flagged;
                self.flagged_count += 1;
                Changed
            }
            Flagged => {
                *slot = Hidden;
                self.flagged_count -= 1;
                Changed
            }
            Revealed(_) | RevealedMine => NoChange,
        })
    }

    /// Reveals a hidden cell, cascading through connected empty cells.
    ///
    /// Flagged and already revealed cells are left alone.
    pub fn reveal(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        let index = self.config.check_index(index)?;
        self.check_playing()?;

        if self.cell(index) != Cell::Hidden {
            return Ok(RevealOutcome::NoChange);
        }

        if self.mines.contains(index) {
            log::debug!("Mine hit at {}", index);
            self.triggered_mine = Some(index);
            self.set_cell(index, Cell::RevealedMine);
            self.end_game(false);
            return Ok(RevealOutcome::Lost);
        }

        self.reveal_safe_region(index);

        if self.revealed_count == self.safe_cell_count() {
            self.end_game(true);
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    /// Shows every mine, leaving safe cells as they are.
    ///
    /// Only legal once the game is over; mines stay hidden while playing.
    pub fn reveal_all_mines(&mut self) -> Result<()> {
        if self.status.is_playing() {
            return Err(GameError::InvalidOperation);
        }
        self.show_mines();
        Ok(())
    }

    fn show_mines(&mut self) {
        let Self {
            config,
            mines,
            board,
            flagged_count,
            ..
        } = self;

        for index in mines.iter_distinct() {
            let slot = &mut board[config.coords(index).to_nd_index()];
            if *slot == Cell::Flagged {
                *flagged_count -= 1;
            }
            *slot = Cell::RevealedMine;
        }
    }

    fn reveal_safe_region(&mut self, index: CellIndex) {
        let adjacent_mines = self.count_adjacent_mines(index);
        self.open(index, adjacent_mines);
        log::debug!("Revealed cell {}, adjacent mines: {}", index, adjacent_mines);

        if adjacent_mines > 0 {
            return;
        }

        let mut visited = HashSet::new();
        visited.insert(index);
        let mut to_visit: VecDeque<_> = self.config.iter_neighbors(index).collect();
        log::trace!("Starting flood fill from {}, initial neighbors: {:?}", index, to_visit);

        while let Some(visit_index) = to_visit.pop_front() {
            if !visited.insert(visit_index) {
                continue;
            }

            // skip flagged or already revealed cells
            if self.cell(visit_index) != Cell::Hidden || self.mines.contains(visit_index) {
                log::trace!("Skipping cell {}", visit_index);
                continue;
            }

            let visit_adjacent_mines = self.count_adjacent_mines(visit_index);
            self.open(visit_index, visit_adjacent_mines);
            log::trace!(
                "Flood revealed cell {}, adjacent mines: {}",
                visit_index,
                visit_adjacent_mines
            );

            if visit_adjacent_mines == 0 {
                to_visit.extend(
                    self.config
                        .iter_neighbors(visit_index)
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.status.is_finished() {
            return;
        }

        self.status = if won {
            GameStatus::Won
        } else {
            GameStatus::Lost
        };
        if won {
            self.triggered_mine = None;
        }
        log::debug!(
            "Game over ({:?}), {} of {} safe cells revealed",
            self.status,
            self.revealed_count,
            self.safe_cell_count()
        );
        self.show_mines();
    }

    fn count_adjacent_mines(&self, index: CellIndex) -> u8 {
        let count = self
            .config
            .iter_neighbors(index)
            .filter(|&pos| self.mines.contains(pos))
            .count();
        // at most 8 neighbors
        count as u8
    }

    fn open(&mut self, index: CellIndex, adjacent_mines: u8) {
        self.set_cell(index, Cell::Revealed(adjacent_mines));
        self.revealed_count += 1;
    }

    fn cell(&self, index: CellIndex) -> Cell {
        self.board[self.config.coords(index).to_nd_index()]
    }

    fn set_cell(&mut self, index: CellIndex, cell: Cell) {
        self.board[self.config.coords(index).to_nd_index()] = cell;
    }

    fn check_playing(&self) -> Result<()> {
        if self.status.is_playing() {
            Ok(())
        } else {
            Err(GameError::InvalidOperation)
        }
    }
}
