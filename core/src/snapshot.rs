use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only copy of everything a renderer needs to redraw the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub rows: Dim,
    pub cols: Dim,
    /// Row-major cell values, `rows * cols` long.
    pub cells: Vec<Cell>,
    pub status: GameStatus,
}

impl Snapshot {
    pub fn cell(&self, index: CellIndex) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols.max(1))
    }

    pub fn revealed_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_revealed()).count()
    }

    /// Full rescan of the win condition: every cell is revealed or holds a mine.
    pub fn all_safe_revealed(&self, mines: &MineSet) -> bool {
        self.cells
            .iter()
            .enumerate()
            .all(|(index, cell)| cell.is_revealed() || mines.contains(index))
    }
}
