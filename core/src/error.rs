use thiserror::Error;

use crate::{CellCount, CellIndex};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Cell {index} is out of range for a board of {total} cells")]
    OutOfRange { index: CellIndex, total: CellCount },
    #[error("Game already ended, no new moves are accepted")]
    InvalidOperation,
    #[error("Invalid board configuration: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = core::result::Result<T, GameError>;
