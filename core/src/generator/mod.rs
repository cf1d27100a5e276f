use crate::*;
pub use random::*;

mod random;

pub trait MineGenerator {
    fn generate(self, config: GameConfig) -> MineSet;
}

/// How mine positions are drawn from the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Sampling {
    /// Every mine is an independent uniform draw; repeats are kept, so a board
    /// may end up with fewer distinct mines than requested.
    #[default]
    Independent,
    /// Draws without replacement, never exceeding the number of cells.
    Distinct,
}
