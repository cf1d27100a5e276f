use serde::{Deserialize, Serialize};

/// Player-visible value of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Hidden,
    Flagged,
    /// Revealed safe cell showing how many mines surround it.
    Revealed(u8),
    /// Revealed mine, only shown once the game is over.
    RevealedMine,
}

impl Cell {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }

    pub const fn is_revealed(self) -> bool {
        !self.is_unrevealed()
    }
}
