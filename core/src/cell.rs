use serde::{Deserialize, Serialize};

/// One board position.
///
/// `has_mine` and `adjacent_mines` are fixed when the grid is built. `has_flag` and
/// `is_revealed` are never both set. Only [`Grid`](crate::Grid) moves change a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) has_mine: bool,
    pub(crate) has_flag: bool,
    pub(crate) is_revealed: bool,
    pub(crate) adjacent_mines: u8,
}

impl Cell {
    pub const fn has_mine(self) -> bool {
        self.has_mine
    }

    pub const fn has_flag(self) -> bool {
        self.has_flag
    }

    pub const fn is_revealed(self) -> bool {
        self.is_revealed
    }

    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    /// Neither flagged nor revealed.
    pub const fn is_untouched(self) -> bool {
        !self.has_flag && !self.is_revealed
    }

    pub const fn is_flagged_or_revealed(self) -> bool {
        self.has_flag || self.is_revealed
    }
}

/// What a renderer should draw for a cell, given the game state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    /// The mine that ended the game.
    Exploded,
    /// Unrevealed mine, only shown after a loss.
    Mine,
    /// Flag on a safe cell, only shown after a loss.
    IncorrectFlag,
}

impl CellView {
    // whether the cell is visually closed
    pub const fn is_closed(self) -> bool {
        use CellView::*;
        match self {
            Hidden => true,
            Flagged => true,
            Revealed(_) => false,
            Exploded => false,
            Mine => false,
            IncorrectFlag => true,
        }
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
