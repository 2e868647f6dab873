use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board needs at least one row and one column")]
    EmptyBoard,
    #[error("Too many mines, at least one cell must be safe")]
    TooManyMines,
}

impl GameError {
    /// Whether the error comes from an unusable board configuration rather than a bad move.
    pub const fn is_invalid_configuration(self) -> bool {
        matches!(self, Self::EmptyBoard | Self::TooManyMines)
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
