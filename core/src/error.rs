use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board needs at least one row and one column")]
    EmptyBoard,
    #[error("At least one mine is required")]
    NoMines,
    #[error("Too many mines, requested {requested} but at most {max} leave a safe cell")]
    TooManyMines { requested: CellCount, max: CellCount },
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Cannot choose {requested} items out of {available}")]
    NotEnoughCandidates { requested: usize, available: usize },
    #[error("Preset minefield does not match the game configuration")]
    SizeMismatch,
}

pub type Result<T> = core::result::Result<T, GameError>;
