use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;
pub use view::*;

mod board;
mod cell;
mod engine;
mod error;
mod generator;
pub mod grid;
pub mod select;
mod types;
mod view;

/// Board dimensions and mine count for a game. Built through [`GameConfig::new`], which rejects out-of-range values
/// instead of adjusting them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub columns: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub fn new(rows: Coord, columns: Coord, mines: CellCount) -> Result<Self> {
        let config = Self {
            rows,
            columns,
            mines,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the bounds enforced by [`GameConfig::new`], for configs that arrived some other way (e.g. deserialized).
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.columns == 0 {
            return Err(GameError::EmptyBoard);
        }
        if self.mines == 0 {
            return Err(GameError::NoMines);
        }
        if self.mines > self.max_mines() {
            return Err(GameError::TooManyMines {
                requested: self.mines,
                max: self.max_mines(),
            });
        }
        Ok(())
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.columns)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.columns)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    /// At least one cell always stays safe.
    pub const fn max_mines(&self) -> CellCount {
        self.total_cells().saturating_sub(1)
    }
}
