use serde::{Deserialize, Serialize};

use crate::{Coord, Coord2};

/// Player-visible status of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellStatus {
    Hidden,
    Flagged,
    Revealed,
}

impl CellStatus {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }
}

impl Default for CellStatus {
    fn default() -> Self {
        Self::Hidden
    }
}

/// One position on the board. Cells are values: changes produce a new `Cell` that replaces the old one in the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub row: Coord,
    pub column: Coord,
    pub status: CellStatus,
    pub is_mine: bool,
}

impl Cell {
    pub const fn hidden((row, column): Coord2) -> Self {
        Self {
            row,
            column,
            status: CellStatus::Hidden,
            is_mine: false,
        }
    }

    pub const fn coords(self) -> Coord2 {
        (self.row, self.column)
    }

    #[must_use]
    pub const fn with_status(self, status: CellStatus) -> Self {
        Self { status, ..self }
    }

    #[must_use]
    pub const fn with_mine(self, is_mine: bool) -> Self {
        Self { is_mine, ..self }
    }

    /// Safe to consider cleared: revealed, or a mine that never needs revealing.
    pub const fn is_cleared(self) -> bool {
        self.status.is_revealed() || self.is_mine
    }
}
