use core::ops::Index;
use ndarray::{Array2, ArrayView1};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular grid of cells, addressed by `(row, column)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    /// All cells hidden and no mines, used as the surface before mines are placed.
    pub fn empty(size: Coord2) -> Self {
        Self {
            cells: grid::build_grid(size, Cell::hidden),
        }
    }

    /// Places `config.mines` mines at random, never on `excluded`.
    pub fn with_random_mines<R: Rng + ?Sized>(
        config: &GameConfig,
        excluded: Option<Coord2>,
        rng: &mut R,
    ) -> Result<Self> {
        let mut board = Self::empty(config.size());
        if let Some(excluded) = excluded {
            board.validate_coords(excluded)?;
        }

        let candidates: Vec<Coord2> = board
            .iter()
            .map(|cell| cell.coords())
            .filter(|&coords| Some(coords) != excluded)
            .collect();
        let mines = select::choose_without_replacement(&candidates, config.mines.into(), rng)?;
        for coords in mines {
            board.place_mine(coords);
        }

        log::debug!(
            "Placed {} mines on a {}x{} board, excluded: {:?}",
            config.mines,
            config.rows,
            config.columns,
            excluded
        );
        Ok(board)
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::empty(size);
        for &coords in mine_coords {
            board.validate_coords(coords)?;
            board.place_mine(coords);
        }
        Ok(board)
    }

    pub fn size(&self) -> Coord2 {
        // boards are only built from `Coord2` sizes
        grid::grid_size(&self.cells).unwrap_or((Coord::MAX, Coord::MAX))
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn columns(&self) -> Coord {
        self.size().1
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        grid::validate_coords(self.size(), coords)
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// One view per row, top to bottom.
    pub fn rows_iter(&self) -> impl Iterator<Item = ArrayView1<'_, Cell>> {
        self.cells.rows().into_iter()
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_mine)
    }

    pub fn flagged_count(&self) -> CellCount {
        self.count_where(|cell| cell.status.is_flagged())
    }

    pub fn revealed_count(&self) -> CellCount {
        self.count_where(|cell| cell.status.is_revealed())
    }

    pub fn surrounding_mine_count(&self, coords: Coord2) -> Result<u8> {
        let coords = self.validate_coords(coords)?;
        Ok(self.count_neighbors_where(coords, |cell| cell.is_mine))
    }

    pub fn flagged_neighbor_count(&self, coords: Coord2) -> Result<u8> {
        let coords = self.validate_coords(coords)?;
        Ok(self.count_neighbors_where(coords, |cell| cell.status.is_flagged()))
    }

    /// Whether every cell is either revealed or a mine. Flagged safe cells keep this false.
    pub fn all_safe_cells_revealed(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_cleared())
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + use<> {
        grid::neighbor_coords(self.size(), coords)
    }

    /// Replaces the cell at `coords`, which must already be validated.
    pub(crate) fn replace(&mut self, coords: Coord2, update: impl FnOnce(Cell) -> Cell) -> Cell {
        let slot = &mut self.cells[coords.to_nd_index()];
        *slot = update(*slot);
        *slot
    }

    pub(crate) fn place_mine(&mut self, coords: Coord2) {
        self.replace(coords, |cell| cell.with_mine(true));
    }

    pub(crate) fn count_neighbors_where(&self, coords: Coord2, predicate: impl Fn(&Cell) -> bool) -> u8 {
        let count = self
            .iter_neighbors(coords)
            .filter(|&pos| predicate(&self[pos]))
            .count();
        // at most 8 neighbors
        count as u8
    }

    fn count_where(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        let count = self.cells.iter().filter(|cell| predicate(cell)).count();
        CellCount::try_from(count).unwrap_or(CellCount::MAX)
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
