//! Game-agnostic helpers over rectangular `Array2` grids.

use ndarray::Array2;

use crate::*;

/// Builds a `rows x columns` grid where the element at `(row, column)` is `factory((row, column))`.
pub fn build_grid<T>(size: Coord2, mut factory: impl FnMut(Coord2) -> T) -> Array2<T> {
    Array2::from_shape_fn(size.to_nd_index(), |(row, column)| {
        // both indices are below `size`, so they fit in `Coord`
        factory((row as Coord, column as Coord))
    })
}

/// Builds a grid from nested rows, rejecting empty and ragged input.
pub fn from_rows<T>(rows: Vec<Vec<T>>) -> Result<Array2<T>> {
    let row_count = rows.len();
    let column_count = rows.first().map_or(0, Vec::len);
    if row_count == 0 || column_count == 0 {
        return Err(GameError::InvalidCoords);
    }
    if rows.iter().any(|row| row.len() != column_count) {
        return Err(GameError::InvalidBoardShape);
    }
    if Coord::try_from(row_count).is_err() || Coord::try_from(column_count).is_err() {
        return Err(GameError::InvalidBoardShape);
    }

    let flat: Vec<T> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((row_count, column_count), flat).map_err(|_| GameError::InvalidBoardShape)
}

/// Size of `grid` as `(rows, columns)`.
pub fn grid_size<T>(grid: &Array2<T>) -> Result<Coord2> {
    let (rows, columns) = grid.dim();
    let rows = Coord::try_from(rows).map_err(|_| GameError::InvalidBoardShape)?;
    let columns = Coord::try_from(columns).map_err(|_| GameError::InvalidBoardShape)?;
    Ok((rows, columns))
}

/// Checks that `coords` lies inside a grid of `size`.
pub fn validate_coords(size: Coord2, coords: Coord2) -> Result<Coord2> {
    if coords.0 < size.0 && coords.1 < size.1 {
        Ok(coords)
    } else {
        Err(GameError::InvalidCoords)
    }
}

/// Positions touching `center` by edge or corner inside a grid of `size`, row by row, `center` excluded.
///
/// `center` must already be inside `size`.
pub fn neighbor_coords(size: Coord2, center: Coord2) -> impl Iterator<Item = Coord2> + use<> {
    let (rows, columns) = size;
    let (row, column) = center;
    let row_span = row.saturating_sub(1)..=row.saturating_add(1).min(rows.saturating_sub(1));
    let column_span = column.saturating_sub(1)..=column.saturating_add(1).min(columns.saturating_sub(1));
    row_span
        .flat_map(move |r| column_span.clone().map(move |c| (r, c)))
        .filter(move |&pos| pos != center)
}

/// The up to 8 elements touching `coords` by edge or corner, paired with their position.
///
/// Fails with [`GameError::InvalidCoords`] when `coords` is outside the grid, which includes every position of an
/// empty grid.
pub fn neighbors_with_coords<T: Clone>(grid: &Array2<T>, coords: Coord2) -> Result<Vec<(Coord2, T)>> {
    let size = grid_size(grid)?;
    let coords = validate_coords(size, coords)?;
    Ok(neighbor_coords(size, coords)
        .map(|pos| (pos, grid[pos.to_nd_index()].clone()))
        .collect())
}

/// The up to 8 elements touching `coords` by edge or corner.
pub fn neighbors<T: Clone>(grid: &Array2<T>, coords: Coord2) -> Result<Vec<T>> {
    Ok(neighbors_with_coords(grid, coords)?
        .into_iter()
        .map(|(_, value)| value)
        .collect())
}
