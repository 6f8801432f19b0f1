use super::*;

/// Fixed mine positions, for puzzles, replays and tests.
///
/// If the cell that must stay safe holds a preset mine, that mine moves to the first free cell in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetMinefieldGenerator {
    size: Coord2,
    mines: Vec<Coord2>,
}

impl PresetMinefieldGenerator {
    pub fn new(size: Coord2, mines: &[Coord2]) -> Result<Self> {
        // validates every coordinate and collapses duplicates
        let board = Board::from_mine_coords(size, mines)?;
        let mines = board
            .iter()
            .filter(|cell| cell.is_mine)
            .map(|cell| cell.coords())
            .collect();
        Ok(Self { size, mines })
    }

    pub fn mines(&self) -> &[Coord2] {
        &self.mines
    }
}

impl MinefieldGenerator for PresetMinefieldGenerator {
    fn generate(&mut self, config: &GameConfig, excluded: Option<Coord2>) -> Result<Board> {
        if config.size() != self.size || usize::from(config.mines) != self.mines.len() {
            return Err(GameError::SizeMismatch);
        }

        let mut board = Board::from_mine_coords(self.size, &self.mines)?;
        let Some(excluded) = excluded else {
            return Ok(board);
        };
        let excluded = board.validate_coords(excluded)?;
        if !board[excluded].is_mine {
            return Ok(board);
        }

        let relocated = board
            .iter()
            .map(|cell| cell.coords())
            .find(|&coords| coords != excluded && !board[coords].is_mine)
            .ok_or(GameError::TooManyMines {
                requested: config.mines,
                max: config.max_mines(),
            })?;
        log::warn!("Preset mine at {:?} moved to {:?} to keep the first cell safe", excluded, relocated);
        board.replace(excluded, |cell| cell.with_mine(false));
        board.place_mine(relocated);
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_preset_layout() {
        let config = GameConfig::new(3, 3, 2).unwrap();
        let mut generator = PresetMinefieldGenerator::new((3, 3), &[(0, 2), (2, 0)]).unwrap();

        let board = generator.generate(&config, Some((1, 1))).unwrap();

        assert!(board[(0, 2)].is_mine);
        assert!(board[(2, 0)].is_mine);
        assert_eq!(board.mine_count(), 2);
    }

    #[test]
    fn moves_mine_off_excluded_cell() {
        let config = GameConfig::new(3, 3, 2).unwrap();
        let mut generator = PresetMinefieldGenerator::new((3, 3), &[(0, 0), (0, 1)]).unwrap();

        let board = generator.generate(&config, Some((0, 0))).unwrap();

        assert!(!board[(0, 0)].is_mine);
        assert!(board[(0, 1)].is_mine);
        assert!(board[(0, 2)].is_mine);
        assert_eq!(board.mine_count(), 2);
    }

    #[test]
    fn keeps_mine_without_exclusion() {
        let config = GameConfig::new(2, 2, 1).unwrap();
        let mut generator = PresetMinefieldGenerator::new((2, 2), &[(0, 0)]).unwrap();

        assert!(generator.generate(&config, None).unwrap()[(0, 0)].is_mine);
    }

    #[test]
    fn rejects_mismatched_config() {
        let mut generator = PresetMinefieldGenerator::new((3, 3), &[(1, 1)]).unwrap();

        let wrong_size = GameConfig::new(4, 3, 1).unwrap();
        let wrong_count = GameConfig::new(3, 3, 2).unwrap();

        assert_eq!(generator.generate(&wrong_size, None), Err(GameError::SizeMismatch));
        assert_eq!(generator.generate(&wrong_count, None), Err(GameError::SizeMismatch));
    }

    #[test]
    fn rejects_out_of_range_and_collapses_duplicates() {
        assert_eq!(
            PresetMinefieldGenerator::new((2, 2), &[(2, 2)]),
            Err(GameError::InvalidCoords)
        );

        let generator = PresetMinefieldGenerator::new((2, 2), &[(1, 1), (1, 1)]).unwrap();
        assert_eq!(generator.mines(), [(1, 1)]);
    }
}
