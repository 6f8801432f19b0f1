use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Uniformly random placement. The first revealed cell is kept safe, nothing else is guaranteed.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator {
    rng: SmallRng,
}

impl RandomMinefieldGenerator {
    /// Reproducible layouts: the same seed and sequence of games yields the same boards.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }
}

impl Default for RandomMinefieldGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(&mut self, config: &GameConfig, excluded: Option<Coord2>) -> Result<Board> {
        Board::with_random_mines(config, excluded, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::new(9, 9, 10).unwrap();

        let first = RandomMinefieldGenerator::new(99).generate(&config, Some((4, 4))).unwrap();
        let second = RandomMinefieldGenerator::new(99).generate(&config, Some((4, 4))).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn successive_games_differ() {
        let config = GameConfig::new(16, 16, 40).unwrap();
        let mut generator = RandomMinefieldGenerator::new(1);

        let first = generator.generate(&config, None).unwrap();
        let second = generator.generate(&config, None).unwrap();

        assert_ne!(first, second);
        assert_eq!(second.mine_count(), 40);
    }
}
