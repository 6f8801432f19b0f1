use crate::*;
pub use preset::*;
pub use random::*;

mod preset;
mod random;

/// Strategy for laying out mines when a game starts.
pub trait MinefieldGenerator {
    /// Produces a board for `config` with every cell hidden. When `excluded` is given, that cell must be safe.
    fn generate(&mut self, config: &GameConfig, excluded: Option<Coord2>) -> Result<Board>;
}
