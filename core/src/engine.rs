use chrono::{DateTime, Utc};
use core::ops::BitOr;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::*;

/// Board and start time shared by every in-progress phase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub board: Board,
    pub started_at: DateTime<Utc>,
}

/// Valid transitions:
/// - NotStarted -> Unrevealed (first reveal or flag)
/// - Unrevealed -> HitMine
/// - any -> NotStarted (reset)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    /// No board yet, mines are placed on the first interaction
    NotStarted,
    /// Mines placed and no mine revealed, the board may already be cleared
    Unrevealed {
        round: Round,
        /// First time every safe cell was revealed, stops the clock
        cleared_at: Option<DateTime<Utc>>,
    },
    /// A mine was revealed and the game is lost
    HitMine {
        round: Round,
        mine: Coord2,
        hit_at: DateTime<Utc>,
    },
}

impl GameState {
    pub const fn is_initial(&self) -> bool {
        matches!(self, Self::NotStarted)
    }

    pub const fn round(&self) -> Option<&Round> {
        match self {
            Self::NotStarted => None,
            Self::Unrevealed { round, .. } => Some(round),
            Self::HitMine { round, .. } => Some(round),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Result of a flag toggle or a reset.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Result of a reveal. Later variants take precedence when several reveals are merged.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Won,
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.max(rhs)
    }
}

/// Commands accepted by [`Engine::dispatch`], each addressing a `(row, column)` cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Reveal(Coord2),
    RevealSurrounding(Coord2),
    ToggleFlag(Coord2),
    Reset,
}

/// Owns the configuration and the authoritative [`GameState`], and applies commands to it.
///
/// Commands that reference cells outside the board fail with [`GameError::InvalidCoords`] and leave the state as it
/// was. Everything else that happens during ordinary play (clicking a flagged cell, chording with the wrong number of
/// flags, acting after a loss) is a no-op reported as `NoChange`.
#[derive(Clone, Debug)]
pub struct Engine<G = RandomMinefieldGenerator> {
    config: GameConfig,
    state: GameState,
    placeholder: Board,
    generator: G,
}

impl Engine {
    /// Engine with randomly placed mines.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_generator(config, RandomMinefieldGenerator::from_entropy())
    }
}

impl<G: MinefieldGenerator> Engine<G> {
    pub fn with_generator(config: GameConfig, generator: G) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: GameState::NotStarted,
            placeholder: Board::empty(config.size()),
            generator,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current board, or an empty one of the configured size before the game starts.
    pub fn cells(&self) -> &Board {
        self.state
            .round()
            .map_or(&self.placeholder, |round| &round.board)
    }

    /// Applies `command` at the current wall-clock time. Returns whether the state changed.
    pub fn dispatch(&mut self, command: Command) -> Result<bool> {
        self.dispatch_at(command, Utc::now())
    }

    /// Applies `command` as if it happened at `now`.
    pub fn dispatch_at(&mut self, command: Command, now: DateTime<Utc>) -> Result<bool> {
        Ok(match command {
            Command::Reveal(coords) => self.reveal_at(coords, now)?.has_update(),
            Command::RevealSurrounding(coords) => self.reveal_surrounding_at(coords, now)?.has_update(),
            Command::ToggleFlag(coords) => self.toggle_flag_at(coords, now)?.has_update(),
            Command::Reset => self.reset().has_update(),
        })
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.reveal_at(coords, Utc::now())
    }

    pub fn reveal_surrounding(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.reveal_surrounding_at(coords, Utc::now())
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.toggle_flag_at(coords, Utc::now())
    }

    /// Reveals a hidden cell, flood-filling through cells without adjacent mines.
    ///
    /// The first reveal of a game places the mines, keeping this cell safe.
    pub fn reveal_at(&mut self, coords: Coord2, now: DateTime<Utc>) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        if self.state.is_initial() {
            self.start(Some(coords), now)?;
        }
        Ok(self.reveal_cell(coords, now))
    }

    /// Chord: reveals every neighbor of a revealed cell once as many neighbors are flagged as there are adjacent
    /// mines.
    pub fn reveal_surrounding_at(&mut self, coords: Coord2, now: DateTime<Utc>) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        let GameState::Unrevealed { round, .. } = &self.state else {
            return Ok(RevealOutcome::NoChange);
        };

        let board = &round.board;
        if !board[coords].status.is_revealed() {
            return Ok(RevealOutcome::NoChange);
        }
        let mine_count = board.count_neighbors_where(coords, |cell| cell.is_mine);
        let flag_count = board.count_neighbors_where(coords, |cell| cell.status.is_flagged());
        if mine_count != flag_count {
            log::trace!(
                "Chord at {:?} ignored, {} mines but {} flags around",
                coords,
                mine_count,
                flag_count
            );
            return Ok(RevealOutcome::NoChange);
        }

        let mut outcome = RevealOutcome::NoChange;
        for neighbor in board.iter_neighbors(coords) {
            outcome = outcome | self.reveal_cell(neighbor, now);
            if outcome == RevealOutcome::HitMine {
                break;
            }
        }
        Ok(outcome)
    }

    /// Toggles a flag on an unrevealed cell. Flagging before the first reveal starts the game without any safe-cell
    /// guarantee.
    pub fn toggle_flag_at(&mut self, coords: Coord2, now: DateTime<Utc>) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        if self.state.is_initial() {
            self.start(None, now)?;
        }

        let GameState::Unrevealed { round, .. } = &mut self.state else {
            return Ok(MarkOutcome::NoChange);
        };

        let next = match round.board[coords].status {
            CellStatus::Hidden => CellStatus::Flagged,
            CellStatus::Flagged => CellStatus::Hidden,
            CellStatus::Revealed => return Ok(MarkOutcome::NoChange),
        };
        round.board.replace(coords, |cell| cell.with_status(next));
        log::trace!("Cell {:?} is now {:?}", coords, next);
        Ok(MarkOutcome::Changed)
    }

    /// Drops the current board, the next interaction starts a fresh game.
    pub fn reset(&mut self) -> MarkOutcome {
        if self.state.is_initial() {
            return MarkOutcome::NoChange;
        }
        log::debug!("Game reset");
        self.state = GameState::NotStarted;
        MarkOutcome::Changed
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        grid::validate_coords(self.config.size(), coords)
    }

    /// Places the mines and moves to `Unrevealed`.
    fn start(&mut self, excluded: Option<Coord2>, now: DateTime<Utc>) -> Result<()> {
        let board = self.generator.generate(&self.config, excluded)?;
        if board.size() != self.config.size() || board.mine_count() != self.config.mines {
            return Err(GameError::SizeMismatch);
        }
        log::debug!("Game started at {}", now);
        self.state = GameState::Unrevealed {
            round: Round {
                board,
                started_at: now,
            },
            cleared_at: None,
        };
        Ok(())
    }

    /// Reveals one cell and cascades through zero cells. `coords` must already be validated.
    fn reveal_cell(&mut self, coords: Coord2, now: DateTime<Utc>) -> RevealOutcome {
        let GameState::Unrevealed { round, cleared_at } = &mut self.state else {
            return RevealOutcome::NoChange;
        };
        let board = &mut round.board;

        if !board[coords].status.is_hidden() {
            return RevealOutcome::NoChange;
        }
        let cell = board.replace(coords, |cell| cell.with_status(CellStatus::Revealed));

        if cell.is_mine {
            log::debug!("Mine hit at {:?}", coords);
            let state = core::mem::take(&mut self.state);
            if let GameState::Unrevealed { round, .. } = state {
                self.state = GameState::HitMine {
                    round,
                    mine: coords,
                    hit_at: now,
                };
            }
            return RevealOutcome::HitMine;
        }

        let mut to_visit = VecDeque::from([coords]);
        while let Some(visit_coords) = to_visit.pop_front() {
            let adjacent_mines = board.count_neighbors_where(visit_coords, |cell| cell.is_mine);
            log::trace!("Revealed {:?}, adjacent mines: {}", visit_coords, adjacent_mines);
            if adjacent_mines > 0 {
                continue;
            }

            // neighbors of a zero cell are never mines, flags are left alone
            for neighbor in board.iter_neighbors(visit_coords) {
                if board[neighbor].status.is_hidden() {
                    board.replace(neighbor, |cell| cell.with_status(CellStatus::Revealed));
                    to_visit.push_back(neighbor);
                }
            }
        }

        if board.all_safe_cells_revealed() {
            if cleared_at.is_none() {
                log::debug!("Board cleared at {}", now);
                *cleared_at = Some(now);
            }
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }
}
