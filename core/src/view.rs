use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::*;

/// Effective status of a game, always recomputed from the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    NotStarted,
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// Whether a play-time display should keep polling.
    pub const fn is_ticking(self) -> bool {
        matches!(self, Self::Playing)
    }
}

impl GameState {
    pub fn status(&self) -> GameStatus {
        match self {
            Self::NotStarted => GameStatus::NotStarted,
            Self::HitMine { .. } => GameStatus::Lost,
            Self::Unrevealed { round, .. } if round.board.all_safe_cells_revealed() => GameStatus::Won,
            Self::Unrevealed { .. } => GameStatus::Playing,
        }
    }

    /// Time the clock stopped at, if the game is over.
    fn ended_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::NotStarted => None,
            Self::Unrevealed { cleared_at, .. } => *cleared_at,
            Self::HitMine { hit_at, .. } => Some(*hit_at),
        }
    }
}

impl<G: MinefieldGenerator> Engine<G> {
    pub fn status(&self) -> GameStatus {
        self.state().status()
    }

    /// Mines not yet flagged. Goes negative when more cells are flagged than there are mines.
    pub fn rest_mines(&self) -> isize {
        let mines = self.config().mines as isize;
        match self.state().round() {
            None => mines,
            Some(round) => mines - round.board.flagged_count() as isize,
        }
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.state().round().map(|round| round.started_at)
    }

    /// The mine that ended the game, only set once lost.
    pub fn last_revealed_cell(&self) -> Option<Coord2> {
        match self.state() {
            GameState::HitMine { mine, .. } => Some(*mine),
            _ => None,
        }
    }

    /// Zero before the start, running while playing, frozen once won or lost.
    pub fn play_time(&self, now: DateTime<Utc>) -> TimeDelta {
        let Some(started_at) = self.started_at() else {
            return TimeDelta::zero();
        };
        let until = self.state().ended_at().unwrap_or(now);
        (until - started_at).max(TimeDelta::zero())
    }

    /// Snapshot of everything a renderer needs, sampled at `now`.
    pub fn view(&self, now: DateTime<Utc>) -> GameView {
        GameView {
            status: self.status(),
            rest_mines: self.rest_mines(),
            started_at: self.started_at(),
            play_time_ms: self.play_time(now).num_milliseconds(),
            last_revealed_cell: self.last_revealed_cell(),
            cells: self.cells().clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameView {
    pub status: GameStatus,
    pub rest_mines: isize,
    pub started_at: Option<DateTime<Utc>>,
    pub play_time_ms: i64,
    pub last_revealed_cell: Option<Coord2>,
    pub cells: Board,
}
