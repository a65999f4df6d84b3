//! Read-only view of the game handed to render and audio adapters.

use crate::pieces::{Shape, Tetromino};
use crate::types::{
    MenuChoice, Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, INITIAL_LEVEL, INITIAL_LEVEL_THRESHOLD,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub row: i8,
    pub col: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            row: value.row,
            col: value.col,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Visible rows as piece codes, 0 = empty
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub next: Option<ActiveSnapshot>,
    pub phase: Phase,
    /// Buttons the overlay should offer in this phase
    pub choices: &'static [MenuChoice],
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub level_threshold: u32,
    pub fall_interval: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.phase.is_playing()
    }

    /// Level the level-up overlay announces
    pub fn pending_level(&self) -> u32 {
        match self.phase {
            Phase::LevelingUp => self.level + 1,
            _ => self.level,
        }
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: None,
            phase: Phase::Playing,
            choices: &[],
            score: 0,
            lines: 0,
            level: INITIAL_LEVEL,
            level_threshold: INITIAL_LEVEL_THRESHOLD,
            fall_interval: 0,
        }
    }
}
