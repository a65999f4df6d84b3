//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, audio cues).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 visible rows (indexed 0-19)
//! - **Hidden rows**: 2 rows above the visible area (indexed -2 and -1) so that
//!   tall pieces can spawn off-screen
//!
//! # Progression Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval (~60 FPS), one engine tick per frame |
//! | `FALL_INTERVAL_BASE` | 35 | Frames per row before level adjustment |
//! | `FALL_INTERVAL_LEVEL_STEP` | 4 | Frames shaved off per level |
//! | `FALL_INTERVAL_FLOOR` | 5 | Fastest fall interval |
//! | `INITIAL_LEVEL_THRESHOLD` | 1000 | Score needed to leave level 1 |
//! | `PLACEMENT_SCORE` | 10 | Awarded for every locked piece |
//! | `LINE_CLEAR_SCORE` | 100 | Awarded per cleared line |
//!
//! # Examples
//!
//! ```
//! use tui_tetromino_types::{GameAction, Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! let action = GameAction::from_str("moveLeft").unwrap();
//! assert_eq!(action, GameAction::MoveLeft);
//!
//! assert!(Phase::Playing.choices().is_empty());
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Visible board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Rows above the visible area where pieces spawn
pub const HIDDEN_ROWS: u8 = 2;

/// Fixed frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Level a new game starts at
pub const INITIAL_LEVEL: u32 = 1;

/// Score needed to leave the first level
pub const INITIAL_LEVEL_THRESHOLD: u32 = 1000;

/// Flat part of the threshold raise on every level-up
pub const THRESHOLD_BASE_STEP: u32 = 1000;

/// Per-level part of the threshold raise on every level-up
pub const THRESHOLD_LEVEL_STEP: u32 = 500;

/// Frames per row-drop before the level adjustment
pub const FALL_INTERVAL_BASE: u32 = 35;

/// Frames removed from the fall interval per level
pub const FALL_INTERVAL_LEVEL_STEP: u32 = 4;

/// Lowest fall interval, in frames
pub const FALL_INTERVAL_FLOOR: u32 = 5;

/// Highest regular level; passing it wins the game
pub const DEFAULT_LEVEL_CAP: u32 = 3;

/// Points for every piece that locks
pub const PLACEMENT_SCORE: u32 = 10;

/// Points for every cleared line
pub const LINE_CLEAR_SCORE: u32 = 100;

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
/// - **O**: Yellow, 2x2 square
/// - **S**: Green, S-shaped
/// - **T**: Purple, T-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds, in the order a fresh bag is filled before shuffling
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_tetromino_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Uppercase letter used in panels and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }

    /// Non-zero grid code (1..=7) used by snapshot grids; 0 means empty.
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::T),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }
}

/// Commands consumed by the game state machine
///
/// Keyboard input and overlay button clicks both resolve to one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Move piece one cell down, locking it if it cannot move
    SoftDrop,
    /// Toggle between playing and paused
    Pause,
    /// Start over after a game over or a win
    Restart,
    /// Leave the level-up or win screen and keep playing
    Continue,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_tetromino_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("continue"), Some(GameAction::Continue));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotate" => Some(GameAction::Rotate),
            "softdrop" => Some(GameAction::SoftDrop),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            "continue" => Some(GameAction::Continue),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::Rotate => "rotate",
            GameAction::SoftDrop => "softDrop",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
            GameAction::Continue => "continue",
        }
    }
}

/// Game phase; exactly one is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Playing,
    Paused,
    LevelingUp,
    GameOver,
    Won,
}

/// A button the UI layer should offer while the engine awaits a choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuChoice {
    pub label: &'static str,
    pub action: GameAction,
}

const RESTART: MenuChoice = MenuChoice {
    label: "Restart",
    action: GameAction::Restart,
};

const CONTINUE: MenuChoice = MenuChoice {
    label: "Continue",
    action: GameAction::Continue,
};

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Playing => "playing",
            Phase::Paused => "paused",
            Phase::LevelingUp => "leveling-up",
            Phase::GameOver => "game-over",
            Phase::Won => "won",
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, Phase::Playing)
    }

    /// Buttons offered on this phase's overlay, top to bottom.
    pub fn choices(&self) -> &'static [MenuChoice] {
        match self {
            Phase::Playing | Phase::Paused => &[],
            Phase::LevelingUp => &[CONTINUE],
            Phase::GameOver => &[RESTART],
            Phase::Won => &[RESTART, CONTINUE],
        }
    }
}

/// Engine-side event, drained by audio and other observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A piece locked into the board.
    Locked { lines_cleared: u32, points: u32 },
    /// The phase changed.
    PhaseChanged { from: Phase, to: Phase },
    /// A new game started from an end screen.
    Restarted,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
pub type Cell = Option<PieceKind>;
