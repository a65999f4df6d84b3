//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **no dependency** on the terminal, input devices or audio output, making it:
//!
//! - **Deterministic**: Same seed produces identical piece sequences
//! - **Testable**: Unit tests for every rule and phase transition
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//! - **Fast**: Zero-allocation hot paths for game tick processing
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 game board (plus two hidden spawn rows) with collision and line clearing
//! - [`game_state`]: Complete game state and the phase machine
//! - [`pieces`]: Tetromino shape matrices, clockwise rotation and spawn positions
//! - [`rng`]: 7-bag random piece generation for fair distribution
//! - [`scoring`]: Points per lock, level thresholds and fall speed
//! - [`snapshot`]: Read-only view handed to renderers
//! - [`audio`]: Sound cues and per-level music selection
//! - [`config`]: JSON game configuration
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: Every seven consecutive pieces contain each kind once
//! - **Simple Rotation**: Clockwise only, in place, no wall kicks
//! - **Gravity**: The active piece drops one row every `fall_interval` frames
//! - **Scoring**: 10 points per locked piece plus 100 per cleared line
//! - **Levels**: Reaching the score threshold pauses on a level-up screen;
//!   continuing past the last level wins the game
//!
//! # Example
//!
//! ```
//! use tui_tetromino_core::GameState;
//! use tui_tetromino_types::{GameAction, Phase};
//!
//! let mut game = GameState::new(12345);
//! assert_eq!(game.phase(), Phase::Playing);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//!
//! // Soft drop until the first piece locks
//! while game.score() == 0 {
//!     game.apply_action(GameAction::SoftDrop);
//! }
//! assert_eq!(game.score(), 10);
//! ```
//!
//! # Timing
//!
//! The game uses a fixed timestep system:
//! - **Tick Rate**: 16ms (approximately 60 FPS)
//! - **Gravity**: `max(5, 35 - 4 * level)` frames per row
//!
//! Call [`GameState::tick`](game_state::GameState::tick) once per frame.

pub mod audio;
pub mod board;
pub mod config;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tui_tetromino_types as types;

// Re-export commonly used types for convenience
pub use audio::{AudioDirector, AudioSink, SoundCue, Soundtrack, TrackId};
pub use board::{Board, Placement};
pub use config::GameConfig;
pub use game_state::GameState;
pub use pieces::{rotate, Shape, Tetromino};
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{calculate_lock_score, fall_interval, next_level_threshold};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
