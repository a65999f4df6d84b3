//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout libraries and instead renders into a simple
//! framebuffer that can be flushed to a terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Draw only from read-only [`core::GameSnapshot`]s
//! - Allow precise control over aspect ratio (e.g. 2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;

pub use tui_tetromino_core as core;
pub use tui_tetromino_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rect, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use render_throttle::{snapshot_fingerprint, RenderThrottle};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
