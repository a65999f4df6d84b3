//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::GameAction`] and left mouse presses into
//! [`ClickAt`] positions that the render layer resolves against its buttons.

pub mod map;

pub use tui_tetromino_types as types;

pub use map::{handle_key_event, handle_mouse_event, should_quit, ClickAt};
