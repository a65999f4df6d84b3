//! tui-tetromino (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` as
//! `tui_tetromino::{core,input,term,types}` so the binary, integration tests
//! and benches share one import path.

pub use tui_tetromino_core as core;
pub use tui_tetromino_input as input;
pub use tui_tetromino_term as term;
pub use tui_tetromino_types as types;
