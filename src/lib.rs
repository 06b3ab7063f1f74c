//! Tick Tetris (workspace facade crate).
//!
//! Re-exports the member crates as `tick_tetris::{core, input, term, types}`.

pub use tick_tetris_core as core;
pub use tick_tetris_input as input;
pub use tick_tetris_term as term;
pub use tick_tetris_types as types;
