//! Terminal input.
//!
//! Maps `crossterm` key events onto [`InputAction`](types::InputAction)s and
//! tracks which keys are down, producing the per-tick
//! [`InputFrame`](tick_tetris_core::InputFrame) the session scheduler consumes.

pub mod map;
pub mod tracker;

pub use tick_tetris_types as types;

pub use map::{is_restart, map_key, should_quit};
pub use tracker::KeyTracker;
