//! Terminal presentation.
//!
//! The session is drawn from a [`SessionSnapshot`](core::SessionSnapshot)
//! into a plain framebuffer, which the renderer then diffs against the frame
//! already on screen. Only the renderer touches the terminal.

pub mod board_view;
pub mod fb;
pub mod renderer;

pub use tick_tetris_core as core;
pub use tick_tetris_types as types;

pub use board_view::{BoardView, Viewport, WellLayout};
pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use renderer::{changed_runs, encode_changes, encode_full, TerminalRenderer};
