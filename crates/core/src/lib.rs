//! Core simulation - board, pieces, scoring and the tick scheduler
//!
//! Everything here is deterministic and free of I/O. Time and input are
//! supplied by the caller on every tick, so a session can be driven from a
//! terminal loop, a test, or a benchmark with identical results.
//!
//! # Module Structure
//!
//! - [`board`]: fixed-size grid with hidden header rows, collision and row clearing
//! - [`pieces`]: tetromino catalog and piece transforms
//! - [`rng`]: seeded generator and 7-bag
//! - [`factory`]: spawns pieces at the board's spawn point
//! - [`scoring`]: score, level and line tracking
//! - [`timers`]: per-action cooldown stamps and the drop interval
//! - [`session`]: the game session and its per-tick scheduler
//! - [`input`]: logical input contract consumed by the scheduler
//! - [`clock`]: monotonic and manual clocks
//! - [`config`]: validated, serde-loadable session settings
//! - [`snapshot`]: read-only view for renderers
//!
//! # Example
//!
//! ```
//! use tick_tetris_core::{GameSession, InputFrame, SessionConfig, TickOutcome};
//! use tick_tetris_types::InputAction;
//!
//! let mut session = GameSession::new(SessionConfig::default(), 0.0).unwrap();
//!
//! // Gravity is due on the first tick after start.
//! let outcome = session.tick(0.016, &InputFrame::new());
//! assert_eq!(outcome, TickOutcome::Moved(InputAction::MoveDown));
//!
//! // A fresh press moves immediately, regardless of cooldown.
//! let outcome = session.tick(0.032, &InputFrame::new().press(InputAction::MoveLeft));
//! assert_eq!(outcome, TickOutcome::Moved(InputAction::MoveLeft));
//! ```

pub mod board;
pub mod clock;
pub mod config;
pub mod factory;
pub mod input;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod timers;

pub use tick_tetris_types as types;

pub use board::GridBoard;
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{BoardConfig, SessionConfig, TimingConfig};
pub use factory::PieceFactory;
pub use input::{InputFrame, InputSource};
pub use pieces::{get_shape, Piece};
pub use rng::{KindSource, SevenBag, SimpleRng};
pub use scoring::{calculate_line_score, ScoreTracker, ScoreUpdate};
pub use session::{GameSession, SessionBuilder, SessionState, TickOutcome};
pub use snapshot::{ActiveSnapshot, SessionSnapshot};
pub use timers::TimerState;
