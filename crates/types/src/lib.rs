//! Core types module - shared data structures and tuning constants
//!
//! Everything here is plain data with no game logic, so it can be shared by the
//! simulation core, the input mapper and the terminal renderer alike.
//!
//! # Board geometry
//!
//! The grid is stored top-down: row 0 is the topmost row and y grows toward the
//! floor. The top [`BOARD_HEADER_ROWS`] rows are a hidden buffer that pieces
//! spawn into; a piece that cannot descend while touching that region ends the
//! game instead of landing.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BOARD_WIDTH` | 10 | Columns |
//! | `BOARD_HEIGHT` | 22 | Rows including the hidden header |
//! | `BOARD_HEADER_ROWS` | 2 | Hidden spawn rows at the top |
//! | `VISIBLE_HEIGHT` | 20 | Rows shown to the player |
//!
//! # Timing
//!
//! All times are seconds (`f64`) read from a monotonic clock. Key-repeat rates
//! gate held inputs; the drop interval gates gravity.
//!
//! | Constant | Default | Allowed range |
//! |----------|---------|---------------|
//! | `DEFAULT_DROP_INTERVAL_S` | 0.9 | `DROP_INTERVAL_RANGE` |
//! | `DEFAULT_LEFT_RIGHT_REPEAT_S` | 0.25 | 0.02 – 1.0 |
//! | `DEFAULT_DOWN_REPEAT_S` | 0.01 | 0.01 – 0.5 |
//! | `DEFAULT_ROTATE_REPEAT_S` | 0.25 | 0.02 – 1.0 |
//!
//! # Examples
//!
//! ```
//! use tick_tetris_types::{InputAction, PieceKind, Rotation};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::from_index(5), Rotation::East);
//! assert_eq!(InputAction::from_str("rotate"), Some(InputAction::Rotate));
//! ```

use serde::{Deserialize, Serialize};

/// Seconds on the session clock.
pub type Seconds = f64;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells, hidden header included (22 rows)
pub const BOARD_HEIGHT: u8 = 22;

/// Hidden rows at the top of the board that pieces spawn into
pub const BOARD_HEADER_ROWS: u8 = 2;

/// Rows rendered to the player
pub const VISIBLE_HEIGHT: u8 = BOARD_HEIGHT - BOARD_HEADER_ROWS;

/// Largest board edge accepted by config validation (coordinates are `i8`).
pub const MAX_BOARD_EDGE: u8 = 64;

/// Base gravity interval before level adjustment.
pub const DEFAULT_DROP_INTERVAL_S: Seconds = 0.9;

/// Horizontal key-repeat rate.
pub const DEFAULT_LEFT_RIGHT_REPEAT_S: Seconds = 0.25;

/// Soft-drop key-repeat rate.
pub const DEFAULT_DOWN_REPEAT_S: Seconds = 0.01;

/// Rotate key-repeat rate.
pub const DEFAULT_ROTATE_REPEAT_S: Seconds = 0.25;

pub const LEFT_RIGHT_REPEAT_RANGE: (Seconds, Seconds) = (0.02, 1.0);
pub const DOWN_REPEAT_RANGE: (Seconds, Seconds) = (0.01, 0.5);
pub const ROTATE_REPEAT_RANGE: (Seconds, Seconds) = (0.02, 1.0);

/// Clamp applied to every level-adjusted drop interval.
pub const DROP_INTERVAL_RANGE: (Seconds, Seconds) = (0.05, 1.0);

/// Per-level speedup applied when a session starts.
pub const START_LEVEL_COEFFICIENT: Seconds = 0.1;

/// Per-level speedup applied when the level rises during play.
pub const LEVEL_UP_COEFFICIENT: Seconds = 0.05;

/// Line clear base points, indexed by rows cleared at once (classic table).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Most rows a single landing can clear.
pub const MAX_ROWS_PER_CLEAR: usize = 4;

/// Level a fresh session starts at.
pub const STARTING_LEVEL: u32 = 1;

/// Lines needed per level step (scaled by the level being left).
pub const DEFAULT_LINES_PER_LEVEL: u32 = 5;

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// The full catalog in bag order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Rotation states (North = spawn orientation, index 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotation for an index taken modulo 4.
    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotate clockwise
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise
    pub fn rotate_ccw(&self) -> Self {
        Self::from_index(self.index() + 3)
    }
}

/// Logical input actions consumed by the scheduler, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveRight,
    MoveLeft,
    Rotate,
    MoveDown,
}

impl InputAction {
    pub const ALL: [InputAction; 4] = [
        InputAction::MoveRight,
        InputAction::MoveLeft,
        InputAction::Rotate,
        InputAction::MoveDown,
    ];

    /// Bit used by input frames.
    pub fn bit(&self) -> u8 {
        match self {
            InputAction::MoveRight => 1 << 0,
            InputAction::MoveLeft => 1 << 1,
            InputAction::Rotate => 1 << 2,
            InputAction::MoveDown => 1 << 3,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveright" => Some(InputAction::MoveRight),
            "moveleft" => Some(InputAction::MoveLeft),
            "rotate" => Some(InputAction::Rotate),
            "movedown" => Some(InputAction::MoveDown),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputAction::MoveRight => "moveRight",
            InputAction::MoveLeft => "moveLeft",
            InputAction::Rotate => "rotate",
            InputAction::MoveDown => "moveDown",
        }
    }
}

/// How the piece factory picks the next kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpawnPolicy {
    /// Every kind once per shuffled bag of seven.
    #[default]
    Bag,
    /// Independent uniform draw per spawn.
    Uniform,
}

impl SpawnPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bag" => Some(SpawnPolicy::Bag),
            "uniform" => Some(SpawnPolicy::Uniform),
            _ => None,
        }
    }
}

/// Cell on the board (None = empty, Some = filled with piece kind)
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_wraps_both_ways() {
        let mut r = Rotation::North;
        for _ in 0..4 {
            r = r.rotate_cw();
        }
        assert_eq!(r, Rotation::North);
        assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
        assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    }

    #[test]
    fn test_action_bits_are_distinct() {
        let mut seen = 0u8;
        for action in InputAction::ALL {
            assert_eq!(seen & action.bit(), 0);
            seen |= action.bit();
        }
        assert_eq!(seen, 0b1111);
    }

    #[test]
    fn test_line_scores_super_linear() {
        assert!(LINE_SCORES[4] > 4 * LINE_SCORES[1]);
        assert!(LINE_SCORES[2] > 2 * LINE_SCORES[1]);
    }

    #[test]
    fn test_spawn_policy_parse() {
        assert_eq!(SpawnPolicy::from_str("BAG"), Some(SpawnPolicy::Bag));
        assert_eq!(SpawnPolicy::from_str("uniform"), Some(SpawnPolicy::Uniform));
        assert_eq!(SpawnPolicy::from_str("fair"), None);
    }
}
