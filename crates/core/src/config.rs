//! Session configuration
//!
//! Every tunable the simulation reads lives here. Values are supplied by the
//! caller (defaults, a JSON file, CLI flags) and checked once by
//! [`SessionConfig::validate`] before a session is built.

use anyhow::{bail, ensure, Result};
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Board geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: u8,
    /// Total rows, hidden header included.
    pub height: u8,
    /// Hidden rows at the top that pieces spawn into.
    pub header: u8,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            header: BOARD_HEADER_ROWS,
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (4..=MAX_BOARD_EDGE).contains(&self.width),
            "board.width must be within 4..={}, got {}",
            MAX_BOARD_EDGE,
            self.width
        );
        ensure!(
            self.height <= MAX_BOARD_EDGE,
            "board.height must be at most {}, got {}",
            MAX_BOARD_EDGE,
            self.height
        );
        ensure!(
            self.header >= 1,
            "board.header must leave at least one hidden spawn row"
        );
        // Room for an upright I piece below the header.
        ensure!(
            self.height >= self.header.saturating_add(4),
            "board.height ({}) must exceed board.header ({}) by at least 4",
            self.height,
            self.header
        );
        Ok(())
    }
}

/// Gravity and key-repeat timing, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Base gravity interval before level adjustment.
    pub drop_interval: Seconds,
    pub left_right_repeat: Seconds,
    pub down_repeat: Seconds,
    pub rotate_repeat: Seconds,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            drop_interval: DEFAULT_DROP_INTERVAL_S,
            left_right_repeat: DEFAULT_LEFT_RIGHT_REPEAT_S,
            down_repeat: DEFAULT_DOWN_REPEAT_S,
            rotate_repeat: DEFAULT_ROTATE_REPEAT_S,
        }
    }
}

impl TimingConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.drop_interval.is_finite() || self.drop_interval <= 0.0 {
            bail!(
                "timing.drop_interval must be a positive number of seconds, got {}",
                self.drop_interval
            );
        }
        check_range("timing.left_right_repeat", self.left_right_repeat, LEFT_RIGHT_REPEAT_RANGE)?;
        check_range("timing.down_repeat", self.down_repeat, DOWN_REPEAT_RANGE)?;
        check_range("timing.rotate_repeat", self.rotate_repeat, ROTATE_REPEAT_RANGE)?;
        Ok(())
    }
}

fn check_range(name: &str, value: Seconds, (min, max): (Seconds, Seconds)) -> Result<()> {
    // NaN fails both comparisons, so test for containment rather than exclusion.
    if !(value >= min && value <= max) {
        bail!("{} must be within {}..={} seconds, got {}", name, min, max, value);
    }
    Ok(())
}

/// Everything needed to assemble a [`crate::session::GameSession`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub board: BoardConfig,
    pub timing: TimingConfig,
    pub lines_per_level: u32,
    pub spawn_policy: SpawnPolicy,
    /// Seed for the piece factory.
    pub seed: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            timing: TimingConfig::default(),
            lines_per_level: DEFAULT_LINES_PER_LEVEL,
            spawn_policy: SpawnPolicy::default(),
            seed: 1,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        self.board.validate()?;
        self.timing.validate()?;
        ensure!(self.lines_per_level >= 1, "lines_per_level must be at least 1");
        Ok(())
    }
}
