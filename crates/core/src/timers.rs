//! Action timers - next-allowed stamps and the level-derived drop interval.
//!
//! Gating is purely comparative: an action may fire once the session clock is
//! strictly past its stamp. A stamp only moves when its own action fires, or
//! when a landing resets the input cooldowns.

use crate::config::TimingConfig;
use crate::types::{Seconds, DROP_INTERVAL_RANGE, LEVEL_UP_COEFFICIENT, START_LEVEL_COEFFICIENT};

/// Drop interval computed when a session starts.
pub fn initial_drop_interval(base: Seconds, level: u32) -> Seconds {
    clamp_drop_interval(base - level as Seconds * START_LEVEL_COEFFICIENT)
}

/// Drop interval recomputed after a level-up during play.
///
/// Uses a gentler per-level coefficient than [`initial_drop_interval`].
pub fn level_up_drop_interval(base: Seconds, level: u32) -> Seconds {
    clamp_drop_interval(base - level as Seconds * LEVEL_UP_COEFFICIENT)
}

fn clamp_drop_interval(interval: Seconds) -> Seconds {
    interval.clamp(DROP_INTERVAL_RANGE.0, DROP_INTERVAL_RANGE.1)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerState {
    pub(crate) next_left_right: Seconds,
    pub(crate) next_down: Seconds,
    pub(crate) next_rotate: Seconds,
    pub(crate) next_drop: Seconds,
    pub(crate) drop_interval: Seconds,
}

impl TimerState {
    /// Timers for a session starting at `now`.
    ///
    /// Input cooldowns start one repeat period out. The gravity stamp starts at
    /// `now`, so the first tick after start already drops the piece.
    pub fn start(now: Seconds, timing: &TimingConfig, level: u32) -> Self {
        Self {
            next_left_right: now + timing.left_right_repeat,
            next_down: now + timing.down_repeat,
            next_rotate: now + timing.rotate_repeat,
            next_drop: now,
            drop_interval: initial_drop_interval(timing.drop_interval, level),
        }
    }

    /// Zero input latency for a freshly spawned piece.
    pub fn reset_input_cooldowns(&mut self, now: Seconds) {
        self.next_left_right = now;
        self.next_down = now;
        self.next_rotate = now;
    }

    pub fn next_left_right(&self) -> Seconds {
        self.next_left_right
    }

    pub fn next_down(&self) -> Seconds {
        self.next_down
    }

    pub fn next_rotate(&self) -> Seconds {
        self.next_rotate
    }

    pub fn next_drop(&self) -> Seconds {
        self.next_drop
    }

    pub fn drop_interval(&self) -> Seconds {
        self.drop_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_drop_interval() {
        assert!((initial_drop_interval(0.9, 1) - 0.8).abs() < 1e-9);
        assert!((initial_drop_interval(0.9, 3) - 0.6).abs() < 1e-9);
        // Clamped at both ends.
        assert_eq!(initial_drop_interval(0.9, 20), 0.05);
        assert_eq!(initial_drop_interval(3.0, 1), 1.0);
    }

    #[test]
    fn test_level_up_formula_differs_from_initial() {
        assert!((level_up_drop_interval(0.9, 3) - 0.75).abs() < 1e-9);
        assert!(level_up_drop_interval(0.9, 3) > initial_drop_interval(0.9, 3));
        assert_eq!(level_up_drop_interval(0.9, 40), 0.05);
    }

    #[test]
    fn test_start_and_reset() {
        let timing = TimingConfig::default();
        let mut timers = TimerState::start(10.0, &timing, 1);
        assert_eq!(timers.next_left_right(), 10.0 + timing.left_right_repeat);
        assert_eq!(timers.next_down(), 10.0 + timing.down_repeat);
        assert_eq!(timers.next_rotate(), 10.0 + timing.rotate_repeat);
        assert_eq!(timers.next_drop(), 10.0);

        timers.reset_input_cooldowns(12.5);
        assert_eq!(timers.next_left_right(), 12.5);
        assert_eq!(timers.next_down(), 12.5);
        assert_eq!(timers.next_rotate(), 12.5);
        assert_eq!(timers.next_drop(), 10.0);
    }
}
