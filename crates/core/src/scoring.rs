//! Scoring module - classic line-clear points and level progression
//!
//! Points for a clear are `LINE_SCORES[rows] * level`, so a four-row clear is
//! worth far more than four single-row clears. The level starts at
//! [`STARTING_LEVEL`] and rises once `lines_per_level * level` rows have been
//! cleared since the previous level-up; rows beyond the threshold do not carry
//! over.

use crate::types::{LINE_SCORES, MAX_ROWS_PER_CLEAR, STARTING_LEVEL};

/// Result of one [`ScoreTracker::score_lines`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreUpdate {
    /// Rows credited (the request clamped to 1..=4, or 0 for a no-op).
    pub rows: u32,
    pub points: u32,
    /// True only when this call crossed a level threshold.
    pub leveled_up: bool,
}

/// Calculate line clear score (classic table)
/// rows: number of rows cleared at once (1-4)
/// level: current level (1-based)
pub fn calculate_line_score(rows: usize, level: u32) -> u32 {
    if rows == 0 {
        return 0;
    }
    LINE_SCORES[rows.min(MAX_ROWS_PER_CLEAR)].saturating_mul(level)
}

/// Accumulates score, cleared lines and level for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTracker {
    score: u32,
    level: u32,
    lines: u32,
    lines_to_next_level: u32,
    lines_per_level: u32,
}

impl ScoreTracker {
    pub fn new(lines_per_level: u32) -> Self {
        Self {
            score: 0,
            level: STARTING_LEVEL,
            lines: 0,
            lines_to_next_level: lines_per_level.saturating_mul(STARTING_LEVEL),
            lines_per_level,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Total rows cleared this session.
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn lines_to_next_level(&self) -> u32 {
        self.lines_to_next_level
    }

    /// Credit `rows` rows cleared by a single landing.
    ///
    /// `rows == 0` changes nothing. Counts above four are scored as four.
    pub fn score_lines(&mut self, rows: usize) -> ScoreUpdate {
        if rows == 0 {
            return ScoreUpdate::default();
        }
        let rows = rows.min(MAX_ROWS_PER_CLEAR) as u32;
        let points = calculate_line_score(rows as usize, self.level);

        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(rows);
        self.lines_to_next_level = self.lines_to_next_level.saturating_sub(rows);

        let leveled_up = self.lines_to_next_level == 0;
        if leveled_up {
            self.level_up();
        }

        ScoreUpdate {
            rows,
            points,
            leveled_up,
        }
    }

    fn level_up(&mut self) {
        self.level = self.level.saturating_add(1);
        self.lines_to_next_level = self.lines_per_level.saturating_mul(self.level);
    }
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_LINES_PER_LEVEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_line_scores() {
        assert_eq!(calculate_line_score(1, 1), 40);
        assert_eq!(calculate_line_score(2, 1), 100);
        assert_eq!(calculate_line_score(3, 1), 300);
        assert_eq!(calculate_line_score(4, 1), 1200);

        assert_eq!(calculate_line_score(1, 5), 40 * 5);
        assert_eq!(calculate_line_score(4, 5), 1200 * 5);
    }

    #[test]
    fn test_zero_rows_is_noop() {
        let mut tracker = ScoreTracker::default();
        let before = tracker.clone();
        assert_eq!(tracker.score_lines(0), ScoreUpdate::default());
        assert_eq!(tracker, before);
    }

    #[test]
    fn test_more_than_four_rows_scored_as_four() {
        let mut tracker = ScoreTracker::new(100);
        let update = tracker.score_lines(6);
        assert_eq!(update.rows, 4);
        assert_eq!(update.points, 1200);
        assert_eq!(tracker.lines(), 4);
    }

    #[test]
    fn test_level_threshold_scales_with_level() {
        let mut tracker = ScoreTracker::new(5);
        assert_eq!(tracker.level(), 1);
        assert_eq!(tracker.lines_to_next_level(), 5);

        // 4 + 1 rows reaches the first threshold of 5.
        assert!(!tracker.score_lines(4).leveled_up);
        assert!(tracker.score_lines(1).leveled_up);
        assert_eq!(tracker.level(), 2);
        assert_eq!(tracker.lines_to_next_level(), 10);

        // Overshoot does not carry over into the next level.
        let mut tracker = ScoreTracker::new(1);
        assert!(tracker.score_lines(4).leveled_up);
        assert_eq!(tracker.level(), 2);
        assert_eq!(tracker.lines_to_next_level(), 2);
    }

    #[test]
    fn test_points_use_level_before_level_up() {
        let mut tracker = ScoreTracker::new(1);
        let update = tracker.score_lines(1);
        assert_eq!(update.points, 40);
        assert!(update.leveled_up);
        assert_eq!(tracker.score_lines(1).points, 80);
    }
}
