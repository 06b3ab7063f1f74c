//! Key state tracker for terminal environments.
//!
//! Turns press/repeat/release events into one [`InputFrame`] per tick. Many
//! terminals never report releases; there a held key is dropped once no event
//! for it has been seen within the release timeout.

use crossterm::event::{KeyEvent, KeyEventKind};
use tick_tetris_core::{InputFrame, TimingConfig};

use crate::map::map_key;
use crate::types::{InputAction, Seconds};

#[derive(Debug, Clone)]
pub struct KeyTracker {
    /// Time of the last event seen for each held action.
    last_seen: [Option<Seconds>; 4],
    /// Fresh presses since the last frame.
    pending: InputFrame,
    /// `None` when the terminal reports key releases.
    release_timeout: Option<Seconds>,
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyTracker {
    /// Tracker for the default session timing.
    pub fn new() -> Self {
        Self::for_timing(&TimingConfig::default())
    }

    /// Tracker for a terminal without release events.
    ///
    /// A tap must not outlive the shortest repeat rate, or the scheduler sees
    /// a held key past its cooldown and repeats the action. Terminal
    /// auto-repeat then arrives as fresh presses, one action each.
    pub fn for_timing(timing: &TimingConfig) -> Self {
        let shortest = timing
            .left_right_repeat
            .min(timing.down_repeat)
            .min(timing.rotate_repeat);
        Self {
            last_seen: [None; 4],
            pending: InputFrame::new(),
            release_timeout: Some(shortest),
        }
    }

    pub fn with_release_timeout(mut self, timeout: Seconds) -> Self {
        self.release_timeout = Some(timeout);
        self
    }

    /// Keys stay held until their release event arrives.
    pub fn with_release_events(mut self) -> Self {
        self.release_timeout = None;
        self
    }

    pub fn release_timeout(&self) -> Option<Seconds> {
        self.release_timeout
    }

    /// Feed a terminal key event. Returns the mapped action, if any.
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Seconds) -> Option<InputAction> {
        let action = map_key(key)?;
        match key.kind {
            KeyEventKind::Press => self.press(action, now),
            KeyEventKind::Repeat => self.refresh(action, now),
            KeyEventKind::Release => self.release(action),
        }
        Some(action)
    }

    /// Key went down. Without release reporting, terminal auto-repeat shows
    /// up as further presses; those only refresh the held state.
    pub fn press(&mut self, action: InputAction, now: Seconds) {
        let slot = &mut self.last_seen[slot(action)];
        if slot.is_none() {
            self.pending.set_pressed(action);
        }
        *slot = Some(now);
    }

    pub fn refresh(&mut self, action: InputAction, now: Seconds) {
        let slot = &mut self.last_seen[slot(action)];
        if slot.is_some() {
            *slot = Some(now);
        } else {
            self.press(action, now);
        }
    }

    pub fn release(&mut self, action: InputAction) {
        self.last_seen[slot(action)] = None;
    }

    pub fn release_all(&mut self) {
        self.last_seen = [None; 4];
        self.pending = InputFrame::new();
    }

    pub fn is_held(&self, action: InputAction) -> bool {
        self.last_seen[slot(action)].is_some()
    }

    /// Input for the tick at `now`; consumes pending presses.
    pub fn frame(&mut self, now: Seconds) -> InputFrame {
        let mut frame = std::mem::take(&mut self.pending);
        for action in InputAction::ALL {
            let slot = &mut self.last_seen[slot(action)];
            if let (Some(seen), Some(timeout)) = (*slot, self.release_timeout) {
                if now - seen > timeout {
                    *slot = None;
                }
            }
            // A press that timed out in the same frame still counts as a press.
            if slot.is_some() {
                frame.set_held(action, true);
            }
        }
        frame
    }
}

fn slot(action: InputAction) -> usize {
    action.bit().trailing_zeros() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use tick_tetris_core::InputSource;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    #[test]
    fn test_press_produces_single_edge() {
        let mut tracker = KeyTracker::new().with_release_events();
        tracker.handle_key_event(key(KeyCode::Left, KeyEventKind::Press), 0.0);

        let first = tracker.frame(0.01);
        assert!(first.pressed(InputAction::MoveLeft));
        assert!(first.held(InputAction::MoveLeft));

        let second = tracker.frame(0.02);
        assert!(!second.pressed(InputAction::MoveLeft));
        assert!(second.held(InputAction::MoveLeft));
    }

    #[test]
    fn test_repeated_press_only_refreshes() {
        let mut tracker = KeyTracker::new().with_release_timeout(0.3);
        tracker.handle_key_event(key(KeyCode::Down, KeyEventKind::Press), 0.0);
        tracker.frame(0.01);
        tracker.handle_key_event(key(KeyCode::Down, KeyEventKind::Press), 0.25);
        let frame = tracker.frame(0.5);
        assert!(!frame.pressed(InputAction::MoveDown));
        assert!(frame.held(InputAction::MoveDown));
    }

    #[test]
    fn test_release_event_clears_held() {
        let mut tracker = KeyTracker::new().with_release_events();
        tracker.handle_key_event(key(KeyCode::Right, KeyEventKind::Press), 0.0);
        tracker.frame(0.01);
        tracker.handle_key_event(key(KeyCode::Right, KeyEventKind::Release), 0.02);
        assert!(!tracker.is_held(InputAction::MoveRight));
        assert!(tracker.frame(0.03).is_empty());
    }

    #[test]
    fn test_timeout_auto_releases() {
        let mut tracker = KeyTracker::new().with_release_timeout(0.1);
        tracker.press(InputAction::MoveDown, 0.0);
        assert!(tracker.frame(0.05).held(InputAction::MoveDown));
        assert!(!tracker.frame(0.2).held(InputAction::MoveDown));
        // Next press after auto-release is a fresh edge.
        tracker.press(InputAction::MoveDown, 0.3);
        assert!(tracker.frame(0.31).pressed(InputAction::MoveDown));
    }

    #[test]
    fn test_unmapped_key_is_ignored() {
        let mut tracker = KeyTracker::new();
        let x = key(KeyCode::Char('x'), KeyEventKind::Press);
        assert_eq!(tracker.handle_key_event(x, 0.0), None);
        assert!(tracker.frame(0.0).is_empty());
    }

    #[test]
    fn test_default_timeout_is_shortest_repeat_rate() {
        let timing = TimingConfig::default();
        let tracker = KeyTracker::for_timing(&timing);
        assert_eq!(tracker.release_timeout(), Some(timing.down_repeat));
        assert_eq!(tracker.clone().with_release_events().release_timeout(), None);
    }

    #[test]
    fn test_tap_is_released_before_next_tick() {
        let mut tracker = KeyTracker::new();
        tracker.handle_key_event(key(KeyCode::Right, KeyEventKind::Press), 0.100);
        let first = tracker.frame(0.112);
        assert!(first.pressed(InputAction::MoveRight));
        assert!(!tracker.frame(0.128).held(InputAction::MoveRight));
    }

    #[test]
    fn test_release_events_keep_key_held_without_timeout() {
        let mut tracker = KeyTracker::new().with_release_events();
        tracker.press(InputAction::MoveDown, 0.0);
        tracker.frame(0.016);
        assert!(tracker.frame(5.0).held(InputAction::MoveDown));
    }
}
