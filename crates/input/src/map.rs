//! Key mapping from terminal events to scheduler actions.

use crate::types::InputAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key to the scheduler action it drives.
pub fn map_key(key: KeyEvent) -> Option<InputAction> {
    match key.code {
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(InputAction::MoveLeft),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(InputAction::MoveRight),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(InputAction::MoveDown),
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(InputAction::Rotate),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

pub fn is_restart(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Left)), Some(InputAction::MoveLeft));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Right)), Some(InputAction::MoveRight));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Down)), Some(InputAction::MoveDown));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('A'))), Some(InputAction::MoveLeft));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('l'))), Some(InputAction::MoveRight));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('s'))), Some(InputAction::MoveDown));
    }

    #[test]
    fn test_rotate_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Up)), Some(InputAction::Rotate));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('w'))), Some(InputAction::Rotate));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('K'))), Some(InputAction::Rotate));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char(' '))), None);
    }

    #[test]
    fn test_quit_and_restart_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(is_restart(KeyEvent::from(KeyCode::Char('r'))));
        assert!(!is_restart(KeyEvent::from(KeyCode::Char('q'))));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('r'))), None);
    }
}
