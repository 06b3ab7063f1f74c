//! Key tracker driving a session, as the terminal loop does.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tick_tetris::core::{
    GameSession, GridBoard, PieceFactory, ScoreTracker, SessionConfig, TickOutcome,
};
use tick_tetris::input::KeyTracker;
use tick_tetris::types::{InputAction, PieceKind, Seconds};

const TICK: Seconds = 0.016;

fn o_session() -> GameSession {
    GameSession::builder(SessionConfig::default())
        .board(GridBoard::new(10, 22, 2))
        .factory(PieceFactory::repeating(PieceKind::O, PieceFactory::centered_spawn(10)))
        .score_tracker(ScoreTracker::default())
        .build(0.0)
}

/// Feed `events` at their timestamps and tick every 16 ms until `until`.
/// Returns how often `action` was applied.
fn count_moves(
    session: &mut GameSession,
    keys: &mut KeyTracker,
    events: &[(Seconds, KeyCode, KeyEventKind)],
    action: InputAction,
    until: Seconds,
) -> usize {
    let mut moves = 0;
    let mut fed = 0;
    let mut i = 1;
    loop {
        let now = i as f64 * TICK;
        if now > until {
            break;
        }
        while fed < events.len() && events[fed].0 <= now {
            let (at, code, kind) = events[fed];
            keys.handle_key_event(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind), at);
            fed += 1;
        }
        if session.tick(now, &keys.frame(now)) == TickOutcome::Moved(action) {
            moves += 1;
        }
        i += 1;
    }
    moves
}

#[test]
fn test_single_right_tap_without_release_moves_once() {
    let mut session = o_session();
    let mut keys = KeyTracker::for_timing(&session.config().timing);
    let tap = [(0.1, KeyCode::Right, KeyEventKind::Press)];

    let rights = count_moves(&mut session, &mut keys, &tap, InputAction::MoveRight, 0.6);
    assert_eq!(rights, 1);
    assert_eq!(session.active().map(|p| p.pivot().0), Some(4));
}

#[test]
fn test_single_down_tap_without_release_moves_once() {
    let mut session = o_session();
    let mut keys = KeyTracker::for_timing(&session.config().timing);
    let tap = [(0.1, KeyCode::Down, KeyEventKind::Press)];

    let downs = count_moves(&mut session, &mut keys, &tap, InputAction::MoveDown, 0.6);
    // Gravity fires on the first tick and not again before 0.8 s; the tap
    // accounts for the other row.
    assert_eq!(downs, 2);
    assert_eq!(session.active().map(|p| p.pivot().1), Some(2));
}

#[test]
fn test_tap_with_release_events_moves_once() {
    let mut session = o_session();
    let mut keys = KeyTracker::new().with_release_events();
    let tap = [
        (0.1, KeyCode::Left, KeyEventKind::Press),
        (0.18, KeyCode::Left, KeyEventKind::Release),
    ];
    let lefts = count_moves(&mut session, &mut keys, &tap, InputAction::MoveLeft, 0.6);
    assert_eq!(lefts, 1);
}

#[test]
fn test_held_key_with_release_events_repeats_at_cooldown() {
    let mut session = o_session();
    let mut keys = KeyTracker::new().with_release_events();
    let hold = [
        (0.1, KeyCode::Right, KeyEventKind::Press),
        (0.59, KeyCode::Right, KeyEventKind::Release),
    ];
    // Press at 0.112, then held repeats at 0.25 s spacing: 0.368 and never
    // again before release.
    let rights = count_moves(&mut session, &mut keys, &hold, InputAction::MoveRight, 0.6);
    assert_eq!(rights, 2);
}
