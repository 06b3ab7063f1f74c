//! Game session - owns the board, active piece, score and timers, and runs
//! the per-tick scheduler.
//!
//! Each tick applies at most one action, chosen in fixed priority order:
//!
//! 1. move right (held past cooldown, or pressed this tick)
//! 2. move left (same rule)
//! 3. rotate (pressed this tick and cooldown elapsed)
//! 4. move down (held past cooldown, or the gravity interval elapsed)
//!
//! Horizontal moves and rotation are applied, then validated, then reverted
//! with their exact inverse if the board rejects them. Only a rejected
//! downward move can land the piece or end the game.

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::board::GridBoard;
use crate::config::SessionConfig;
use crate::factory::PieceFactory;
use crate::input::InputSource;
use crate::pieces::Piece;
use crate::scoring::ScoreTracker;
use crate::snapshot::{ActiveSnapshot, SessionSnapshot};
use crate::timers::{level_up_drop_interval, TimerState};
use crate::types::{InputAction, PieceKind, Seconds, STARTING_LEVEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing fired (or the session is not live).
    Idle,
    /// The action was applied and kept.
    Moved(InputAction),
    /// The action was applied, rejected by the board and undone.
    Reverted(InputAction),
    /// The piece came to rest and a new one was spawned.
    Landed {
        rows_cleared: usize,
        points: u32,
        leveled_up: bool,
    },
    /// The piece was blocked inside the header region.
    GameOver,
}

impl TickOutcome {
    /// The scheduler action this tick executed, if any.
    pub fn action(&self) -> Option<InputAction> {
        match self {
            TickOutcome::Idle => None,
            TickOutcome::Moved(action) | TickOutcome::Reverted(action) => Some(*action),
            TickOutcome::Landed { .. } | TickOutcome::GameOver => Some(InputAction::MoveDown),
        }
    }
}

/// Collects collaborators for a session.
///
/// Any collaborator left out is reported with a warning; the resulting
/// session is inert and every tick is a no-op.
#[derive(Debug, Clone, Default)]
pub struct SessionBuilder {
    config: SessionConfig,
    board: Option<GridBoard>,
    factory: Option<PieceFactory>,
    score: Option<ScoreTracker>,
}

impl SessionBuilder {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn board(mut self, board: GridBoard) -> Self {
        self.board = Some(board);
        self
    }

    pub fn factory(mut self, factory: PieceFactory) -> Self {
        self.factory = Some(factory);
        self
    }

    pub fn score_tracker(mut self, score: ScoreTracker) -> Self {
        self.score = Some(score);
        self
    }

    /// Board, factory and tracker built from the config.
    pub fn with_defaults(self) -> Self {
        let board = &self.config.board;
        let board = GridBoard::new(board.width, board.height, board.header);
        let factory = PieceFactory::new(
            self.config.spawn_policy,
            self.config.seed,
            PieceFactory::centered_spawn(self.config.board.width),
        );
        let score = ScoreTracker::new(self.config.lines_per_level);
        self.board(board).factory(factory).score_tracker(score)
    }

    pub fn build(self, now: Seconds) -> GameSession {
        if self.board.is_none() {
            warn!("session has no game board; ticks will do nothing");
        }
        if self.score.is_none() {
            warn!("session has no score tracker; ticks will do nothing");
        }
        let mut factory = self.factory;
        let active = match factory.as_mut() {
            Some(factory) => Some(factory.spawn_shape()),
            None => {
                warn!("session has no piece factory; ticks will do nothing");
                None
            }
        };

        let level = self.score.as_ref().map_or(STARTING_LEVEL, ScoreTracker::level);
        let timers = TimerState::start(now, &self.config.timing, level);

        GameSession {
            config: self.config,
            board: self.board,
            factory,
            score: self.score,
            active,
            timers,
            state: SessionState::Playing,
            game_over_visible: false,
            restarts: 0,
        }
    }
}

/// The live game: exactly one per run, replaced wholesale on restart.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    board: Option<GridBoard>,
    factory: Option<PieceFactory>,
    score: Option<ScoreTracker>,
    active: Option<Piece>,
    timers: TimerState,
    state: SessionState,
    game_over_visible: bool,
    restarts: u32,
}

impl GameSession {
    /// Validate `config` and start a fully wired session at time `now`.
    pub fn new(config: SessionConfig, now: Seconds) -> Result<Self> {
        config.validate()?;
        Ok(SessionBuilder::new(config).with_defaults().build(now))
    }

    pub fn builder(config: SessionConfig) -> SessionBuilder {
        SessionBuilder::new(config)
    }

    /// Throw this session away and start a fresh one at `now`.
    ///
    /// The new session continues the factory's random sequence, so restarts
    /// within a run do not replay the same pieces.
    pub fn restart(&mut self, now: Seconds) {
        let mut config = self.config.clone();
        if let Some(seed) = self.factory.as_ref().and_then(PieceFactory::seed) {
            config.seed = seed;
        }
        let restarts = self.restarts.wrapping_add(1);
        *self = SessionBuilder::new(config).with_defaults().build(now);
        self.restarts = restarts;
        info!(restarts, "session restarted");
    }

    /// All collaborators present, a piece in play, and not game over.
    pub fn is_live(&self) -> bool {
        self.state == SessionState::Playing
            && self.board.is_some()
            && self.factory.is_some()
            && self.score.is_some()
            && self.active.is_some()
    }

    /// Run one scheduler pass at time `now`.
    pub fn tick<I: InputSource + ?Sized>(&mut self, now: Seconds, input: &I) -> TickOutcome {
        if !self.is_live() {
            return TickOutcome::Idle;
        }

        if input.held(InputAction::MoveRight) && now > self.timers.next_left_right
            || input.pressed(InputAction::MoveRight)
        {
            self.shift(now, InputAction::MoveRight)
        } else if input.held(InputAction::MoveLeft) && now > self.timers.next_left_right
            || input.pressed(InputAction::MoveLeft)
        {
            self.shift(now, InputAction::MoveLeft)
        } else if input.pressed(InputAction::Rotate) && now > self.timers.next_rotate {
            self.rotate(now)
        } else if input.held(InputAction::MoveDown) && now > self.timers.next_down
            || now > self.timers.next_drop
        {
            self.descend(now)
        } else {
            TickOutcome::Idle
        }
    }

    fn shift(&mut self, now: Seconds, action: InputAction) -> TickOutcome {
        let (Some(board), Some(piece)) = (self.board.as_ref(), self.active.as_mut()) else {
            return TickOutcome::Idle;
        };

        let right = action == InputAction::MoveRight;
        if right {
            piece.move_right();
        } else {
            piece.move_left();
        }
        self.timers.next_left_right = now + self.config.timing.left_right_repeat;

        if board.is_valid_position(piece) {
            return TickOutcome::Moved(action);
        }
        if right {
            piece.move_left();
        } else {
            piece.move_right();
        }
        TickOutcome::Reverted(action)
    }

    fn rotate(&mut self, now: Seconds) -> TickOutcome {
        let (Some(board), Some(piece)) = (self.board.as_ref(), self.active.as_mut()) else {
            return TickOutcome::Idle;
        };

        piece.rotate_right();
        self.timers.next_rotate = now + self.config.timing.rotate_repeat;

        if board.is_valid_position(piece) {
            return TickOutcome::Moved(InputAction::Rotate);
        }
        piece.rotate_left();
        TickOutcome::Reverted(InputAction::Rotate)
    }

    fn descend(&mut self, now: Seconds) -> TickOutcome {
        self.timers.next_drop = now + self.timers.drop_interval;
        self.timers.next_down = now + self.config.timing.down_repeat;

        let (Some(board), Some(piece)) = (self.board.as_ref(), self.active.as_mut()) else {
            return TickOutcome::Idle;
        };

        piece.move_down();
        if board.is_valid_position(piece) {
            return TickOutcome::Moved(InputAction::MoveDown);
        }

        if board.is_over_limit(piece) {
            self.game_over()
        } else {
            self.land(now)
        }
    }

    fn land(&mut self, now: Seconds) -> TickOutcome {
        let (Some(board), Some(factory), Some(score)) =
            (self.board.as_mut(), self.factory.as_mut(), self.score.as_mut())
        else {
            return TickOutcome::Idle;
        };
        let Some(mut piece) = self.active.take() else {
            return TickOutcome::Idle;
        };

        piece.move_up();
        board.store_shape(piece);
        self.timers.reset_input_cooldowns(now);

        let rows_cleared = board.clear_full_rows();
        let mut points = 0;
        let mut leveled_up = false;
        if rows_cleared > 0 {
            let update = score.score_lines(rows_cleared);
            points = update.points;
            leveled_up = update.leveled_up;
            if leveled_up {
                self.timers.drop_interval =
                    level_up_drop_interval(self.config.timing.drop_interval, score.level());
                debug!(
                    level = score.level(),
                    drop_interval = self.timers.drop_interval,
                    "level up"
                );
            }
        }
        debug!(
            kind = piece.kind().as_str(),
            rows_cleared,
            points,
            "piece landed"
        );

        self.active = Some(factory.spawn_shape());

        TickOutcome::Landed {
            rows_cleared,
            points,
            leveled_up,
        }
    }

    fn game_over(&mut self) -> TickOutcome {
        if let Some(piece) = self.active.as_mut() {
            piece.move_up();
        }
        self.game_over_visible = true;
        self.state = SessionState::GameOver;
        info!(score = self.score(), level = self.level(), "game over");
        TickOutcome::GameOver
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the presentation layer should show the game-over panel.
    pub fn game_over_visible(&self) -> bool {
        self.game_over_visible
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn board(&self) -> Option<&GridBoard> {
        self.board.as_ref()
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn timers(&self) -> &TimerState {
        &self.timers
    }

    pub fn score_tracker(&self) -> Option<&ScoreTracker> {
        self.score.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score.as_ref().map_or(0, ScoreTracker::score)
    }

    pub fn level(&self) -> u32 {
        self.score.as_ref().map_or(STARTING_LEVEL, ScoreTracker::level)
    }

    pub fn lines(&self) -> u32 {
        self.score.as_ref().map_or(0, ScoreTracker::lines)
    }

    pub fn next_kind(&self) -> Option<PieceKind> {
        self.factory.as_ref().map(PieceFactory::peek_next)
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.board.clear();
        match self.board.as_ref() {
            Some(board) => {
                out.width = board.width();
                out.visible_height = board.visible_height();
                out.header = board.header();
                for row in board.visible_rows() {
                    out.board.extend_from_slice(row);
                }
            }
            None => {
                out.width = 0;
                out.visible_height = 0;
                out.header = 0;
            }
        }
        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.next_kind();
        out.score = self.score();
        out.level = self.level();
        out.lines = self.lines();
        out.game_over = self.game_over_visible;
        out.inert = self.board.is_none() || self.factory.is_none() || self.score.is_none();
        out.restarts = self.restarts;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
