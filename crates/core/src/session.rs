//! Session module - the complete game state
//!
//! A [`Session`] owns the board, the active and next pieces, the stats and the
//! gravity timer. Every mutation goes through `&mut self`, so one session is one
//! serialized access point; hosts that share it across threads wrap it in
//! [`crate::shared::SharedSession`].
//!
//! Each piece cycles through two phases: falling, then locked (merged into the
//! board), immediately followed by the spawn of the next piece.
//!
//! A spawn that collides does not end the game. The session resets board and
//! stats in place and keeps running with the piece that just spawned.

use log::{debug, info, trace, warn};

use crate::board::Board;
use crate::collision::{collide, landing_y};
use crate::error::GridError;
use crate::events::{GameEvent, SessionDelta};
use crate::pieces::{create_piece, ActivePiece, Shape};
use crate::rng::{PieceSource, UniformPieces};
use crate::scoring::{drop_interval_ms, level_for_lines, line_clear_score};
use crate::snapshot::GameSnapshot;
use crate::types::{
    GameAction, BOARD_HEIGHT, BOARD_WIDTH, MAX_BOARD_DIM, MAX_SHAPE_DIM, MIN_BOARD_DIM,
};

/// Board geometry for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub cols: u8,
    pub rows: u8,
}

impl SessionConfig {
    pub fn new(cols: u8, rows: u8) -> Result<Self, GridError> {
        let range = MIN_BOARD_DIM..=MAX_BOARD_DIM;
        if !range.contains(&cols) || !range.contains(&rows) {
            return Err(GridError::Dimensions {
                width: cols as usize,
                height: rows as usize,
                min: MIN_BOARD_DIM as usize,
                max: MAX_BOARD_DIM as usize,
            });
        }
        Ok(Self { cols, rows })
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cols: BOARD_WIDTH,
            rows: BOARD_HEIGHT,
        }
    }
}

/// One game instance
#[derive(Debug, Clone)]
pub struct Session<S = UniformPieces> {
    config: SessionConfig,
    board: Board,
    active: Option<ActivePiece>,
    next: Option<Shape>,
    source: S,
    score: u32,
    lines: u32,
    level: u32,
    drop_interval_ms: u32,
    drop_counter_ms: u32,
    running: bool,
    started: bool,
    /// Accumulates the outcome of the operation in progress.
    pending: SessionDelta,
}

impl Session<UniformPieces> {
    /// Default 10x20 session with a seeded uniform piece source
    pub fn seeded(seed: u32) -> Self {
        Self::new(SessionConfig::default(), UniformPieces::seeded(seed))
    }
}

impl Default for Session<UniformPieces> {
    fn default() -> Self {
        Self::seeded(1)
    }
}

impl<S: PieceSource> Session<S> {
    /// Create an idle session. Nothing is spawned until [`Session::start_session`].
    pub fn new(config: SessionConfig, source: S) -> Self {
        Self {
            config,
            board: Board::new(config.cols, config.rows),
            active: None,
            next: None,
            source,
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: drop_interval_ms(1),
            drop_counter_ms: 0,
            running: false,
            started: false,
            pending: SessionDelta::default(),
        }
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next(&self) -> Option<Shape> {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn drop_counter_ms(&self) -> u32 {
        self.drop_counter_ms
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn started(&self) -> bool {
        self.started
    }

    /// Row the active piece would land on if dropped straight down.
    pub fn ghost_y(&self) -> Option<i8> {
        self.active.map(|piece| landing_y(&self.board, &piece))
    }

    /// Replace the settled cells, e.g. to set up a puzzle position.
    ///
    /// The active piece is left where it is, so the board must not have a
    /// settled cell under it.
    pub fn load_board(&mut self, board: Board) -> Result<(), GridError> {
        if board.width() != self.config.cols || board.height() != self.config.rows {
            return Err(GridError::SizeMismatch {
                width: board.width(),
                height: board.height(),
                cols: self.config.cols,
                rows: self.config.rows,
            });
        }
        if let Some(active) = &self.active {
            if let Some((x, y, _)) = active.cells().find(|&(x, y, _)| board.is_occupied(x, y)) {
                return Err(GridError::Overlap { x, y });
            }
        }
        self.board = board;
        Ok(())
    }

    /// Fresh board and stats, first pieces spawned, running.
    pub fn start_session(&mut self) -> SessionDelta {
        self.reset_stats();
        self.running = true;
        self.started = true;
        self.pending.push(GameEvent::SessionReset);
        info!(
            "session started ({}x{})",
            self.config.cols, self.config.rows
        );

        self.next = Some(create_piece(self.source.next_kind()));
        self.spawn();
        self.finish()
    }

    /// Flip the running flag of a started session.
    pub fn toggle_pause(&mut self) -> SessionDelta {
        if self.started {
            self.running = !self.running;
            debug!("running = {}", self.running);
        }
        self.finish()
    }

    /// Shift the active piece one column (`dir` is -1 or +1).
    pub fn move_piece(&mut self, dir: i8) -> SessionDelta {
        debug_assert!(dir == -1 || dir == 1, "move direction {}", dir);
        if !self.running {
            return self.finish();
        }
        if let Some(active) = self.active {
            let moved = active.offset(dir, 0);
            if !collide(&self.board, &moved) {
                self.active = Some(moved);
                self.pending.push(GameEvent::PieceMoved);
            }
        }
        self.finish()
    }

    /// Rotate clockwise, kicking sideways if the rotated shape collides.
    ///
    /// The kick shifts by +1, -2, +3, ... from the previous attempt. Before each
    /// further attempt the next shift's magnitude is checked against the rotated
    /// width; past it the rotation is abandoned and the piece restored.
    pub fn rotate(&mut self) -> SessionDelta {
        if !self.running {
            return self.finish();
        }
        let Some(original) = self.active else {
            return self.finish();
        };

        let mut piece = ActivePiece {
            shape: original.shape.rotate_cw(),
            ..original
        };
        let width = piece.shape.width() as i8;
        let mut kick: i8 = 1;
        while collide(&self.board, &piece) {
            piece.x += kick;
            kick = -(kick + kick.signum());
            if kick.abs() > width {
                trace!("rotation blocked at x={}", original.x);
                return self.finish();
            }
        }

        self.active = Some(piece);
        self.pending.push(GameEvent::PieceRotated { success: true });
        self.finish()
    }

    /// Move down one row, locking the piece if it cannot move.
    pub fn descend(&mut self) -> SessionDelta {
        if self.running {
            self.step_down();
        }
        self.finish()
    }

    /// Drop to the landing row and lock in one step.
    pub fn hard_drop(&mut self) -> SessionDelta {
        if !self.running {
            return self.finish();
        }
        if let Some(mut piece) = self.active {
            piece.y = landing_y(&self.board, &piece);
            self.active = Some(piece);
            self.lock_piece();
            self.drop_counter_ms = 0;
        }
        self.finish()
    }

    /// Advance the gravity timer by `elapsed_ms`.
    ///
    /// Once the accumulated time exceeds the drop interval, one descent runs and
    /// the counter restarts at zero; the overshoot is discarded.
    pub fn tick(&mut self, elapsed_ms: u32) -> SessionDelta {
        if !self.running {
            return self.finish();
        }
        self.drop_counter_ms = self.drop_counter_ms.saturating_add(elapsed_ms);
        if self.drop_counter_ms > self.drop_interval_ms {
            trace!("gravity after {}ms", self.drop_counter_ms);
            self.pending.gravity_step = true;
            self.step_down();
        }
        self.finish()
    }

    /// Apply a player command
    pub fn apply(&mut self, action: GameAction) -> SessionDelta {
        match action {
            GameAction::MoveLeft => self.move_piece(-1),
            GameAction::MoveRight => self.move_piece(1),
            GameAction::SoftDrop => self.descend(),
            GameAction::Rotate => self.rotate(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => self.start_session(),
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board.clone_from(&self.board);
        out.active = self.active;
        out.ghost_y = self.ghost_y();
        out.next = self.next;
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.drop_interval_ms = self.drop_interval_ms;
        out.running = self.running;
        out.started = self.started;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::new(self.config.cols, self.config.rows);
        self.snapshot_into(&mut s);
        s
    }

    fn finish(&mut self) -> SessionDelta {
        std::mem::take(&mut self.pending)
    }

    fn step_down(&mut self) {
        if let Some(active) = self.active {
            let lowered = active.offset(0, 1);
            if collide(&self.board, &lowered) {
                self.lock_piece();
            } else {
                self.active = Some(lowered);
                self.pending.push(GameEvent::PieceDropped);
            }
        }
        self.drop_counter_ms = 0;
    }

    /// Merge the active piece where it rests, sweep, score, spawn the next one.
    fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        debug_assert!(!collide(&self.board, &active), "locking an illegal placement");
        self.board.merge(&active);
        self.pending.locked = true;

        let cleared = self.board.sweep();
        debug!(
            "locked value {} at ({}, {}), cleared {}",
            active.shape.value(),
            active.x,
            active.y,
            cleared
        );
        if cleared > 0 {
            self.score = self.score.saturating_add(line_clear_score(cleared));
            self.lines += cleared;
            self.pending.lines_cleared = cleared;
            self.pending.push(GameEvent::LinesCleared {
                count: cleared,
                total_score: self.score,
                total_lines: self.lines,
            });
            self.update_level();
        }

        self.spawn();
    }

    fn update_level(&mut self) {
        let level = level_for_lines(self.lines);
        if level != self.level {
            info!("level {} -> {}", self.level, level);
            self.level = level;
            self.pending.push(GameEvent::LevelChanged { level });
        }
        self.drop_interval_ms = drop_interval_ms(self.level);
    }

    /// Promote the next piece, draw a new next, and handle top-out.
    fn spawn(&mut self) {
        let shape = match self.next {
            Some(shape) => shape,
            None => create_piece(self.source.next_kind()),
        };
        let next = create_piece(self.source.next_kind());
        self.next = Some(next);

        debug_assert!(shape.width() as usize <= MAX_SHAPE_DIM);
        let x = (self.config.cols / 2) as i8 - (shape.width() / 2) as i8;
        let piece = ActivePiece::new(shape, x, 0);
        self.active = Some(piece);

        if collide(&self.board, &piece) {
            warn!(
                "top-out at score {} lines {}, resetting session",
                self.score, self.lines
            );
            self.reset_stats();
            self.pending.push(GameEvent::ToppedOut);
            self.pending.push(GameEvent::SessionReset);
        }

        self.pending.push(GameEvent::NextPieceChanged { shape: next });
    }

    /// Empty board, zeroed stats and level 1 gravity.
    fn reset_stats(&mut self) {
        self.board = Board::new(self.config.cols, self.config.rows);
        self.score = 0;
        self.lines = 0;
        self.drop_counter_ms = 0;
        if self.level != 1 {
            self.level = 1;
            self.pending.push(GameEvent::LevelChanged { level: 1 });
        }
        self.drop_interval_ms = drop_interval_ms(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::PieceCycle;
    use crate::types::PieceKind;

    fn session_of(kind: PieceKind) -> Session<PieceCycle> {
        Session::new(SessionConfig::default(), PieceCycle::repeat(kind))
    }

    #[test]
    fn test_new_session_is_idle() {
        let s = Session::seeded(12345);
        assert!(!s.running());
        assert!(!s.started());
        assert_eq!(s.score(), 0);
        assert_eq!(s.level(), 1);
        assert_eq!(s.drop_interval_ms(), 700);
        assert!(s.active().is_none());
        assert!(s.next().is_none());
    }

    #[test]
    fn test_commands_are_noops_before_start() {
        let mut s = session_of(PieceKind::T);
        for action in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::SoftDrop,
            GameAction::Rotate,
            GameAction::HardDrop,
            GameAction::Pause,
        ] {
            assert!(s.apply(action).is_empty(), "{:?} should be a no-op", action);
        }
        assert!(s.tick(10_000).is_empty());
        assert!(!s.running());
    }

    #[test]
    fn test_start_spawns_centered_piece_and_next() {
        let mut s = session_of(PieceKind::I);
        let delta = s.start_session();

        let active = s.active().unwrap();
        // floor(10/2) - floor(4/2)
        assert_eq!((active.x, active.y), (3, 0));
        assert_eq!(s.next(), Some(create_piece(PieceKind::I)));
        assert_eq!(delta.events[0], GameEvent::SessionReset);
        assert!(delta.contains(&GameEvent::NextPieceChanged {
            shape: create_piece(PieceKind::I)
        }));
        assert!(!delta.contains(&GameEvent::ToppedOut));
    }

    #[test]
    fn test_start_promotes_first_drawn_kind() {
        let mut s = Session::new(
            SessionConfig::default(),
            PieceCycle::new([PieceKind::O, PieceKind::S, PieceKind::Z]),
        );
        s.start_session();
        assert_eq!(s.active().unwrap().shape, create_piece(PieceKind::O));
        assert_eq!(s.next(), Some(create_piece(PieceKind::S)));
    }

    #[test]
    fn test_move_blocked_by_wall() {
        let mut s = session_of(PieceKind::O);
        s.start_session();
        for _ in 0..4 {
            assert!(s.move_piece(-1).contains(&GameEvent::PieceMoved));
        }
        assert_eq!(s.active().unwrap().x, 0);
        assert!(s.move_piece(-1).is_empty());
        assert_eq!(s.active().unwrap().x, 0);
    }

    #[test]
    fn test_rotate_emits_event() {
        let mut s = session_of(PieceKind::T);
        s.start_session();
        let delta = s.rotate();
        assert_eq!(
            delta.events.as_slice(),
            &[GameEvent::PieceRotated { success: true }]
        );
        assert_eq!(
            s.active().unwrap().shape,
            create_piece(PieceKind::T).rotate_cw()
        );
    }

    #[test]
    fn test_rotate_kicks_off_left_wall() {
        let mut s = session_of(PieceKind::T);
        s.start_session();
        s.rotate();
        // The right-pointing T has an empty first column, so it can hang one past the wall.
        for _ in 0..5 {
            s.move_piece(-1);
        }
        assert_eq!(s.active().unwrap().x, -1);
        assert!(s.move_piece(-1).is_empty());

        let delta = s.rotate();
        assert!(delta.contains(&GameEvent::PieceRotated { success: true }));
        let active = s.active().unwrap();
        assert_eq!(active.x, 0);
        assert_eq!(active.shape, create_piece(PieceKind::T).rotate_cw().rotate_cw());
    }

    #[test]
    fn test_rotate_reverts_when_kicks_run_out() {
        let mut s = session_of(PieceKind::I);
        s.start_session();
        s.rotate();
        for _ in 0..10 {
            s.move_piece(1);
        }
        let before = s.active().unwrap();
        assert_eq!(before.x, 9);

        // Tries x = 10, 8, 11 then gives up before reaching 7.
        assert!(s.rotate().is_empty());
        assert_eq!(s.active().unwrap(), before);
    }

    #[test]
    fn test_descend_resets_drop_counter() {
        let mut s = session_of(PieceKind::T);
        s.start_session();
        s.tick(500);
        assert_eq!(s.drop_counter_ms(), 500);
        let delta = s.descend();
        assert_eq!(delta.events.as_slice(), &[GameEvent::PieceDropped]);
        assert_eq!(s.drop_counter_ms(), 0);
        assert_eq!(s.active().unwrap().y, 1);
    }

    #[test]
    fn test_tick_requires_strictly_more_than_interval() {
        let mut s = session_of(PieceKind::T);
        s.start_session();
        assert!(!s.tick(700).gravity_step);
        assert_eq!(s.active().unwrap().y, 0);
        let delta = s.tick(1);
        assert!(delta.gravity_step);
        assert_eq!(s.active().unwrap().y, 1);
        assert_eq!(s.drop_counter_ms(), 0);
    }

    #[test]
    fn test_tick_discards_overshoot() {
        let mut s = session_of(PieceKind::T);
        s.start_session();
        let delta = s.tick(5_000);
        assert!(delta.gravity_step);
        // One descent per tick regardless of the elapsed time.
        assert_eq!(s.active().unwrap().y, 1);
        assert_eq!(s.drop_counter_ms(), 0);
    }

    #[test]
    fn test_pause_stops_gravity_and_commands() {
        let mut s = session_of(PieceKind::T);
        s.start_session();
        s.toggle_pause();
        assert!(!s.running());
        assert!(s.tick(5_000).is_empty());
        assert!(s.move_piece(1).is_empty());
        s.toggle_pause();
        assert!(s.running());
        assert!(s.tick(5_000).gravity_step);
    }

    #[test]
    fn test_hard_drop_locks_on_floor() {
        let mut s = session_of(PieceKind::I);
        s.start_session();
        let delta = s.hard_drop();
        assert!(delta.locked);
        assert_eq!(s.board().row(19).unwrap(), &[0, 0, 0, 5, 5, 5, 5, 0, 0, 0]);
        // A fresh piece is back at the top.
        assert_eq!(s.active().unwrap().y, 0);
    }

    #[test]
    fn test_top_out_resets_and_keeps_running() {
        let mut s = session_of(PieceKind::O);
        s.start_session();

        // A tower under the spawn columns; no row is ever full.
        let mut board = Board::default();
        for y in 2..20 {
            board.set(4, y, 3);
            board.set(5, y, 3);
        }
        s.load_board(board).unwrap();

        let delta = s.hard_drop();
        assert!(delta.locked);
        assert!(delta.contains(&GameEvent::ToppedOut));
        assert!(delta.contains(&GameEvent::SessionReset));
        assert!(s.running());
        assert_eq!(s.score(), 0);
        assert_eq!(s.lines(), 0);
        assert!(s.board().cells().iter().all(|&v| v == 0));
        assert!(s.active().is_some());
    }

    #[test]
    fn test_load_board_rejects_wrong_size() {
        let mut s = session_of(PieceKind::O);
        assert_eq!(
            s.load_board(Board::new(8, 20)),
            Err(GridError::SizeMismatch {
                width: 8,
                height: 20,
                cols: 10,
                rows: 20
            })
        );
    }

    #[test]
    fn test_load_board_rejects_cells_under_active_piece() {
        let mut s = session_of(PieceKind::O);
        s.start_session();
        let mut board = Board::default();
        board.set(4, 0, 3);
        board.set(4, 2, 3);

        assert_eq!(s.load_board(board), Err(GridError::Overlap { x: 4, y: 0 }));
        assert!(s.board().cells().iter().all(|&v| v == 0));

        let delta = s.descend();
        assert!(!delta.locked);
        assert_eq!(s.active().map(|p| p.y), Some(1));
    }

    #[test]
    fn test_load_board_keeps_cells_below_active_piece() {
        let mut s = session_of(PieceKind::O);
        s.start_session();
        let mut board = Board::default();
        board.set(4, 19, 3);

        assert_eq!(s.load_board(board), Ok(()));
        let delta = s.hard_drop();
        assert!(delta.locked);
        assert_eq!(s.board().get(4, 18), Some(2));
        assert_eq!(s.board().get(4, 19), Some(3));
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut s = session_of(PieceKind::O);
        s.start_session();
        let snap = s.snapshot();
        assert_eq!(snap.active, s.active());
        assert_eq!(snap.ghost_y, Some(18));
        assert_eq!(snap.next, s.next());
        assert!(snap.running);
        assert_eq!(&snap.board, s.board());
    }
}
