//! Game state module - one falling-block session
//!
//! [`Session`] ties the board, the piece queue and scoring together. Every
//! request is synchronous and atomic: it either applies completely or leaves
//! the session untouched and reports [`ActionOutcome::Rejected`]. Gravity is
//! just another request ([`GameAction::Tick`]) driven by an outside clock at
//! [`Session::gravity_interval`].
//!
//! A piece that cannot move down when a tick or drop asks it to locks within
//! that same request. Locking writes its cells, awards the piece bonus, clears
//! full rows as one cascade, applies level ups and the line score, then spawns
//! the next piece. The session ends when a piece comes to rest with a cell
//! in the top [`TOP_OUT_MARGIN`] rows, or when the next spawn overlaps locked
//! cells.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info};

use crate::board::Board;
use crate::catalog::Catalogs;
use crate::config::{check_config, leaderboard_key, ConfigError};
use crate::geometry::{fix_rotation_position, rotate};
use crate::scoring::{gravity_interval, line_clear_score, required_level};
use crate::shape::Shape;
use crate::snapshot::{ActiveSnapshot, QueuedSnapshot, SessionSnapshot};
use crate::supply::{PieceQueue, PieceSupply, QueuedPiece};
use crate::types::{
    ActionOutcome, GameAction, GameConfig, LockEvent, Rgba, GHOST_ALPHA, TOP_OUT_MARGIN,
};

/// The falling piece: a shape at a grid position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    pub shape: Shape,
    /// Column of the bounding box's left edge
    pub x: i16,
    /// Row of the bounding box's top edge
    pub y: i16,
    pub color: Rgba,
}

impl ActivePiece {
    /// Place a queued piece at the top-center of a `width`-wide board.
    pub fn spawn(piece: QueuedPiece, width: u16) -> Self {
        let x = (width as i16 - piece.shape.cols() as i16) / 2;
        Self {
            shape: piece.shape,
            x,
            y: 0,
            color: piece.color,
        }
    }

    /// Grid cells covered by the piece.
    pub fn cells(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.shape
            .occupied()
            .map(move |(cx, cy)| (self.x + cx as i16, self.y + cy as i16))
    }

    /// Whether every cell, shifted by (dx, dy), is in bounds and empty.
    pub fn fits(&self, board: &Board, dx: i16, dy: i16) -> bool {
        self.cells().all(|(x, y)| board.is_valid(x + dx, y + dy))
    }
}

/// Final record of a finished session, for an external leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub leaderboard_key: String,
    pub score: u64,
    pub lines: u32,
    pub level: u32,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    board: Board,
    active: Option<ActivePiece>,
    queue: PieceQueue,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
    leaderboard_key: String,
    gravity_interval: Duration,
    pieces_locked: u64,
    score: u64,
    lines: u32,
    level: u32,
    paused: bool,
    game_over: bool,
}

impl Session {
    /// Start a session with a seeded generator, spawning the first piece.
    pub fn new(config: GameConfig, catalogs: &Catalogs, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, catalogs, StdRng::seed_from_u64(seed))
    }

    /// Start a session seeded from the operating system.
    pub fn from_entropy(config: GameConfig, catalogs: &Catalogs) -> Result<Self, ConfigError> {
        Self::with_rng(config, catalogs, StdRng::from_entropy())
    }

    pub fn with_rng(
        config: GameConfig,
        catalogs: &Catalogs,
        rng: StdRng,
    ) -> Result<Self, ConfigError> {
        check_config(&config, catalogs)?;

        let supply = PieceSupply::new(&config, catalogs, rng)?;
        let queue = PieceQueue::new(supply, config.next_pieces)?;
        let level = config.first_level;

        let mut session = Self {
            board: Board::new(config.width, config.height),
            active: None,
            queue,
            last_event: None,
            leaderboard_key: leaderboard_key(&config),
            gravity_interval: gravity_interval(config.speed, config.speed_per_level, level),
            pieces_locked: 0,
            score: 0,
            lines: 0,
            level,
            paused: false,
            game_over: false,
            config,
        };

        info!(
            width = session.config.width,
            height = session.config.height,
            sizes = ?session.config.polyominoes.keys().collect::<Vec<_>>(),
            level,
            "session started"
        );
        session.spawn_next();
        Ok(session)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub fn set_active(&mut self, piece: Option<ActivePiece>) {
        self.active = piece;
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    /// Upcoming pieces, next first.
    pub fn upcoming(&self) -> &[QueuedPiece] {
        self.queue.upcoming()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn pieces_locked(&self) -> u64 {
        self.pieces_locked
    }

    /// Time between gravity ticks at the current level.
    pub fn gravity_interval(&self) -> Duration {
        self.gravity_interval
    }

    pub fn leaderboard_key(&self) -> &str {
        &self.leaderboard_key
    }

    /// Take the event recorded by the most recent lock.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Final record, once the session has topped out.
    pub fn result(&self) -> Option<GameResult> {
        self.game_over.then(|| GameResult {
            leaderboard_key: self.leaderboard_key.clone(),
            score: self.score,
            lines: self.lines,
            level: self.level,
        })
    }

    /// Apply one request.
    pub fn apply_action(&mut self, action: GameAction) -> ActionOutcome {
        if self.game_over {
            return ActionOutcome::Rejected;
        }
        if action == GameAction::Pause {
            self.paused = !self.paused;
            debug!(paused = self.paused, "pause toggled");
            return ActionOutcome::Applied;
        }
        if self.paused {
            return ActionOutcome::Rejected;
        }

        match action {
            GameAction::MoveLeft => applied(self.try_move(-1, 0)),
            GameAction::MoveRight => applied(self.try_move(1, 0)),
            GameAction::RotateCw => applied(self.try_rotate(true)),
            GameAction::RotateCcw => applied(self.try_rotate(false)),
            GameAction::SoftDrop => self.step_down(self.config.scoring.softdrop),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Tick => self.step_down(0),
            GameAction::Pause => ActionOutcome::Rejected,
        }
    }

    /// Gravity step.
    pub fn tick(&mut self) -> ActionOutcome {
        self.apply_action(GameAction::Tick)
    }

    /// Try to shift the active piece
    pub(crate) fn try_move(&mut self, dx: i16, dy: i16) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if !active.fits(&self.board, dx, dy) {
            return false;
        }
        active.x += dx;
        active.y += dy;
        true
    }

    /// Rotate in place, shifted by the centering offset. No wall kicks.
    pub(crate) fn try_rotate(&mut self, clockwise: bool) -> bool {
        let Some(active) = self.active.as_ref() else {
            return false;
        };

        let rotated = rotate(&active.shape, clockwise);
        let (dx, dy) = fix_rotation_position(&active.shape, &rotated);
        let candidate = ActivePiece {
            shape: rotated,
            x: active.x + dx as i16,
            y: active.y + dy as i16,
            color: active.color,
        };
        if !candidate.fits(&self.board, 0, 0) {
            return false;
        }
        self.active = Some(candidate);
        true
    }

    /// Move down one row awarding `bonus`, or lock if blocked.
    fn step_down(&mut self, bonus: u64) -> ActionOutcome {
        if self.active.is_none() {
            return ActionOutcome::Rejected;
        }
        if self.try_move(0, 1) {
            self.score = self.score.saturating_add(bonus);
            return ActionOutcome::Applied;
        }
        self.lock_piece()
    }

    /// Drop to the resting row, then lock.
    pub(crate) fn hard_drop(&mut self) -> ActionOutcome {
        if self.active.is_none() {
            return ActionOutcome::Rejected;
        }
        let bonus = self.config.scoring.harddrop;
        while self.try_move(0, 1) {
            self.score = self.score.saturating_add(bonus);
        }
        self.lock_piece()
    }

    /// Lock the active piece onto the board and handle line clears
    pub fn lock_piece(&mut self) -> ActionOutcome {
        let Some(active) = self.active.take() else {
            return ActionOutcome::Rejected;
        };

        let cells: Vec<(i16, i16)> = active.cells().collect();
        self.score = self.score.saturating_add(self.config.scoring.polyomino);

        // Resting too close to the top ends the session; the piece is not written.
        if cells.iter().any(|&(_, y)| y < TOP_OUT_MARGIN) {
            self.top_out();
            self.last_event = Some(LockEvent {
                lines_cleared: 0,
                line_clear_score: 0,
                levels_gained: 0,
                topped_out: true,
            });
            debug!(x = active.x, y = active.y, "piece rested in the top margin");
            return ActionOutcome::ToppedOut;
        }

        // The active piece always fits, so this cannot fail.
        let _locked = self.board.lock_cells(&cells, active.color);
        self.pieces_locked += 1;

        let lines_cleared = self.board.clear_full_rows();
        let (levels_gained, line_score) = self.award_lines(lines_cleared);

        let topped_out = !self.spawn_next();
        self.last_event = Some(LockEvent {
            lines_cleared,
            line_clear_score: line_score,
            levels_gained,
            topped_out,
        });

        debug!(
            x = active.x,
            y = active.y,
            lines_cleared,
            score = self.score,
            "piece locked"
        );

        if topped_out {
            ActionOutcome::ToppedOut
        } else {
            ActionOutcome::Locked { lines_cleared }
        }
    }

    /// Credit `cleared` rows: level ups first, then the line score at the new
    /// level. Returns (levels gained, line score).
    fn award_lines(&mut self, cleared: u32) -> (u32, u64) {
        if cleared == 0 {
            return (0, 0);
        }
        self.lines += cleared;

        let required = required_level(
            self.lines,
            self.config.lines_per_level,
            self.config.first_level,
        );
        let mut gained = 0;
        while required > self.level as i64 {
            self.next_level();
            gained += 1;
        }

        let line_score = line_clear_score(&self.config.scoring, cleared, self.level);
        self.score = self.score.saturating_add(line_score);
        debug!(cleared, line_score, total_lines = self.lines, "lines cleared");
        (gained, line_score)
    }

    fn next_level(&mut self) {
        self.score = self.score.saturating_add(self.config.scoring.level_up);
        self.level += 1;
        self.gravity_interval =
            gravity_interval(self.config.speed, self.config.speed_per_level, self.level);
        debug!(level = self.level, interval = ?self.gravity_interval, "level up");
    }

    /// Bring in the next queued piece. Returns false, leaving the board as it
    /// is, when the piece overlaps locked cells.
    fn spawn_next(&mut self) -> bool {
        let piece = ActivePiece::spawn(self.queue.next_piece(), self.config.width);
        if !piece.fits(&self.board, 0, 0) {
            self.top_out();
            return false;
        }
        self.active = Some(piece);
        true
    }

    fn top_out(&mut self) {
        self.active = None;
        self.game_over = true;
        info!(
            score = self.score,
            lines = self.lines,
            level = self.level,
            pieces = self.pieces_locked,
            "topped out"
        );
    }

    /// Rows the active piece could still fall.
    pub fn drop_distance(&self) -> Option<i16> {
        let active = self.active.as_ref()?;
        let mut dy = 0;
        while active.fits(&self.board, 0, dy + 1) {
            dy += 1;
        }
        Some(dy)
    }

    /// Landing cells of the active piece, when the ghost is enabled.
    pub fn ghost_cells(&self) -> Option<Vec<(i16, i16)>> {
        if !self.config.ghost {
            return None;
        }
        let active = self.active.as_ref()?;
        let dy = self.drop_distance()?;
        Some(active.cells().map(|(x, y)| (x, y + dy)).collect())
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.grid.clear();
        out.grid.extend(
            self.board
                .cells()
                .chunks(self.board.width().max(1) as usize)
                .map(|row| row.to_vec()),
        );

        out.active = self.active.as_ref().map(|a| ActiveSnapshot {
            cells: a.cells().collect(),
            color: a.color,
        });
        out.ghost = self.ghost_cells().and_then(|cells| {
            self.active.as_ref().map(|a| ActiveSnapshot {
                cells,
                color: a.color.with_alpha(GHOST_ALPHA),
            })
        });
        out.upcoming.clear();
        out.upcoming
            .extend(self.queue.upcoming().iter().map(QueuedSnapshot::from));

        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.extra_spacing = self.config.extra_spacing;
        out.gravity_interval_ms = self.gravity_interval.as_millis() as u64;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

fn applied(ok: bool) -> ActionOutcome {
    if ok {
        ActionOutcome::Applied
    } else {
        ActionOutcome::Rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_catalog;
    use crate::types::{ColorScheme, PolyominoConfig, SupplyStrategy};
    use std::sync::Arc;

    const GREY: Rgba = Rgba::new(0x80, 0x80, 0x80, 0xff);
    const CYAN: Rgba = Rgba::new(0x00, 0xff, 0xff, 0xff);

    fn classic_session(seed: u64) -> Session {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut catalogs = Catalogs::new();
        catalogs.insert(4, Arc::new(build_catalog(4, &mut rng).unwrap()));
        Session::new(GameConfig::classic(), &catalogs, seed).unwrap()
    }

    fn vertical_i(x: i16, y: i16) -> ActivePiece {
        ActivePiece {
            shape: Shape::from_rows(&[[1], [1], [1], [1]]).unwrap(),
            x,
            y,
            color: CYAN,
        }
    }

    /// Fill rows `ys` except column `gap`.
    fn fill_rows_except(session: &mut Session, ys: &[i16], gap: i16) {
        let width = session.board().width() as i16;
        for &y in ys {
            for x in (0..width).filter(|&x| x != gap) {
                session.board_mut().set(x, y, Some(GREY));
            }
        }
    }

    #[test]
    fn new_session_spawns_top_center() {
        let session = classic_session(1);
        let active = session.active().unwrap();
        assert_eq!(active.y, 0);
        assert_eq!(active.x, (10 - active.shape.cols() as i16) / 2);
        assert_eq!(session.upcoming().len(), 3);
        assert_eq!(session.level(), 1);
        assert_eq!(session.gravity_interval(), Duration::from_secs(1));
        assert!(!session.game_over());
    }

    #[test]
    fn moves_are_rejected_at_the_wall() {
        let mut session = classic_session(2);
        session.set_active(Some(vertical_i(0, 0)));
        assert_eq!(
            session.apply_action(GameAction::MoveLeft),
            ActionOutcome::Rejected
        );
        assert_eq!(
            session.apply_action(GameAction::MoveRight),
            ActionOutcome::Applied
        );
        assert_eq!(session.active().unwrap().x, 1);
    }

    #[test]
    fn moves_are_rejected_by_locked_cells() {
        let mut session = classic_session(2);
        session.set_active(Some(vertical_i(4, 0)));
        session.board_mut().set(5, 3, Some(GREY));
        assert!(!session.try_move(1, 0));
        assert!(session.try_move(-1, 0));
    }

    #[test]
    fn rotation_keeps_center_in_open_space() {
        let mut session = classic_session(3);
        session.set_active(Some(vertical_i(4, 5)));
        assert_eq!(
            session.apply_action(GameAction::RotateCw),
            ActionOutcome::Applied
        );
        let active = session.active().unwrap();
        // Offset (-2, 2) from the vertical bar's center (0, 2).
        assert_eq!((active.x, active.y), (2, 7));
        assert_eq!((active.shape.rows(), active.shape.cols()), (1, 4));
    }

    #[test]
    fn rotation_into_the_wall_is_rejected() {
        let mut session = classic_session(3);
        let before = vertical_i(0, 5);
        session.set_active(Some(before.clone()));
        assert_eq!(
            session.apply_action(GameAction::RotateCw),
            ActionOutcome::Rejected
        );
        assert_eq!(session.active(), Some(&before));
    }

    #[test]
    fn dropped_piece_locks_on_the_bottom_row() {
        let mut session = classic_session(4);
        session.set_active(Some(vertical_i(0, 0)));
        let outcome = session.apply_action(GameAction::HardDrop);
        assert_eq!(outcome, ActionOutcome::Locked { lines_cleared: 0 });
        for y in 16..20 {
            assert!(session.board().is_occupied(0, y));
        }
        assert!(session.board().is_occupied(0, 19));
        assert_eq!(session.board().occupied_count(), 4);
        // 16 rows fallen at 2 points each
        assert_eq!(session.score(), 32);
    }

    #[test]
    fn gravity_locks_without_bonus() {
        let mut session = classic_session(5);
        session.set_active(Some(vertical_i(0, 15)));
        assert_eq!(session.tick(), ActionOutcome::Applied);
        assert_eq!(session.tick(), ActionOutcome::Locked { lines_cleared: 0 });
        assert_eq!(session.score(), 0);
        assert!(session.board().is_occupied(0, 19));
    }

    #[test]
    fn soft_drop_awards_per_row() {
        let mut session = classic_session(6);
        session.set_active(Some(vertical_i(0, 0)));
        for _ in 0..3 {
            assert_eq!(
                session.apply_action(GameAction::SoftDrop),
                ActionOutcome::Applied
            );
        }
        assert_eq!(session.score(), 3);
    }

    #[test]
    fn completed_row_is_removed_and_rows_above_shift() {
        let mut session = classic_session(7);
        fill_rows_except(&mut session, &[19], 0);
        session.board_mut().set(5, 18, Some(GREY));
        session.board_mut().set(5, 17, Some(GREY));
        session.set_active(Some(ActivePiece {
            shape: Shape::from_rows(&[[1]]).unwrap(),
            x: 0,
            y: 19,
            color: CYAN,
        }));

        assert_eq!(
            session.lock_piece(),
            ActionOutcome::Locked { lines_cleared: 1 }
        );
        assert!(session.board().is_occupied(5, 19));
        assert!(session.board().is_occupied(5, 18));
        assert_eq!(session.board().occupied_count(), 2);
        assert_eq!(session.lines(), 1);
        assert_eq!(session.score(), 40);
    }

    #[test]
    fn two_rows_at_once_use_the_two_line_entry() {
        let mut session = classic_session(8);
        fill_rows_except(&mut session, &[18, 19], 9);
        session.set_active(Some(vertical_i(9, 0)));

        assert_eq!(
            session.apply_action(GameAction::HardDrop),
            ActionOutcome::Locked { lines_cleared: 2 }
        );
        let event = session.take_last_event().unwrap();
        assert_eq!(event.lines_cleared, 2);
        assert_eq!(event.line_clear_score, 100);
        assert!(session.take_last_event().is_none());
        // 100 for two lines plus 16 rows of hard drop
        assert_eq!(session.score(), 100 + 32);
        assert!(session.board().is_occupied(9, 19));
        assert!(session.board().is_occupied(9, 18));
    }

    #[test]
    fn ten_lines_level_up_once() {
        let mut config = GameConfig::classic();
        config.scoring.level_up = 500;
        config.scoring.harddrop = 0;
        let mut rng = StdRng::seed_from_u64(9);
        let mut catalogs = Catalogs::new();
        catalogs.insert(4, Arc::new(build_catalog(4, &mut rng).unwrap()));
        let mut session = Session::new(config, &catalogs, 9).unwrap();

        // Two rounds of four lines, then two more.
        for rows in [&[16, 17, 18, 19][..], &[16, 17, 18, 19], &[18, 19]] {
            session.board_mut().clear();
            fill_rows_except(&mut session, rows, 9);
            session.set_active(Some(vertical_i(9, 0)));
            session.apply_action(GameAction::HardDrop);
        }

        assert_eq!(session.lines(), 10);
        assert_eq!(session.level(), 2);
        let event = session.take_last_event().unwrap();
        assert_eq!(event.levels_gained, 1);
        // Two-line clear scored at the new level: 100 + 100 * 1
        assert_eq!(event.line_clear_score, 200);
        assert_eq!(session.score(), 1200 + 1200 + 500 + 200);
        assert_eq!(session.gravity_interval(), Duration::from_secs_f64(10.0 / 12.0));
    }

    #[test]
    fn blocked_spawn_tops_out_without_touching_the_grid() {
        let mut session = classic_session(10);
        // Fill the spawn area, leaving column 9 open so no row is full.
        for y in 0..4 {
            for x in 0..9 {
                session.board_mut().set(x, y, Some(GREY));
            }
        }
        session.set_active(Some(ActivePiece {
            shape: Shape::from_rows(&[[1]]).unwrap(),
            x: 9,
            y: 19,
            color: CYAN,
        }));
        let before = session.board().occupied_count();

        assert_eq!(session.lock_piece(), ActionOutcome::ToppedOut);
        assert!(session.game_over());
        assert!(session.active().is_none());
        assert_eq!(session.board().occupied_count(), before + 1);
        assert!(session.take_last_event().unwrap().topped_out);

        assert_eq!(session.tick(), ActionOutcome::Rejected);
        let result = session.result().unwrap();
        assert_eq!(result.lines, 0);
        assert_eq!(result.leaderboard_key, session.leaderboard_key());
    }

    #[test]
    fn resting_in_the_top_margin_tops_out() {
        let mut session = classic_session(14);
        for y in 3..20 {
            session.board_mut().set(0, y, Some(GREY));
        }
        let monomino = ActivePiece {
            shape: Shape::from_rows(&[[1]]).unwrap(),
            x: 0,
            y: 0,
            color: CYAN,
        };

        // Row 3 is still below the margin.
        session.board_mut().set(0, 3, None);
        session.set_active(Some(monomino.clone()));
        assert_eq!(
            session.apply_action(GameAction::HardDrop),
            ActionOutcome::Locked { lines_cleared: 0 }
        );
        assert!(session.board().is_occupied(0, 3));

        session.set_active(Some(monomino));
        let before = session.board().occupied_count();
        let score = session.score();
        assert_eq!(
            session.apply_action(GameAction::HardDrop),
            ActionOutcome::ToppedOut
        );
        assert!(session.game_over());
        assert!(session.active().is_none());
        assert!(!session.board().is_occupied(0, 2));
        assert_eq!(session.board().occupied_count(), before);
        // Two rows of hard drop
        assert_eq!(session.score(), score + 4);
        let event = session.take_last_event().unwrap();
        assert!(event.topped_out);
        assert_eq!(event.lines_cleared, 0);
    }

    #[test]
    fn pause_blocks_everything_but_pause() {
        let mut session = classic_session(11);
        assert_eq!(
            session.apply_action(GameAction::Pause),
            ActionOutcome::Applied
        );
        assert!(session.paused());
        assert_eq!(session.tick(), ActionOutcome::Rejected);
        assert_eq!(
            session.apply_action(GameAction::MoveLeft),
            ActionOutcome::Rejected
        );
        session.apply_action(GameAction::Pause);
        assert!(!session.paused());
        assert_eq!(session.tick(), ActionOutcome::Applied);
    }

    #[test]
    fn ghost_sits_on_the_stack() {
        let mut session = classic_session(12);
        session.board_mut().set(3, 10, Some(GREY));
        session.set_active(Some(vertical_i(3, 0)));
        assert_eq!(session.drop_distance(), Some(6));
        let ghost = session.ghost_cells().unwrap();
        assert_eq!(ghost, vec![(3, 6), (3, 7), (3, 8), (3, 9)]);

        let snapshot = session.snapshot();
        let ghost = snapshot.ghost.unwrap();
        assert_eq!(ghost.color.alpha(), GHOST_ALPHA);
        assert_eq!(snapshot.grid.len(), 20);
        assert_eq!(snapshot.grid[10][3], Some(GREY));
    }

    #[test]
    fn ghost_can_be_disabled() {
        let mut config = GameConfig::classic();
        config.ghost = false;
        config.polyominoes.insert(
            4,
            PolyominoConfig {
                next_piece: SupplyStrategy::JustInTime,
                chance: 1,
                colors: ColorScheme::Retro,
            },
        );
        let session = Session::new(config, &Catalogs::new(), 13).unwrap();
        assert!(session.ghost_cells().is_none());
        assert!(session.snapshot().ghost.is_none());
    }

    #[test]
    fn missing_catalog_stops_the_session() {
        let err = Session::new(GameConfig::classic(), &Catalogs::new(), 1).unwrap_err();
        assert_eq!(err, ConfigError::MissingCatalog(4));
    }
}
