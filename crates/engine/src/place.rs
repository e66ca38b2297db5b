//! Placement - turn, shift and hard-drop the active piece in one request
//!
//! A placement either completes or leaves the session exactly as it was.
//! [`best_placement`] scores every reachable placement on a copy of the
//! session and is what the headless `play` command uses.

use crate::core::{Board, Session};
use crate::types::{ActionOutcome, GameAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    RotationBlocked,
    XOutOfBounds,
    XBlocked,
    NotPlayable,
    NoActive,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::NotPlayable => "not_playable",
            PlaceError::RotationBlocked
            | PlaceError::XOutOfBounds
            | PlaceError::XBlocked
            | PlaceError::NoActive => "invalid_place",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::RotationBlocked => "could not rotate to target orientation",
            PlaceError::XOutOfBounds => "target x would place piece out of bounds",
            PlaceError::XBlocked => "could not move to target x due to collision",
            PlaceError::NotPlayable => "session is paused or over",
            PlaceError::NoActive => "no active piece",
        }
    }
}

/// A target for the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Clockwise quarter turns from the spawn orientation (0..4).
    pub turns: u8,
    /// Left edge of the turned piece's bounding box.
    pub x: i16,
}

/// Turn the active piece, shift it to `placement.x`, then hard drop.
///
/// Turns go whichever way is shorter; for a half turn clockwise is tried
/// first, then counter-clockwise.
pub fn apply_place(session: &mut Session, placement: Placement) -> Result<ActionOutcome, PlaceError> {
    if session.paused() || session.game_over() {
        return Err(PlaceError::NotPlayable);
    }
    if session.active().is_none() {
        return Err(PlaceError::NoActive);
    }

    let before = session.clone();
    let result = place_on(session, placement);
    if result.is_err() {
        *session = before;
    }
    result
}

fn place_on(session: &mut Session, placement: Placement) -> Result<ActionOutcome, PlaceError> {
    let turns = placement.turns % 4;
    let plans: [(GameAction, u8); 2] = if turns == 3 {
        [(GameAction::RotateCcw, 1), (GameAction::RotateCw, 3)]
    } else {
        [(GameAction::RotateCw, turns), (GameAction::RotateCcw, (4 - turns) % 4)]
    };

    let start = session.clone();
    let mut rotated = false;
    for (action, steps) in plans {
        *session = start.clone();
        if (0..steps).all(|_| session.apply_action(action) == ActionOutcome::Applied) {
            rotated = true;
            break;
        }
    }
    if !rotated {
        return Err(PlaceError::RotationBlocked);
    }

    let Some(active) = session.active() else {
        return Err(PlaceError::NoActive);
    };
    let width = session.board().width() as i16;
    if placement.x < 0 || placement.x + active.shape.cols() as i16 > width {
        return Err(PlaceError::XOutOfBounds);
    }

    let dx = placement.x - active.x;
    let step = if dx > 0 {
        GameAction::MoveRight
    } else {
        GameAction::MoveLeft
    };
    for _ in 0..dx.abs() {
        if session.apply_action(step) != ActionOutcome::Applied {
            return Err(PlaceError::XBlocked);
        }
    }

    match session.apply_action(GameAction::HardDrop) {
        ActionOutcome::Rejected => Err(PlaceError::NotPlayable),
        outcome => Ok(outcome),
    }
}

/// Pick the placement that leaves the flattest, hole-free stack.
///
/// Returns `None` when no placement is possible.
pub fn best_placement(session: &Session) -> Option<Placement> {
    let width = session.board().width() as i16;
    let mut best: Option<(i64, Placement)> = None;

    for turns in 0..4u8 {
        for x in 0..width {
            let placement = Placement { turns, x };
            let mut trial = session.clone();
            let Ok(outcome) = apply_place(&mut trial, placement) else {
                continue;
            };
            let value = evaluate(trial.board(), outcome);
            if best.map_or(true, |(b, _)| value > b) {
                best = Some((value, placement));
            }
        }
    }
    best.map(|(_, placement)| placement)
}

/// Weighted stack quality; higher is better.
fn evaluate(board: &Board, outcome: ActionOutcome) -> i64 {
    let lines = match outcome {
        ActionOutcome::Locked { lines_cleared } => lines_cleared as i64,
        ActionOutcome::ToppedOut => return i64::MIN,
        _ => 0,
    };

    let width = board.width() as i16;
    let height = board.height() as i16;
    let mut aggregate = 0i64;
    let mut holes = 0i64;
    let mut bumpiness = 0i64;
    let mut previous: Option<i64> = None;

    for x in 0..width {
        let top = (0..height).find(|&y| board.is_occupied(x, y));
        let column_height = top.map_or(0, |y| (height - y) as i64);
        if let Some(top) = top {
            holes += (top..height).filter(|&y| board.is_valid(x, y)).count() as i64;
        }
        if let Some(prev) = previous {
            bumpiness += (prev - column_height).abs();
        }
        aggregate += column_height;
        previous = Some(column_height);
    }

    76 * lines - 51 * aggregate - 36 * holes - 18 * bumpiness
}
