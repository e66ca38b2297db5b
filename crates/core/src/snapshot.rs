//! Snapshot module - owned copies of a session for renderers and observers
//!
//! A snapshot holds everything needed to draw a session: the locked grid,
//! the active and ghost cells with their colours, the preview queue and the
//! counters. It can be reused across frames via
//! [`Session::snapshot_into`](crate::game_state::Session::snapshot_into).

use serde::Serialize;

use crate::shape::Shape;
use crate::supply::QueuedPiece;
use crate::types::{Cell, Rgba};

/// Cells and colour of the active piece or its ghost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveSnapshot {
    pub cells: Vec<(i16, i16)>,
    pub color: Rgba,
}

/// One preview entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueuedSnapshot {
    pub shape: Shape,
    pub color: Rgba,
}

impl From<&QueuedPiece> for QueuedSnapshot {
    fn from(value: &QueuedPiece) -> Self {
        Self {
            shape: value.shape.clone(),
            color: value.color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SessionSnapshot {
    pub width: u16,
    pub height: u16,
    /// Locked cells, one row per entry, top row first.
    pub grid: Vec<Vec<Cell>>,
    pub active: Option<ActiveSnapshot>,
    pub ghost: Option<ActiveSnapshot>,
    pub upcoming: Vec<QueuedSnapshot>,
    pub score: u64,
    pub lines: u32,
    pub level: u32,
    pub paused: bool,
    pub game_over: bool,
    /// Cosmetic flag passed through for the renderer.
    pub extra_spacing: bool,
    pub gravity_interval_ms: u64,
}

impl SessionSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Number of locked cells.
    pub fn occupied_count(&self) -> usize {
        self.grid.iter().flatten().filter(|c| c.is_some()).count()
    }
}
