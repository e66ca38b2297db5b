//! Rule-set configuration.
//!
//! Field names match the JSON mode files, so a host can load one with
//! `serde_json::from_str::<GameConfig>(..)`. The structures are assumed to be
//! schema-valid by the time they reach a session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ColorScheme, SupplyStrategy};

/// Per-size piece settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolyominoConfig {
    /// Supply strategy for this size.
    pub next_piece: SupplyStrategy,
    /// Relative weight of this size when choosing the next piece.
    pub chance: u32,
    /// Palette used to colour pieces of this size.
    pub colors: ColorScheme,
}

/// Scoring constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Bonus for every locked piece.
    pub polyomino: u64,
    /// Bonus per row moved by a soft drop.
    pub softdrop: u64,
    /// Bonus per row moved by a hard drop.
    pub harddrop: u64,
    /// Bonus for every level increase.
    pub level_up: u64,
    /// Base points keyed by lines cleared in one event.
    pub lines: BTreeMap<u32, u64>,
    /// Extra points per level above the first, keyed like `lines`.
    pub lines_per_level: BTreeMap<u32, u64>,
}

/// A complete rule-set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub description: String,
    /// Piece sizes in play.
    pub polyominoes: BTreeMap<u8, PolyominoConfig>,
    pub scoring: ScoringConfig,
    /// Lines needed per level.
    pub lines_per_level: u32,
    pub first_level: u32,
    pub speed: u32,
    pub speed_per_level: u32,
    pub width: u16,
    pub height: u16,
    /// Look-ahead count of the preview queue.
    pub next_pieces: usize,
    pub ghost: bool,
    /// Rendering hint only.
    #[serde(default)]
    pub extra_spacing: bool,
}

impl GameConfig {
    /// Classic tetromino rules on a 10x20 grid.
    pub fn classic() -> Self {
        let table: BTreeMap<u32, u64> = [(1, 40), (2, 100), (3, 300), (4, 1200)]
            .into_iter()
            .collect();

        let mut polyominoes = BTreeMap::new();
        polyominoes.insert(
            4,
            PolyominoConfig {
                next_piece: SupplyStrategy::Bag,
                chance: 1,
                colors: ColorScheme::Original,
            },
        );

        Self {
            description: "Classic tetromino rules".to_string(),
            polyominoes,
            scoring: ScoringConfig {
                polyomino: 0,
                softdrop: 1,
                harddrop: 2,
                level_up: 0,
                lines: table.clone(),
                lines_per_level: table,
            },
            lines_per_level: 10,
            first_level: 1,
            speed: 10,
            speed_per_level: 2,
            width: 10,
            height: 20,
            next_pieces: 3,
            ghost: true,
            extra_spacing: false,
        }
    }

    /// Largest configured piece size (0 when none are configured).
    pub fn largest_size(&self) -> u8 {
        self.polyominoes.keys().copied().max().unwrap_or(0)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}
