//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the polyomino algorithms and the session state machine.
//! It has **no dependencies** on rendering, input or I/O:
//!
//! - **Deterministic**: a seeded generator reproduces catalogs and sessions
//! - **Synchronous**: every request returns immediately; nothing sleeps
//! - **Portable**: runs headless, in tests, or behind any front end
//!
//! # Module Structure
//!
//! - [`shape`]: cropped occupancy matrices
//! - [`generator`]: random-walk polyomino generation
//! - [`geometry`]: rotation and rotation centering
//! - [`catalog`]: duplicate detection, full catalogs per size, names and colours
//! - [`supply`]: random / bag / just-in-time piece selection and the preview queue
//! - [`board`]: the locked-cell grid with cascading line clears
//! - [`scoring`]: line scores, leveling and gravity speed
//! - [`config`]: session preconditions and the leaderboard key
//! - [`game_state`]: the [`Session`] state machine
//! - [`snapshot`]: owned copies for renderers
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use std::sync::Arc;
//!
//! use polyominomania_core::catalog::build_catalog;
//! use polyominomania_core::types::{ActionOutcome, GameAction, GameConfig};
//! use polyominomania_core::Session;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let mut catalogs = BTreeMap::new();
//! catalogs.insert(4, Arc::new(build_catalog(4, &mut rng).unwrap()));
//!
//! let mut session = Session::new(GameConfig::classic(), &catalogs, 7).unwrap();
//! session.apply_action(GameAction::MoveLeft);
//! session.apply_action(GameAction::RotateCw);
//! let outcome = session.apply_action(GameAction::HardDrop);
//!
//! assert!(matches!(outcome, ActionOutcome::Locked { .. }));
//! assert!(session.score() > 0); // Hard drop awards points per row
//! ```
//!
//! # Timing
//!
//! Gravity is a [`GameAction::Tick`](types::GameAction::Tick) sent by an
//! outside timer every [`Session::gravity_interval`], which is
//! `10 / (speed + speed_per_level * (level - 1))` seconds.

pub mod board;
pub mod catalog;
pub mod config;
pub mod game_state;
pub mod generator;
pub mod geometry;
pub mod scoring;
pub mod shape;
pub mod snapshot;
pub mod supply;

pub use polyominomania_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use catalog::{
    build_catalog, build_catalog_with, is_duplicate, piece_name, BuildProgress, CancelToken,
    Catalog, CatalogError, Catalogs,
};
pub use config::{check_config, leaderboard_key, ConfigError};
pub use game_state::{ActivePiece, GameResult, Session};
pub use generator::generate;
pub use geometry::{center_point, fix_rotation_position, rotate};
pub use shape::{Shape, ShapeError};
pub use snapshot::{ActiveSnapshot, QueuedSnapshot, SessionSnapshot};
pub use supply::{PieceQueue, PieceSupply, QueuedPiece};
