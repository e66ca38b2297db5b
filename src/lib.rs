//! Polyominomania (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `polyominomania::{core, engine, types}` and ships the
//! headless runner binary.

pub use polyominomania_core as core;
pub use polyominomania_engine as engine;
pub use polyominomania_types as types;
