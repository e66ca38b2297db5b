//! Host-side runtime for polyomino sessions.
//!
//! The core crate is synchronous and owns no threads or timers. This crate
//! supplies what a host needs around it:
//!
//! - [`catalogs`]: shared, cancellable catalog building ([`CatalogService`])
//! - [`clock`]: a gravity accumulator that turns elapsed time into ticks
//! - [`place`]: one-shot placements and a simple placement picker for autoplay

pub mod catalogs;
pub mod clock;
pub mod place;

pub use polyominomania_core as core;
pub use polyominomania_types as types;

pub use catalogs::{BuildError, CatalogService};
pub use clock::GravityClock;
pub use place::{apply_place, best_placement, PlaceError, Placement};
