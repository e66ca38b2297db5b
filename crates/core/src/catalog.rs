//! Catalog module - complete sets of one-sided polyominoes
//!
//! A catalog is built by generating random shapes and keeping those that are
//! not a rotation of one already kept, until the known one-sided count for
//! the size is reached. Reflections stay distinct.
//!
//! Building is unbounded for large sizes (around 10 cells and up it takes
//! hours). A [`CancelToken`] is checked after each generated shape, and a
//! catalog is only returned once complete.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, trace, warn};

use crate::generator::generate;
use crate::geometry::rotate;
use crate::shape::Shape;
use crate::types::{one_sided_count, ColorScheme, PieceName, Rgba};

/// Published catalogs keyed by piece size.
pub type Catalogs = BTreeMap<u8, Arc<Catalog>>;

/// Catalog construction failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogError {
    /// No known shape count for this size (outside 1..=30).
    UnsupportedSize(u8),
    /// The build was cancelled before completion.
    Cancelled(u8),
}

impl CatalogError {
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::UnsupportedSize(_) => "unsupported_size",
            CatalogError::Cancelled(_) => "cancelled",
        }
    }

    pub fn message(&self) -> String {
        match self {
            CatalogError::UnsupportedSize(n) => {
                format!("piece size {} is outside 1..=30", n)
            }
            CatalogError::Cancelled(n) => format!("catalog build for size {} was cancelled", n),
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CatalogError {}

/// Shared cancellation flag for long-running builds.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Progress of a catalog build, reported after each accepted shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildProgress {
    pub size: u8,
    pub generated: u64,
    pub target: u64,
    /// Typical total build time for this size.
    pub estimate: &'static str,
}

impl fmt::Display for BuildProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Number {}: Generated {} out of {} so far, normally takes {}",
            self.size, self.generated, self.target, self.estimate
        )
    }
}

/// Rough wall-clock estimate for building a catalog of this size.
pub fn install_time(size: u8) -> &'static str {
    match size {
        0..=5 => "under a second",
        6 => "a few seconds",
        7 => "up to a minute",
        8 => "a few minutes",
        9 => "up to 30 minutes",
        10 => "up to 3 hours",
        _ => "many days",
    }
}

/// Every distinct one-sided polyomino of one size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    size: u8,
    shapes: Vec<Shape>,
}

impl Catalog {
    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// Whether `candidate`, turned 0°, 90°, 180° or 270°, equals any shape in `existing`.
pub fn is_duplicate(existing: &[Shape], candidate: &Shape) -> bool {
    is_duplicate_by(candidate, |shape| existing.contains(shape))
}

fn is_duplicate_by(candidate: &Shape, contains: impl Fn(&Shape) -> bool) -> bool {
    let mut turned = candidate.clone();
    for _ in 0..4 {
        if contains(&turned) {
            return true;
        }
        turned = rotate(&turned, true);
    }
    false
}

/// Build the full catalog for `size`.
pub fn build_catalog<R: Rng + ?Sized>(size: u8, rng: &mut R) -> Result<Catalog, CatalogError> {
    build_catalog_with(size, rng, &CancelToken::new(), |_| {})
}

/// Build the full catalog for `size`, checking `cancel` after every generated
/// shape and reporting each newly accepted one.
pub fn build_catalog_with<R, F>(
    size: u8,
    rng: &mut R,
    cancel: &CancelToken,
    mut on_progress: F,
) -> Result<Catalog, CatalogError>
where
    R: Rng + ?Sized,
    F: FnMut(&BuildProgress),
{
    let target = one_sided_count(size).ok_or(CatalogError::UnsupportedSize(size))?;
    let estimate = install_time(size);

    let mut shapes = Vec::new();
    // Same contents as `shapes`, for constant-time membership.
    let mut index = HashSet::new();
    let mut attempts: u64 = 0;

    while (shapes.len() as u64) < target {
        let shape = generate(size, rng);
        attempts += 1;

        if !is_duplicate_by(&shape, |s| index.contains(s)) {
            trace!(size, accepted = shapes.len() + 1, "new shape\n{}", shape);
            index.insert(shape.clone());
            shapes.push(shape);
            on_progress(&BuildProgress {
                size,
                generated: shapes.len() as u64,
                target,
                estimate,
            });
        }

        if cancel.is_cancelled() {
            warn!(size, kept = shapes.len(), target, "catalog build cancelled");
            return Err(CatalogError::Cancelled(size));
        }
    }

    info!(size, shapes = shapes.len(), attempts, "catalog complete");
    Ok(Catalog { size, shapes })
}

/// Reference orientations of the classical tetrominoes.
///
/// Only the orientations the generator can emit (at most two columns wide)
/// are listed; wider ones are never looked up.
const REFERENCE_SHAPES: [(PieceName, &[&[&[u8]]]); 7] = [
    (PieceName::O, &[&[&[1, 1], &[1, 1]]]),
    (PieceName::I, &[&[&[1], &[1], &[1], &[1]]]),
    (
        PieceName::T,
        &[&[&[0, 1], &[1, 1], &[0, 1]], &[&[1, 0], &[1, 1], &[1, 0]]],
    ),
    (PieceName::S, &[&[&[1, 0], &[1, 1], &[0, 1]]]),
    (PieceName::Z, &[&[&[0, 1], &[1, 1], &[1, 0]]]),
    (
        PieceName::J,
        &[&[&[0, 1], &[0, 1], &[1, 1]], &[&[1, 1], &[1, 0], &[1, 0]]],
    ),
    (
        PieceName::L,
        &[&[&[1, 1], &[0, 1], &[0, 1]], &[&[1, 0], &[1, 0], &[1, 1]]],
    ),
];

/// Canonical letter of a classical tetromino, or `None` for anything else.
pub fn piece_name(shape: &Shape) -> Option<PieceName> {
    REFERENCE_SHAPES.iter().find_map(|(name, variants)| {
        variants
            .iter()
            .any(|rows| shape.matches_rows(*rows))
            .then_some(*name)
    })
}

/// Colour of a shape in `scheme`; unnamed shapes get a random letter's colour.
pub fn color<R: Rng + ?Sized>(shape: &Shape, scheme: ColorScheme, rng: &mut R) -> Rgba {
    let name = piece_name(shape)
        .or_else(|| PieceName::ALL.choose(rng).copied())
        .unwrap_or(PieceName::O);
    scheme.color_of(name)
}
