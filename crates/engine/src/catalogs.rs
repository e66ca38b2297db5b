//! Catalog service - cancellable, per-size exclusive catalog builds
//!
//! Complete catalogs are published into a shared map and handed out as
//! `Arc<Catalog>`. A build that is cancelled or fails publishes nothing.
//! Two builds of the same size never run at once; different sizes build in
//! parallel on the rayon pool.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::core::catalog::{build_catalog_with, BuildProgress, CancelToken, Catalog, Catalogs};
use crate::core::CatalogError;
use crate::types::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// Another build of this size is still running.
    AlreadyBuilding(u8),
    Catalog(CatalogError),
}

impl BuildError {
    pub fn code(&self) -> &'static str {
        match self {
            BuildError::AlreadyBuilding(_) => "already_building",
            BuildError::Catalog(e) => e.code(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            BuildError::AlreadyBuilding(n) => {
                format!("a catalog for size {} is already being built", n)
            }
            BuildError::Catalog(e) => e.message(),
        }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for BuildError {}

impl From<CatalogError> for BuildError {
    fn from(value: CatalogError) -> Self {
        BuildError::Catalog(value)
    }
}

/// Marks a size as being built until dropped.
struct InFlight<'a> {
    sizes: &'a Mutex<HashSet<u8>>,
    size: u8,
}

impl<'a> InFlight<'a> {
    fn claim(sizes: &'a Mutex<HashSet<u8>>, size: u8) -> Option<Self> {
        sizes.lock().insert(size).then_some(Self { sizes, size })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.sizes.lock().remove(&self.size);
    }
}

/// Shared store of published catalogs.
#[derive(Debug, Default)]
pub struct CatalogService {
    published: Mutex<Catalogs>,
    in_flight: Mutex<HashSet<u8>>,
}

impl CatalogService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, size: u8) -> Option<Arc<Catalog>> {
        self.published.lock().get(&size).cloned()
    }

    /// Copy of every published catalog.
    pub fn catalogs(&self) -> Catalogs {
        self.published.lock().clone()
    }

    /// Whether a build of `size` is running right now.
    pub fn is_building(&self, size: u8) -> bool {
        self.in_flight.lock().contains(&size)
    }

    /// Publish a catalog obtained elsewhere (e.g. loaded from disk).
    pub fn publish(&self, catalog: Catalog) -> Arc<Catalog> {
        let catalog = Arc::new(catalog);
        self.published
            .lock()
            .insert(catalog.size(), Arc::clone(&catalog));
        catalog
    }

    /// Build and publish the catalog for `size`, or return the published one.
    pub fn build<R, F>(
        &self,
        size: u8,
        rng: &mut R,
        cancel: &CancelToken,
        on_progress: F,
    ) -> Result<Arc<Catalog>, BuildError>
    where
        R: Rng + ?Sized,
        F: FnMut(&BuildProgress),
    {
        if let Some(existing) = self.get(size) {
            return Ok(existing);
        }

        let _guard = InFlight::claim(&self.in_flight, size).ok_or(BuildError::AlreadyBuilding(size))?;
        // Another thread may have finished between the lookup and the claim.
        if let Some(existing) = self.get(size) {
            return Ok(existing);
        }

        debug!(size, "catalog build started");
        let catalog = build_catalog_with(size, rng, cancel, on_progress)?;
        Ok(self.publish(catalog))
    }

    /// Build every catalog `config` needs, in parallel, and return them.
    ///
    /// Each size gets its own generator, derived from `seed` when given.
    /// The first failure is returned; catalogs completed before it stay
    /// published.
    pub fn build_for_config<F>(
        &self,
        config: &GameConfig,
        seed: Option<u64>,
        cancel: &CancelToken,
        on_progress: F,
    ) -> Result<Catalogs, BuildError>
    where
        F: Fn(&BuildProgress) + Sync,
    {
        let sizes: Vec<u8> = config
            .polyominoes
            .iter()
            .filter(|(_, poly)| poly.next_piece.needs_catalog())
            .map(|(&size, _)| size)
            .collect();

        let built: Vec<(u8, Arc<Catalog>)> = sizes
            .par_iter()
            .map(|&size| {
                let mut rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(size as u64)),
                    None => StdRng::from_entropy(),
                };
                self.build(size, &mut rng, cancel, &on_progress)
                    .map(|catalog| (size, catalog))
            })
            .collect::<Result<_, _>>()?;

        info!(sizes = ?sizes, "catalogs ready");
        Ok(built.into_iter().collect())
    }
}
