//! Concurrent, single-flight memoization of per-parcel building generation.
//!
//! Regions are generated on worker threads and a parcel usually straddles
//! several of them. Every region touching a parcel asks the cache for its
//! buildings; the first caller runs the generator and everyone else waits on
//! the same cell and receives the same shared result.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use hamlet_terrain::HeightSurface;

use crate::building::Building;
use crate::error::GenerationError;
use crate::generator::BuildingGenerator;
use crate::parcel::{Parcel, ParcelKey};

/// The buildings of one parcel, shared between every region that asks.
pub type BuildingSet = Arc<[Arc<Building>]>;

type Slot = Arc<OnceLock<Result<BuildingSet, GenerationError>>>;

/// Memoizes a [`BuildingGenerator`] per [`ParcelKey`].
///
/// The generator runs at most once per key for the lifetime of the cache.
/// Failures are memoized like successes, so a parcel whose generation
/// failed keeps failing with the same error without re-running the
/// generator.
pub struct BuildingCache {
    generator: Arc<dyn BuildingGenerator>,
    entries: DashMap<ParcelKey, Slot>,
    computations: AtomicU64,
}

impl BuildingCache {
    pub fn new(generator: Arc<dyn BuildingGenerator>) -> Self {
        Self {
            generator,
            entries: DashMap::new(),
            computations: AtomicU64::new(0),
        }
    }

    /// Returns the buildings for `parcel`, generating them on first use.
    ///
    /// Concurrent callers with the same key block until the single
    /// computation finishes. Callers with other keys are not blocked.
    pub fn get_or_compute(
        &self,
        parcel: &Parcel,
        surface: &dyn HeightSurface,
    ) -> Result<BuildingSet, GenerationError> {
        // Clone the slot out so the shard lock is released before generating.
        let slot = self.entries.entry(parcel.key()).or_default().clone();
        slot.get_or_init(|| self.compute(parcel, surface)).clone()
    }

    /// Returns the cached result without generating anything.
    pub fn get(&self, key: &ParcelKey) -> Option<Result<BuildingSet, GenerationError>> {
        let slot = self.entries.get(key)?.clone();
        slot.get().cloned()
    }

    /// Number of parcels with a cache entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of times the generator has been invoked.
    pub fn computations(&self) -> u64 {
        self.computations.load(Ordering::Relaxed)
    }

    fn compute(
        &self,
        parcel: &Parcel,
        surface: &dyn HeightSurface,
    ) -> Result<BuildingSet, GenerationError> {
        self.computations.fetch_add(1, Ordering::Relaxed);
        let generator = &self.generator;
        let result = panic::catch_unwind(AssertUnwindSafe(|| generator.generate(parcel, surface)))
            .unwrap_or_else(|payload| Err(GenerationError::Panicked(panic_message(&*payload))));
        let buildings = result?;
        tracing::trace!(
            "generated {} building(s) for parcel {}",
            buildings.len(),
            parcel.key()
        );
        Ok(buildings.into_iter().map(Arc::new).collect())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
