//! Assembles the [`BuildingFacet`] for one generating region.

use std::sync::Arc;

use hamlet_terrain::HeightSurface;

use crate::cache::BuildingCache;
use crate::facet::{BuildingFacet, GeneratingRegion, ParcelFacet};

/// Collects the buildings of every parcel touching a region.
///
/// Stateless apart from the shared cache, so one provider can serve any
/// number of regions concurrently.
#[derive(Clone)]
pub struct BuildingFacetProvider {
    cache: Arc<BuildingCache>,
}

impl BuildingFacetProvider {
    pub fn new(cache: Arc<BuildingCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<BuildingCache> {
        &self.cache
    }

    /// Builds the facet for `region`.
    ///
    /// Parcels outside the bordered area are ignored. A parcel whose
    /// generation fails is logged and contributes no buildings; the rest of
    /// the region is unaffected.
    pub fn process(
        &self,
        region: &GeneratingRegion,
        parcels: &ParcelFacet,
        surface: &dyn HeightSurface,
    ) -> BuildingFacet {
        let mut facet = BuildingFacet::for_region(region);
        let area = region.bordered_area();
        let mut failed = 0usize;

        for parcel in parcels.iter().filter(|p| p.shape().intersects(&area)) {
            match self.cache.get_or_compute(parcel, surface) {
                Ok(buildings) => facet.extend(buildings.iter().cloned()),
                Err(e) => {
                    failed += 1;
                    tracing::error!(
                        "could not generate buildings for parcel {} in region {}: {e}",
                        parcel.key(),
                        region.region
                    );
                }
            }
        }

        tracing::debug!(
            "region {}: {} building(s) from {} parcel(s), {} failed",
            region.region,
            facet.len(),
            parcels.len(),
            failed
        );
        facet
    }
}
