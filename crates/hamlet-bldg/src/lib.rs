//! Building models for land parcels: generation, caching and per-region facets.
//!
//! A [`BuildingGenerator`] turns a [`Parcel`] and a height surface into
//! [`Building`]s. The [`BuildingCache`] makes sure that happens at most once
//! per parcel even when regions are processed on many threads, and the
//! [`BuildingFacetProvider`] gathers the buildings touching one region into a
//! [`BuildingFacet`].

mod building;
mod cache;
mod deco;
mod error;
mod facet;
mod generator;
mod parcel;
mod provider;
mod roof;

pub use building::{Building, BuildingPart, Primitive};
pub use cache::{BuildingCache, BuildingSet};
pub use deco::{ColumnDecoration, Decoration, SingleBlockDecoration};
pub use error::{GenerationError, ModelError};
pub use facet::{
    BuildingFacet, EntityFacet, GeneratingRegion, ParcelFacet, Settlement, SettlementFacet,
};
pub use generator::{
    BuildingGenerator, BuildingStyle, ColumnStyle, RectBuildingGenerator, gate_position,
};
pub use parcel::{Parcel, ParcelKey};
pub use provider::BuildingFacetProvider;
pub use roof::{FlatRoof, GableRoof, HipRoof, Roof, RoofKind};
