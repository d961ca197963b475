//! Per-region collections of world entities.
//!
//! A facet holds the entities that touch one generating region. It is
//! filled by a provider and then handed on by value; consumers only read it.

use std::hash::Hash;
use std::sync::Arc;

use hamlet_geom::{Border3, IVec2, Rect2i, Region3i};
use rustc_hash::FxHashSet;

use crate::building::Building;
use crate::parcel::Parcel;

/// The region being generated together with the margin providers may read
/// or write beyond it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratingRegion {
    pub region: Region3i,
    pub border: Border3,
}

impl GeneratingRegion {
    pub fn new(region: Region3i, border: Border3) -> Self {
        Self { region, border }
    }

    /// The region grown by its border.
    pub fn bordered(&self) -> Region3i {
        self.region.expand(&self.border)
    }

    /// Horizontal extent of [`bordered`](Self::bordered).
    pub fn bordered_area(&self) -> Rect2i {
        self.bordered().area()
    }
}

/// A set of entities relevant to one region, in insertion order.
///
/// Adding an entity that is already present is a no-op.
#[derive(Clone, Debug)]
pub struct EntityFacet<T> {
    region: Region3i,
    border: Border3,
    seen: FxHashSet<T>,
    entities: Vec<T>,
}

impl<T: Clone + Eq + Hash> EntityFacet<T> {
    pub fn new(region: Region3i, border: Border3) -> Self {
        Self {
            region,
            border,
            seen: FxHashSet::default(),
            entities: Vec::new(),
        }
    }

    pub fn for_region(region: &GeneratingRegion) -> Self {
        Self::new(region.region, region.border)
    }

    /// Inserts `entity`. Returns `false` if an equal entity was already there.
    pub fn add(&mut self, entity: T) -> bool {
        if !self.seen.insert(entity.clone()) {
            return false;
        }
        self.entities.push(entity);
        true
    }

    pub fn entities(&self) -> &[T] {
        &self.entities
    }

    pub fn contains(&self, entity: &T) -> bool {
        self.seen.contains(entity)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn region(&self) -> Region3i {
        self.region
    }

    pub fn border(&self) -> Border3 {
        self.border
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entities.iter()
    }
}

impl<T: Clone + Eq + Hash> Extend<T> for EntityFacet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for entity in iter {
            self.add(entity);
        }
    }
}

impl<'a, T> IntoIterator for &'a EntityFacet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

/// Buildings touching a region.
pub type BuildingFacet = EntityFacet<Arc<Building>>;

/// Parcels touching a region.
pub type ParcelFacet = EntityFacet<Parcel>;

/// Settlements touching a region.
pub type SettlementFacet = EntityFacet<Settlement>;

impl BuildingFacet {
    pub fn buildings(&self) -> &[Arc<Building>] {
        self.entities()
    }
}

impl ParcelFacet {
    pub fn parcels(&self) -> &[Parcel] {
        self.entities()
    }
}

impl SettlementFacet {
    pub fn settlements(&self) -> &[Settlement] {
        self.entities()
    }
}

/// A named cluster of parcels around a centre.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Settlement {
    pub name: String,
    pub center: IVec2,
    /// Radius in blocks; negative values are stored as zero.
    pub radius: i32,
}

impl Settlement {
    pub fn new(name: impl Into<String>, center: IVec2, radius: i32) -> Self {
        Self {
            name: name.into(),
            center,
            radius: radius.max(0),
        }
    }

    /// Returns true if `(x, z)` lies within the settlement's radius.
    pub fn contains(&self, x: i32, z: i32) -> bool {
        let d = IVec2::new(x, z) - self.center;
        let (dx, dz) = (i64::from(d.x), i64::from(d.y));
        let r = i64::from(self.radius);
        dx * dx + dz * dz <= r * r
    }

    /// Bounding square of the settlement.
    pub fn bounds(&self) -> Rect2i {
        let r = IVec2::splat(self.radius);
        Rect2i::from_min_max(self.center - r, self.center + r)
    }
}
