//! Parcels: oriented rectangular plots that buildings are placed on.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use hamlet_geom::{Orientation, Rect2i};

use crate::building::Building;

/// Structural identity of a parcel, used as the building cache key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParcelKey {
    pub shape: Rect2i,
    pub orientation: Orientation,
}

impl fmt::Display for ParcelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} facing {}", self.shape, self.orientation)
    }
}

/// A plot of land buildings can be placed on.
///
/// Shape and orientation are fixed at creation. Equality and hashing only
/// look at those two, so the buildings attached later do not change a
/// parcel's identity.
#[derive(Clone, Debug)]
pub struct Parcel {
    shape: Rect2i,
    orientation: Orientation,
    buildings: Vec<Arc<Building>>,
}

impl Parcel {
    pub fn new(shape: Rect2i, orientation: Orientation) -> Self {
        Self {
            shape,
            orientation,
            buildings: Vec::new(),
        }
    }

    pub fn shape(&self) -> Rect2i {
        self.shape
    }

    /// Direction the parcel's street side faces.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn key(&self) -> ParcelKey {
        ParcelKey {
            shape: self.shape,
            orientation: self.orientation,
        }
    }

    /// Attaches a building. Returns `false` if an equal building is already
    /// attached.
    pub fn add_building(&mut self, building: Arc<Building>) -> bool {
        if self.buildings.contains(&building) {
            return false;
        }
        self.buildings.push(building);
        true
    }

    pub fn buildings(&self) -> &[Arc<Building>] {
        &self.buildings
    }
}

impl PartialEq for Parcel {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Parcel {}

impl Hash for Parcel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
