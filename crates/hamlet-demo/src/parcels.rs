//! A stand-in for a real land partitioner: a regular grid of square parcels
//! separated by streets, kept only where a settlement covers them.

use hamlet_bldg::{GeneratingRegion, Parcel, ParcelFacet, Settlement, SettlementFacet};
use hamlet_geom::{IVec2, Orientation, Rect2i};

#[derive(Clone, Debug)]
pub struct GridParcelSource {
    parcel_size: i32,
    street_width: i32,
    settlements: Vec<Settlement>,
}

impl GridParcelSource {
    /// `parcel_size` must be positive and `street_width` non-negative.
    pub fn new(parcel_size: i32, street_width: i32, settlements: Vec<Settlement>) -> Self {
        Self {
            parcel_size: parcel_size.max(1),
            street_width: street_width.max(0),
            settlements,
        }
    }

    pub fn settlements(&self) -> &[Settlement] {
        &self.settlements
    }

    fn pitch(&self) -> i32 {
        self.parcel_size + self.street_width
    }

    fn cell_shape(&self, i: i32, j: i32) -> Rect2i {
        let min = IVec2::new(i, j) * self.pitch();
        Rect2i::from_min_max(min, min + IVec2::splat(self.parcel_size - 1))
    }

    /// Parcels whose shape overlaps `area`. Each faces the centre of the
    /// first settlement containing its own centre.
    pub fn parcels_in(&self, area: Rect2i) -> Vec<Parcel> {
        let pitch = self.pitch();
        let (lo, hi) = (area.min(), area.max());
        let mut parcels = Vec::new();
        for j in lo.y.div_euclid(pitch)..=hi.y.div_euclid(pitch) {
            for i in lo.x.div_euclid(pitch)..=hi.x.div_euclid(pitch) {
                let shape = self.cell_shape(i, j);
                if !shape.intersects(&area) {
                    continue;
                }
                let centre = (shape.min() + shape.max()) / 2;
                let Some(settlement) = self
                    .settlements
                    .iter()
                    .find(|s| s.contains(centre.x, centre.y))
                else {
                    continue;
                };
                parcels.push(Parcel::new(shape, facing(centre, settlement.center)));
            }
        }
        parcels
    }

    pub fn parcel_facet(&self, region: &GeneratingRegion) -> ParcelFacet {
        let mut facet = ParcelFacet::for_region(region);
        facet.extend(self.parcels_in(region.bordered_area()));
        facet
    }

    pub fn settlement_facet(&self, region: &GeneratingRegion) -> SettlementFacet {
        let area = region.bordered_area();
        let mut facet = SettlementFacet::for_region(region);
        facet.extend(
            self.settlements
                .iter()
                .filter(|s| s.bounds().intersects(&area))
                .cloned(),
        );
        facet
    }
}

/// Direction from `from` towards `to` along the dominant axis.
fn facing(from: IVec2, to: IVec2) -> Orientation {
    let d = to - from;
    if d.x.abs() >= d.y.abs() {
        if d.x >= 0 {
            Orientation::East
        } else {
            Orientation::West
        }
    } else if d.y > 0 {
        Orientation::South
    } else {
        Orientation::North
    }
}
