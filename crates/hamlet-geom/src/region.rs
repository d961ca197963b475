//! 3D generation regions and the borders facets need around them.

use std::fmt;

use glam::{IVec2, IVec3};

use crate::Rect2i;

/// An axis-aligned block region in world coordinates.
///
/// Invariant: every component of `size` is positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region3i {
    min: IVec3,
    size: IVec3,
}

impl Region3i {
    /// Returns `None` if any size component is not positive.
    pub fn from_min_size(min: IVec3, size: IVec3) -> Option<Self> {
        if size.min_element() <= 0 {
            return None;
        }
        Some(Self { min, size })
    }

    /// A cube region starting at `min`.
    pub fn cube(min: IVec3, side: i32) -> Option<Self> {
        Self::from_min_size(min, IVec3::splat(side))
    }

    pub fn min(&self) -> IVec3 {
        self.min
    }

    /// Inclusive maximum corner.
    pub fn max(&self) -> IVec3 {
        self.min + self.size - IVec3::ONE
    }

    pub fn size(&self) -> IVec3 {
        self.size
    }

    pub fn contains(&self, p: IVec3) -> bool {
        let max = self.max();
        p.x >= self.min.x
            && p.x <= max.x
            && p.y >= self.min.y
            && p.y <= max.y
            && p.z >= self.min.z
            && p.z <= max.z
    }

    /// Horizontal footprint of the region.
    pub fn area(&self) -> Rect2i {
        let max = self.max();
        Rect2i::from_min_max(
            IVec2::new(self.min.x, self.min.z),
            IVec2::new(max.x, max.z),
        )
    }

    /// Grows the region by `border` on every side.
    pub fn expand(&self, border: &Border3) -> Region3i {
        let lower = IVec3::new(border.sides, border.bottom, border.sides);
        let growth = IVec3::new(
            2 * border.sides,
            border.bottom + border.top,
            2 * border.sides,
        );
        Region3i {
            min: self.min - lower,
            size: self.size + growth,
        }
    }
}

impl fmt::Display for Region3i {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max = self.max();
        write!(
            f,
            "[({}, {}, {})..({}, {}, {})]",
            self.min.x, self.min.y, self.min.z, max.x, max.y, max.z
        )
    }
}

/// Extra margin a facet needs beyond the core region, so that features
/// straddling the region boundary are generated completely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
///
/// Invariant: no component is negative.
pub struct Border3 {
    top: i32,
    bottom: i32,
    sides: i32,
}

impl Border3 {
    /// Negative components are clamped to zero.
    pub fn new(top: i32, bottom: i32, sides: i32) -> Self {
        Self {
            top: top.max(0),
            bottom: bottom.max(0),
            sides: sides.max(0),
        }
    }

    /// Cells above the region.
    pub fn top(&self) -> i32 {
        self.top
    }

    /// Cells below the region.
    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    /// Cells on each horizontal side.
    pub fn sides(&self) -> i32 {
        self.sides
    }

    /// Returns a border large enough for both `self` and `other`.
    pub fn union(&self, other: &Border3) -> Border3 {
        Border3 {
            top: self.top.max(other.top),
            bottom: self.bottom.max(other.bottom),
            sides: self.sides.max(other.sides),
        }
    }

    /// Adds extra margin on top of this border.
    pub fn extend_by(&self, top: i32, bottom: i32, sides: i32) -> Border3 {
        Border3::new(self.top + top, self.bottom + bottom, self.sides + sides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_rejects_empty_size() {
        assert!(Region3i::from_min_size(IVec3::ZERO, IVec3::new(4, 0, 4)).is_none());
        assert!(Region3i::cube(IVec3::ZERO, 32).is_some());
    }

    #[test]
    fn test_expand_by_border() {
        let region = Region3i::cube(IVec3::new(32, 0, -32), 32).unwrap();
        let border = Border3::new(2, 1, 8);
        let bordered = region.expand(&border);
        assert_eq!(bordered.min(), IVec3::new(24, -1, -40));
        assert_eq!(bordered.max(), IVec3::new(71, 33, 7));
        assert!(bordered.contains(region.min()));
        assert!(bordered.contains(region.max()));
    }

    #[test]
    fn test_area_uses_x_and_z() {
        let region = Region3i::from_min_size(IVec3::new(1, 2, 3), IVec3::new(4, 5, 6)).unwrap();
        let area = region.area();
        assert_eq!(area.min(), IVec2::new(1, 3));
        assert_eq!(area.max(), IVec2::new(4, 8));
    }

    #[test]
    fn test_border_union_and_clamp() {
        let a = Border3::new(-3, 4, 1);
        assert_eq!((a.top(), a.bottom(), a.sides()), (0, 4, 1));
        let b = Border3::new(2, 0, 6);
        assert_eq!(a.union(&b), Border3::new(2, 4, 6));
        assert_eq!(b.extend_by(1, 1, 1), Border3::new(3, 1, 7));
    }

    #[test]
    fn test_shrinking_border_keeps_region_valid() {
        let border = Border3::new(2, 2, 2).extend_by(-5, -5, -5);
        assert_eq!(border, Border3::default());
        let region = Region3i::cube(IVec3::ZERO, 4).unwrap();
        assert_eq!(region.expand(&border), region);
        assert!(region.expand(&border).size().min_element() > 0);
    }
}
