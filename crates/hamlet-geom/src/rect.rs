//! Axis-aligned integer rectangles on the `(x, z)` grid.
//!
//! Bounds are inclusive on both ends, so a rectangle always covers at least
//! one cell. The second component of every [`IVec2`] is the world `z` axis.

use std::fmt;

use glam::{DVec2, IVec2};

use crate::Orientation;

/// Inclusive integer rectangle.
///
/// Invariant: `min.x <= max.x` and `min.y <= max.y`. Constructors sort the
/// corners, so an instance can never be empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect2i {
    min: IVec2,
    max: IVec2,
}

impl Rect2i {
    /// Create a rectangle from two corners (inclusive), sorting components
    /// so that `min <= max` on both axes.
    pub fn from_min_max(a: IVec2, b: IVec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create a rectangle from its minimum corner and size.
    ///
    /// Returns `None` if either size component is not positive.
    pub fn from_min_size(min: IVec2, size: IVec2) -> Option<Self> {
        if size.x <= 0 || size.y <= 0 {
            return None;
        }
        Some(Self {
            min,
            max: min + size - IVec2::ONE,
        })
    }

    pub fn min(&self) -> IVec2 {
        self.min
    }

    pub fn max(&self) -> IVec2 {
        self.max
    }

    /// Number of cells along x.
    pub fn width(&self) -> i32 {
        self.max.x - self.min.x + 1
    }

    /// Number of cells along z.
    pub fn height(&self) -> i32 {
        self.max.y - self.min.y + 1
    }

    pub fn area(&self) -> i64 {
        i64::from(self.width()) * i64::from(self.height())
    }

    /// Returns true if the cell lies inside or on the boundary.
    pub fn contains(&self, x: i32, z: i32) -> bool {
        x >= self.min.x && x <= self.max.x && z >= self.min.y && z <= self.max.y
    }

    /// Returns true if `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &Rect2i) -> bool {
        self.contains(other.min.x, other.min.y) && self.contains(other.max.x, other.max.y)
    }

    /// Returns true if the rectangles share at least one cell.
    pub fn intersects(&self, other: &Rect2i) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Returns the overlapping cells of both rectangles, if any.
    pub fn intersection(&self, other: &Rect2i) -> Option<Rect2i> {
        if !self.intersects(other) {
            return None;
        }
        Some(Rect2i {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        })
    }

    /// Grows the rectangle by `dx` cells on the west and east sides and by
    /// `dz` cells on the north and south sides. Negative values shrink it.
    ///
    /// Returns `None` if shrinking collapses the rectangle to a non-positive
    /// area.
    pub fn expand(&self, dx: i32, dz: i32) -> Option<Rect2i> {
        let delta = IVec2::new(dx, dz);
        let min = self.min - delta;
        let max = self.max + delta;
        if min.x > max.x || min.y > max.y {
            return None;
        }
        Some(Rect2i { min, max })
    }

    /// Returns true if the cell is inside and touches one of the four sides.
    pub fn is_on_border(&self, x: i32, z: i32) -> bool {
        self.contains(x, z)
            && (x == self.min.x || x == self.max.x || z == self.min.y || z == self.max.y)
    }

    /// Distance in cells from `(x, z)` to the nearest of the four sides.
    /// Zero on the border.
    pub fn distance_to_border(&self, x: i32, z: i32) -> i32 {
        (x - self.min.x)
            .min(self.max.x - x)
            .min(z - self.min.y)
            .min(self.max.y - z)
    }

    /// The side of the rectangle facing `orientation`, as a segment between
    /// the two corner cells of that side.
    pub fn edge(&self, orientation: Orientation) -> LineSegment {
        let (start, end) = match orientation {
            Orientation::North => (self.min, IVec2::new(self.max.x, self.min.y)),
            Orientation::South => (IVec2::new(self.min.x, self.max.y), self.max),
            Orientation::West => (self.min, IVec2::new(self.min.x, self.max.y)),
            Orientation::East => (IVec2::new(self.max.x, self.min.y), self.max),
        };
        LineSegment::new(start.as_dvec2(), end.as_dvec2())
    }

    /// Iterates all cells row by row (z outer, x inner).
    pub fn cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        (self.min.y..=self.max.y)
            .flat_map(move |z| (self.min.x..=self.max.x).map(move |x| IVec2::new(x, z)))
    }
}

impl fmt::Display for Rect2i {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[({}, {})..({}, {})]",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}

/// A straight segment between two points on the horizontal plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment {
    pub start: DVec2,
    pub end: DVec2,
}

impl LineSegment {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    /// Linear interpolation between start (`t = 0`) and end (`t = 1`).
    pub fn lerp(&self, t: f64) -> DVec2 {
        self.start.lerp(self.end, t)
    }

    pub fn midpoint(&self) -> DVec2 {
        self.lerp(0.5)
    }
}

/// Rounds each component to the nearest integer, ties towards positive
/// infinity (`2.5 -> 3`, `-2.5 -> -2`).
pub fn round_half_up(v: DVec2) -> IVec2 {
    IVec2::new((v.x + 0.5).floor() as i32, (v.y + 0.5).floor() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: i32, z0: i32, x1: i32, z1: i32) -> Rect2i {
        Rect2i::from_min_max(IVec2::new(x0, z0), IVec2::new(x1, z1))
    }

    #[test]
    fn test_corners_are_sorted() {
        let r = rect(10, 10, 0, 0);
        assert_eq!(r.min(), IVec2::new(0, 0));
        assert_eq!(r.max(), IVec2::new(10, 10));
        assert_eq!(r.width(), 11);
        assert_eq!(r.area(), 121);
    }

    #[test]
    fn test_from_min_size_rejects_empty() {
        assert!(Rect2i::from_min_size(IVec2::ZERO, IVec2::new(0, 4)).is_none());
        let r = Rect2i::from_min_size(IVec2::new(2, 3), IVec2::new(4, 5)).unwrap();
        assert_eq!(r.max(), IVec2::new(5, 7));
    }

    #[test]
    fn test_expand_and_collapse() {
        let r = rect(0, 0, 9, 9);
        let inset = r.expand(-2, -2).unwrap();
        assert_eq!(inset, rect(2, 2, 7, 7));
        assert_eq!(inset.expand(1, 1).unwrap(), rect(1, 1, 8, 8));

        // 4 cells wide: shrinking by 2 on both sides leaves nothing.
        assert!(rect(0, 0, 3, 3).expand(-2, -2).is_none());
        // 5 cells wide: a single column survives.
        assert_eq!(rect(0, 0, 4, 4).expand(-2, -2).unwrap(), rect(2, 2, 2, 2));
    }

    #[test]
    fn test_intersection() {
        let a = rect(0, 0, 10, 10);
        let b = rect(5, -3, 20, 4);
        assert_eq!(a.intersection(&b), Some(rect(5, 0, 10, 4)));
        assert!(a.intersection(&rect(11, 0, 12, 1)).is_none());
        assert!(a.contains_rect(&rect(1, 1, 10, 10)));
        assert!(!a.contains_rect(&b));
    }

    #[test]
    fn test_edges_follow_orientation() {
        let r = rect(0, 0, 10, 10);
        let south = r.edge(Orientation::South);
        assert_eq!(south.start, DVec2::new(0.0, 10.0));
        assert_eq!(south.end, DVec2::new(10.0, 10.0));
        assert_eq!(r.edge(Orientation::North).midpoint(), DVec2::new(5.0, 0.0));
        assert_eq!(r.edge(Orientation::West).midpoint(), DVec2::new(0.0, 5.0));
        assert_eq!(r.edge(Orientation::East).midpoint(), DVec2::new(10.0, 5.0));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(DVec2::new(4.5, 9.0)), IVec2::new(5, 9));
        assert_eq!(round_half_up(DVec2::new(-2.5, 0.49)), IVec2::new(-2, 0));
        assert_eq!(round_half_up(DVec2::new(-2.51, 7.5)), IVec2::new(-3, 8));
    }

    #[test]
    fn test_border_distance() {
        let r = rect(0, 0, 6, 6);
        assert_eq!(r.distance_to_border(0, 3), 0);
        assert_eq!(r.distance_to_border(3, 3), 3);
        assert_eq!(r.distance_to_border(5, 2), 1);
        assert!(r.is_on_border(6, 4));
        assert!(!r.is_on_border(3, 3));
    }

    #[test]
    fn test_cells_cover_area() {
        let r = rect(-1, -1, 1, 2);
        let cells: Vec<_> = r.cells().collect();
        assert_eq!(cells.len() as i64, r.area());
        assert_eq!(cells[0], IVec2::new(-1, -1));
        assert_eq!(cells[cells.len() - 1], IVec2::new(1, 2));
    }
}
